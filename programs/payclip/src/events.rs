//! Events emitted on every state transition, for indexers and wallets.

use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PaymentCreated {
    pub payment: Pubkey,
    pub payment_id: String,
    pub payer: Pubkey,
    pub recipient: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub expires_at: i64,
    pub timestamp: i64,
}

#[event]
pub struct PaymentSettled {
    pub payment: Pubkey,
    pub payer: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    /// Recipient totals after this settlement.
    pub total_received: u64,
    pub payments_settled: u64,
    pub timestamp: i64,
}

#[event]
pub struct PaymentExpired {
    pub payment: Pubkey,
    pub payer: Pubkey,
    pub recipient: Pubkey,
    pub expires_at: i64,
    pub timestamp: i64,
}
