//! Program derived addresses for every PayClip account.
//!
//! The ledger has no foreign keys, so any address a caller hands us is
//! recomputed from its seeds and compared before the account is trusted.

use crate::{constants::*, error::ErrorCode};
use anchor_lang::prelude::*;

pub fn vault_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED.as_bytes()], program_id)
}

pub fn user_stats_address(recipient: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[USER_STATS_SEED.as_bytes(), recipient.as_ref()],
        program_id,
    )
}

/// Payment ids double as a PDA seed and must fit in one.
pub fn validate_payment_id(payment_id: &str) -> Result<()> {
    require!(!payment_id.is_empty(), ErrorCode::EmptyPaymentId);
    require!(
        payment_id.len() <= MAX_PAYMENT_ID_LENGTH,
        ErrorCode::PaymentIdTooLong
    );
    Ok(())
}

pub fn payment_address(payment_id: &str, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    validate_payment_id(payment_id)?;
    Ok(Pubkey::find_program_address(
        &[PAYMENT_SEED.as_bytes(), payment_id.as_bytes()],
        program_id,
    ))
}

/// Re-derive a payment address from its stored id and bump and compare it
/// against the account the caller supplied.
pub fn verify_payment_address(
    key: &Pubkey,
    payment_id: &str,
    bump: u8,
    program_id: &Pubkey,
) -> Result<()> {
    validate_payment_id(payment_id)?;
    let expected = Pubkey::create_program_address(
        &[PAYMENT_SEED.as_bytes(), payment_id.as_bytes(), &[bump]],
        program_id,
    )
    .map_err(|_| ErrorCode::PaymentAddressMismatch)?;

    require_keys_eq!(*key, expected, ErrorCode::PaymentAddressMismatch);
    Ok(())
}
