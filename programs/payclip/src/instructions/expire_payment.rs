use crate::{events::PaymentExpired, state::*};
use anchor_lang::prelude::*;

/// Persist the Expired status of a pending payment whose deadline passed.
/// A failing `process_payment` is rolled back with the rest of its
/// transaction, so this is the only path that writes Expired to the ledger.
#[derive(Accounts)]
pub struct ExpirePayment<'info> {
    pub cranker: Signer<'info>,

    /// CHECK: Loaded with `Payment::load`, which checks ownership and
    /// re-derives the address from the stored payment id and bump.
    #[account(mut)]
    pub payment: UncheckedAccount<'info>,
}

impl<'info> ExpirePayment<'info> {
    pub fn expire_payment(&mut self) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        let mut payment = Payment::load(&self.payment)?;
        payment.expire(now)?;
        payment.store(&self.payment)?;

        emit!(PaymentExpired {
            payment: self.payment.key(),
            payer: payment.payer,
            recipient: payment.recipient,
            expires_at: payment.expires_at,
            timestamp: now,
        });

        msg!(
            "Payment '{}' expired at {} (marked by {})",
            payment.payment_id,
            payment.expires_at,
            self.cranker.key()
        );

        Ok(())
    }
}
