use crate::error::ErrorCode;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct UserStats {
    pub recipient: Pubkey,
    pub total_received: u64, // base units of settled payments
    pub payments_settled: u64,
    pub last_settled_at: Option<i64>,
    pub bump: u8,
}

impl UserStats {
    pub fn is_initialized(&self) -> bool {
        self.recipient != Pubkey::default()
    }

    pub fn open(&mut self, recipient: Pubkey, bump: u8) {
        self.recipient = recipient;
        self.total_received = 0;
        self.payments_settled = 0;
        self.last_settled_at = None;
        self.bump = bump;
    }

    /// Both counters are checked before either is written.
    pub fn record_settlement(&mut self, amount: u64, now: i64) -> Result<()> {
        let total_received = self
            .total_received
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let payments_settled = self
            .payments_settled
            .checked_add(1)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        self.total_received = total_received;
        self.payments_settled = payments_settled;
        self.last_settled_at = Some(now);
        Ok(())
    }
}
