use crate::error::ErrorCode;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct VaultState {
    pub authority: Pubkey,
    pub initialized_at: i64,
    pub bump: u8,
}

impl VaultState {
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    /// One-time gate: a vault that already names an authority is never
    /// rewritten, and the caller's bump must be the canonical one.
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        bump: u8,
        canonical_bump: u8,
        now: i64,
    ) -> Result<()> {
        require!(!self.is_initialized(), ErrorCode::AlreadyInitialized);
        require!(bump == canonical_bump, ErrorCode::BumpMismatch);

        self.authority = authority;
        self.initialized_at = now;
        self.bump = bump;
        Ok(())
    }
}
