use crate::{constants::*, events::VaultInitialized, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    // init_if_needed so a second call reaches the handler and fails with
    // AlreadyInitialized instead of a system program error
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + VaultState::INIT_SPACE,
        seeds = [VAULT_SEED.as_bytes()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeVault<'info> {
    pub fn initialize_vault(&mut self, bump: u8, bumps: &InitializeVaultBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        self.vault_state
            .initialize(self.authority.key(), bump, bumps.vault_state, now)?;

        emit!(VaultInitialized {
            vault: self.vault_state.key(),
            authority: self.authority.key(),
            timestamp: now,
        });

        msg!(
            "PayClip vault {} initialized by authority: {}",
            self.vault_state.key(),
            self.authority.key()
        );

        Ok(())
    }
}
