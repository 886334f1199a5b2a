pub mod address;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("8vuHXvK5vA9XNFoRpqFktB11kNotGR5fexyT2jzgZyof");

#[program]
pub mod payclip {
    use super::*;

    pub fn initialize_vault(ctx: Context<InitializeVault>, bump: u8) -> Result<()> {
        ctx.accounts.initialize_vault(bump, &ctx.bumps)
    }

    pub fn create_payment(
        ctx: Context<CreatePayment>,
        amount: u64,
        payment_id: String,
        expires_at: i64,
    ) -> Result<()> {
        ctx.accounts
            .create_payment(amount, payment_id, expires_at, &ctx.bumps)
    }

    pub fn process_payment(ctx: Context<ProcessPayment>, amount: u64) -> Result<()> {
        ctx.accounts.process_payment(amount)
    }

    pub fn expire_payment(ctx: Context<ExpirePayment>) -> Result<()> {
        ctx.accounts.expire_payment()
    }
}
