use crate::{constants::*, error::ErrorCode, events::PaymentSettled, state::*};
use anchor_lang::{prelude::*, solana_program::program_option::COption};
use anchor_spl::token::{transfer_checked, Mint, Token, TokenAccount, TransferChecked};

/// Settle a pending payment: move the tokens, mark the record settled and
/// credit the recipient's stats. A failure at any step aborts the whole
/// transaction, so value never moves without the status changing.
#[derive(Accounts)]
pub struct ProcessPayment<'info> {
    /// The payer, or the delegate approved on the payer's token account
    pub payer: Signer<'info>,

    /// CHECK: Loaded with `Payment::load`, which checks ownership and
    /// re-derives the address from the stored payment id and bump.
    #[account(mut)]
    pub payment: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [USER_STATS_SEED.as_bytes(), recipient.key().as_ref()],
        bump = user_stats.bump,
    )]
    pub user_stats: Account<'info, UserStats>,

    #[account(
        mut,
        constraint = payer_token_account.mint == mint.key() @ ErrorCode::TokenAccountMismatch
    )]
    pub payer_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient_token_account.key() != payer_token_account.key() @ ErrorCode::TokenAccountMismatch,
        constraint = recipient_token_account.mint == mint.key() @ ErrorCode::TokenAccountMismatch,
        constraint = recipient_token_account.owner == recipient.key() @ ErrorCode::TokenAccountMismatch
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub recipient: SystemAccount<'info>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

impl<'info> ProcessPayment<'info> {
    pub fn process_payment(&mut self, amount: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        // 1. Load and verify the payment record
        let mut payment = Payment::load(&self.payment)?;

        // 2. The referenced accounts must belong to this payment
        require_keys_eq!(
            payment.recipient,
            self.recipient.key(),
            ErrorCode::RecipientMismatch
        );
        require_keys_eq!(payment.mint, self.mint.key(), ErrorCode::MintMismatch);
        require_keys_eq!(
            self.payer_token_account.owner,
            payment.payer,
            ErrorCode::TokenAccountMismatch
        );
        self.check_authority(&payment, amount)?;

        // 3. Status, expiry and amount
        payment.settle(amount, now)?;

        // 4. Move the tokens
        self.transfer_to_recipient(amount)?;

        // 5. Credit the recipient and persist the record
        self.user_stats.record_settlement(amount, now)?;
        payment.store(&self.payment)?;

        emit!(PaymentSettled {
            payment: self.payment.key(),
            payer: payment.payer,
            recipient: payment.recipient,
            amount,
            total_received: self.user_stats.total_received,
            payments_settled: self.user_stats.payments_settled,
            timestamp: now,
        });

        msg!(
            "Payment '{}' settled: {} units from {} to {} (recipient total: {}, settled: {})",
            payment.payment_id,
            amount,
            payment.payer,
            payment.recipient,
            self.user_stats.total_received,
            self.user_stats.payments_settled
        );

        Ok(())
    }

    /// The signer must be the payer, or a delegate approved for at least
    /// `amount` on the payer's token account.
    fn check_authority(&self, payment: &Payment, amount: u64) -> Result<()> {
        let signer = self.payer.key();
        if signer == payment.payer {
            return Ok(());
        }

        let is_delegate = self.payer_token_account.delegate == COption::Some(signer)
            && self.payer_token_account.delegated_amount >= amount;
        require!(is_delegate, ErrorCode::UnauthorizedPayer);
        Ok(())
    }

    fn transfer_to_recipient(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.payer_token_account.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.recipient_token_account.to_account_info(),
            authority: self.payer.to_account_info(),
        };
        let cpi_program = self.token_program.to_account_info();
        transfer_checked(
            CpiContext::new(cpi_program, cpi_accounts),
            amount,
            self.mint.decimals,
        )
    }
}
