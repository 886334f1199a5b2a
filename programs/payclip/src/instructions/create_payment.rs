use crate::{
    address::payment_address, constants::*, error::ErrorCode, events::PaymentCreated, state::*,
};
use anchor_lang::{
    prelude::*,
    system_program::{
        allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
    },
};
use anchor_spl::token::Mint;

#[derive(Accounts)]
pub struct CreatePayment<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Allocated by the handler at the address derived from `payment_id`.
    /// The id is caller-supplied and its bounds are checked before derivation.
    #[account(mut)]
    pub payment: UncheckedAccount<'info>,

    pub recipient: SystemAccount<'info>,

    pub mint: Account<'info, Mint>,

    /// Recipient statistics, created on the first payment addressed to them
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + UserStats::INIT_SPACE,
        seeds = [USER_STATS_SEED.as_bytes(), recipient.key().as_ref()],
        bump
    )]
    pub user_stats: Account<'info, UserStats>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreatePayment<'info> {
    pub fn create_payment(
        &mut self,
        amount: u64,
        payment_id: String,
        expires_at: i64,
        bumps: &CreatePaymentBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        // 1. Reject malformed requests before touching any account
        Payment::validate_request(amount, &payment_id, expires_at, now)?;
        Payment::validate_parties(&self.payer.key(), &self.recipient.key())?;

        // 2. The passed account must be the derived address, and still empty
        let (expected, bump) = payment_address(&payment_id, &crate::ID)?;
        require_keys_eq!(
            self.payment.key(),
            expected,
            ErrorCode::PaymentAddressMismatch
        );
        require!(
            self.payment.data_is_empty() && self.payment.owner != &crate::ID,
            ErrorCode::DuplicatePaymentId
        );

        // 3. Allocate and write the payment record
        self.allocate_payment(&payment_id, bump)?;

        let payment = Payment {
            payer: self.payer.key(),
            recipient: self.recipient.key(),
            mint: self.mint.key(),
            amount,
            payment_id: payment_id.clone(),
            created_at: now,
            expires_at,
            settled_at: None,
            status: PaymentStatus::Pending,
            bump,
        };
        payment.store(&self.payment)?;

        // 4. Lazily open the recipient's stats; existing stats stay as they are
        if !self.user_stats.is_initialized() {
            self.user_stats
                .open(self.recipient.key(), bumps.user_stats);
            msg!("Opened user stats for recipient {}", self.recipient.key());
        }

        emit!(PaymentCreated {
            payment: self.payment.key(),
            payment_id: payment_id.clone(),
            payer: self.payer.key(),
            recipient: self.recipient.key(),
            mint: self.mint.key(),
            amount,
            expires_at,
            timestamp: now,
        });

        msg!(
            "Payment '{}' created: {} units of {} from {} to {}, expires at {}",
            payment_id,
            amount,
            self.mint.key(),
            self.payer.key(),
            self.recipient.key(),
            expires_at
        );

        Ok(())
    }

    /// Create the payment account owned by this program, signing for the
    /// PDA. An address that was pre-funded cannot go through
    /// `create_account`, so it is topped up, allocated and assigned instead.
    fn allocate_payment(&self, payment_id: &str, bump: u8) -> Result<()> {
        let space = 8 + Payment::INIT_SPACE;
        let rent_exempt = Rent::get()?.minimum_balance(space);

        let bump_seed = [bump];
        let seeds = &[PAYMENT_SEED.as_bytes(), payment_id.as_bytes(), &bump_seed[..]];
        let signer = &[&seeds[..]];

        let current_lamports = self.payment.lamports();
        if current_lamports == 0 {
            return create_account(
                CpiContext::new_with_signer(
                    self.system_program.to_account_info(),
                    CreateAccount {
                        from: self.payer.to_account_info(),
                        to: self.payment.to_account_info(),
                    },
                    signer,
                ),
                rent_exempt,
                space as u64,
                &crate::ID,
            );
        }

        let top_up = rent_exempt.saturating_sub(current_lamports);
        if top_up > 0 {
            transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.payer.to_account_info(),
                        to: self.payment.to_account_info(),
                    },
                ),
                top_up,
            )?;
        }

        allocate(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Allocate {
                    account_to_allocate: self.payment.to_account_info(),
                },
                signer,
            ),
            space as u64,
        )?;

        assign(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Assign {
                    account_to_assign: self.payment.to_account_info(),
                },
                signer,
            ),
            &crate::ID,
        )
    }
}
