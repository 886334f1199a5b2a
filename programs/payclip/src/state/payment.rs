use crate::{address::verify_payment_address, constants::*, error::ErrorCode};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Settled,
    Expired,
}

impl anchor_lang::Space for PaymentStatus {
    const INIT_SPACE: usize = 1; // 1 byte for enum discriminator
}

#[account]
#[derive(InitSpace, Debug)]
pub struct Payment {
    pub payer: Pubkey,
    pub recipient: Pubkey,
    pub mint: Pubkey,
    pub amount: u64, // token base units
    #[max_len(MAX_PAYMENT_ID_LENGTH)]
    pub payment_id: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub settled_at: Option<i64>,
    pub status: PaymentStatus,
    pub bump: u8,
}

impl Payment {
    pub fn validate_request(
        amount: u64,
        payment_id: &str,
        expires_at: i64,
        now: i64,
    ) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        require!(expires_at > now, ErrorCode::InvalidExpiry);
        crate::address::validate_payment_id(payment_id)
    }

    /// A payer paying themselves would credit stats with no net movement.
    pub fn validate_parties(payer: &Pubkey, recipient: &Pubkey) -> Result<()> {
        require_keys_neq!(*payer, *recipient, ErrorCode::SelfPayment);
        Ok(())
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Status as an observer should read it. A pending payment past its
    /// deadline is reported as expired even before anyone persists that.
    pub fn status_at(&self, now: i64) -> PaymentStatus {
        match self.status {
            PaymentStatus::Pending if self.is_expired(now) => PaymentStatus::Expired,
            status => status,
        }
    }

    /// Pending -> Settled. Settling at or after the deadline moves the
    /// record to Expired and fails with `PaymentExpired`.
    pub fn settle(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(
            self.status == PaymentStatus::Pending,
            ErrorCode::AlreadySettled
        );
        if self.is_expired(now) {
            self.status = PaymentStatus::Expired;
            return err!(ErrorCode::PaymentExpired);
        }
        require!(amount == self.amount, ErrorCode::AmountMismatch);

        self.status = PaymentStatus::Settled;
        self.settled_at = Some(now);
        Ok(())
    }

    /// Pending -> Expired, only once the deadline has passed.
    pub fn expire(&mut self, now: i64) -> Result<()> {
        require!(
            self.status == PaymentStatus::Pending,
            ErrorCode::AlreadySettled
        );
        require!(self.is_expired(now), ErrorCode::PaymentNotExpired);

        self.status = PaymentStatus::Expired;
        Ok(())
    }

    /// Deserialize a payment from an unchecked account, rejecting empty or
    /// foreign accounts and any address that does not re-derive from the
    /// stored id and bump.
    pub fn load(info: &AccountInfo) -> Result<Payment> {
        require!(
            !info.data_is_empty() && info.owner == &crate::ID,
            ErrorCode::PaymentNotFound
        );

        let payment = {
            let data = info.try_borrow_data()?;
            Payment::try_deserialize(&mut &data[..]).map_err(|_| ErrorCode::PaymentNotFound)?
        };
        verify_payment_address(info.key, &payment.payment_id, payment.bump, &crate::ID)?;

        Ok(payment)
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{address::payment_address, error::assert_error};

    const NOW: i64 = 1_700_000_000;

    fn pending(amount: u64, expires_at: i64) -> Payment {
        let (_, bump) = payment_address("test_payment_001", &crate::ID).unwrap();
        Payment {
            payer: Pubkey::new_unique(),
            recipient: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            amount,
            payment_id: "test_payment_001".to_string(),
            created_at: NOW,
            expires_at,
            settled_at: None,
            status: PaymentStatus::Pending,
            bump,
        }
    }

    #[test]
    fn request_validation() {
        assert!(Payment::validate_request(500, "id", NOW + 600, NOW).is_ok());
        assert_error(
            Payment::validate_request(0, "id", NOW + 600, NOW),
            ErrorCode::InvalidAmount,
        );
        assert_error(
            Payment::validate_request(500, "id", NOW, NOW),
            ErrorCode::InvalidExpiry,
        );
        assert_error(
            Payment::validate_request(500, "id", NOW - 1, NOW),
            ErrorCode::InvalidExpiry,
        );
        assert_error(
            Payment::validate_request(500, &"p".repeat(33), NOW + 600, NOW),
            ErrorCode::PaymentIdTooLong,
        );
    }

    #[test]
    fn payer_cannot_pay_themselves() {
        let payer = Pubkey::new_unique();
        assert!(Payment::validate_parties(&payer, &Pubkey::new_unique()).is_ok());
        assert_error(
            Payment::validate_parties(&payer, &payer),
            ErrorCode::SelfPayment,
        );
    }

    #[test]
    fn account_space_tracks_payment_id_bound() {
        // payer, recipient, mint, amount, id, created_at, expires_at,
        // settled_at, status, bump
        let expected = 32 * 3 + 8 + (4 + MAX_PAYMENT_ID_LENGTH) + 8 + 8 + (1 + 8) + 1 + 1;
        assert_eq!(Payment::INIT_SPACE, expected);

        let longest = pending(500, NOW + 600);
        let longest = Payment {
            payment_id: "x".repeat(MAX_PAYMENT_ID_LENGTH),
            ..longest
        };
        let mut data = vec![0u8; 8 + Payment::INIT_SPACE];
        let mut writer: &mut [u8] = &mut data[..];
        longest.try_serialize(&mut writer).unwrap();
    }

    #[test]
    fn settles_exactly_once() {
        let mut payment = pending(500, NOW + 600);
        payment.settle(500, NOW + 1).unwrap();
        assert_eq!(payment.status, PaymentStatus::Settled);
        assert_eq!(payment.settled_at, Some(NOW + 1));

        assert_error(payment.settle(500, NOW + 2), ErrorCode::AlreadySettled);
        assert_eq!(payment.settled_at, Some(NOW + 1));
    }

    #[test]
    fn amount_mismatch_keeps_pending() {
        let mut payment = pending(500, NOW + 600);
        assert_error(payment.settle(499, NOW), ErrorCode::AmountMismatch);
        assert_error(payment.settle(501, NOW), ErrorCode::AmountMismatch);
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[test]
    fn settling_at_deadline_expires() {
        let mut payment = pending(500, NOW + 600);
        assert_error(payment.settle(500, NOW + 600), ErrorCode::PaymentExpired);
        assert_eq!(payment.status, PaymentStatus::Expired);
        assert_eq!(payment.settled_at, None);

        assert_error(payment.settle(500, NOW + 601), ErrorCode::AlreadySettled);
        assert_eq!(payment.status, PaymentStatus::Expired);
    }

    #[test]
    fn expire_requires_passed_deadline() {
        let mut payment = pending(500, NOW + 600);
        assert_error(payment.expire(NOW + 599), ErrorCode::PaymentNotExpired);
        assert_eq!(payment.status, PaymentStatus::Pending);

        payment.expire(NOW + 600).unwrap();
        assert_eq!(payment.status, PaymentStatus::Expired);
        assert_error(payment.expire(NOW + 700), ErrorCode::AlreadySettled);

        let mut settled = pending(500, NOW + 600);
        settled.settle(500, NOW).unwrap();
        assert_error(settled.expire(NOW + 700), ErrorCode::AlreadySettled);
        assert_eq!(settled.status, PaymentStatus::Settled);
    }

    #[test]
    fn observed_status_discovers_expiry() {
        let payment = pending(500, NOW + 600);
        assert_eq!(payment.status_at(NOW), PaymentStatus::Pending);
        assert_eq!(payment.status_at(NOW + 600), PaymentStatus::Expired);
        // the stored status is untouched
        assert_eq!(payment.status, PaymentStatus::Pending);

        let mut settled = pending(500, NOW + 600);
        settled.settle(500, NOW).unwrap();
        assert_eq!(settled.status_at(NOW + 10_000), PaymentStatus::Settled);
    }

    #[test]
    fn load_and_store_through_account_info() {
        let payment = pending(500, NOW + 600);
        let (key, _) = payment_address(&payment.payment_id, &crate::ID).unwrap();
        let owner = crate::ID;
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; 8 + Payment::INIT_SPACE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        payment.store(&info).unwrap();
        let mut loaded = Payment::load(&info).unwrap();
        assert_eq!(loaded.amount, 500);
        assert_eq!(loaded.payer, payment.payer);
        assert_eq!(loaded.status, PaymentStatus::Pending);

        loaded.settle(500, NOW).unwrap();
        loaded.store(&info).unwrap();
        assert_eq!(Payment::load(&info).unwrap().status, PaymentStatus::Settled);
    }

    #[test]
    fn load_rejects_missing_and_spoofed_accounts() {
        let payment = pending(500, NOW + 600);
        let (key, _) = payment_address(&payment.payment_id, &crate::ID).unwrap();
        let owner = crate::ID;

        let mut lamports = 0;
        let mut empty: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut empty, &owner, false, 0);
        assert_error(Payment::load(&info), ErrorCode::PaymentNotFound);

        let foreign_owner = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; 8 + Payment::INIT_SPACE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &foreign_owner, false, 0);
        payment.store(&info).unwrap();
        assert_error(Payment::load(&info), ErrorCode::PaymentNotFound);

        let spoofed = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; 8 + Payment::INIT_SPACE];
        let info = AccountInfo::new(&spoofed, false, true, &mut lamports, &mut data, &owner, false, 0);
        payment.store(&info).unwrap();
        assert_error(Payment::load(&info), ErrorCode::PaymentAddressMismatch);
    }
}
