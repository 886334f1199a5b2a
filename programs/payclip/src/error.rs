use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Validation errors
    #[msg("Payment amount must be greater than zero")]
    InvalidAmount,
    #[msg("Payment expiry must be in the future")]
    InvalidExpiry,
    #[msg("Payment id must not be empty")]
    EmptyPaymentId,
    #[msg("Payment id is too long")]
    PaymentIdTooLong,

    // Integrity errors
    #[msg("Supplied bump does not match the canonical bump")]
    BumpMismatch,
    #[msg("Payment id is already in use")]
    DuplicatePaymentId,
    #[msg("Account address does not match the derived payment address")]
    PaymentAddressMismatch,
    #[msg("Token account mint or owner does not match the payment")]
    TokenAccountMismatch,
    #[msg("Mint does not match the payment")]
    MintMismatch,
    #[msg("Recipient does not match the payment")]
    RecipientMismatch,
    #[msg("Signer is not the payer or an approved delegate")]
    UnauthorizedPayer,
    #[msg("Payer and recipient must differ")]
    SelfPayment,

    // State errors
    #[msg("Vault is already initialized")]
    AlreadyInitialized,
    #[msg("Payment not found")]
    PaymentNotFound,
    #[msg("Payment is no longer pending")]
    AlreadySettled,
    #[msg("Payment has expired")]
    PaymentExpired,
    #[msg("Payment has not expired yet")]
    PaymentNotExpired,
    #[msg("Amount does not match the payment amount")]
    AmountMismatch,

    // Math errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}

#[cfg(test)]
pub(crate) fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: ErrorCode) {
    let expected: anchor_lang::error::Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}
