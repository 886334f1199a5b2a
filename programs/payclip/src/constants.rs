use anchor_lang::prelude::*;

#[constant]
pub const VAULT_SEED: &str = "vault";
#[constant]
pub const PAYMENT_SEED: &str = "payment";
#[constant]
pub const USER_STATS_SEED: &str = "user_stats";

// A single PDA seed may not exceed 32 bytes
pub const MAX_PAYMENT_ID_LENGTH: usize = 32;
