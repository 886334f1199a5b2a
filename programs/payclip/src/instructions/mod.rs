pub mod create_payment;
pub mod expire_payment;
pub mod initialize_vault;
pub mod process_payment;

pub use create_payment::*;
pub use expire_payment::*;
pub use initialize_vault::*;
pub use process_payment::*;
