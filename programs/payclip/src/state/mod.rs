pub mod payment;
pub mod user_stats;
pub mod vault_state;

pub use payment::*;
pub use user_stats::*;
pub use vault_state::*;
