pub mod admin_operations;
pub mod initialize_mint;
pub mod mint_tokens;
pub mod redeem_stablecoin;
pub mod supply_manager;

pub use admin_operations::*;
pub use initialize_mint::*;
pub use mint_tokens::*;
pub use redeem_stablecoin::*;
pub use supply_manager::*;
