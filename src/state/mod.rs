pub mod stable_mint;

pub use stable_mint::*;
