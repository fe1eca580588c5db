pub mod accounts;
pub mod address;
pub mod decimals;
pub mod feed;

pub use accounts::*;
pub use address::*;
pub use decimals::*;
pub use feed::*;
