use anchor_lang::prelude::*;
use anchor_spl::metadata::mpl_token_metadata;

/// 24 * 60 * 60 - Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86400; // 24 * 60 * 60

// PDA SEEDS

/// Seed for the singleton mint PDA, which is also its own mint authority
pub const MINT_SEED: &[u8] = b"mint";
/// Seed for the Metaplex metadata PDA (derived under the metadata program)
pub const METADATA_SEED: &[u8] = b"metadata";
/// Seed for the StableMint state PDA
pub const STABLE_MINT_SEED: &[u8] = b"stable_mint";

/// Pyth receiver program, owner of every `PriceUpdateV2` account
pub const PYTH_RECEIVER_PROGRAM_ID: Pubkey =
    pubkey!("rec5EKMGg6MxZYaMdyBfgwp4d5rB9T1VQH5pJv5LtFJ");

/// Feed max age applied until the authority configures one
pub const DEFAULT_FEED_MAX_AGE: u64 = 60;
pub const MAX_AGE_UPPER_BOUND: u64 = SECONDS_PER_DAY as u64;

/// All-zero feed id means any feed published by the feed program is accepted
pub const UNPINNED_FEED_ID: [u8; 32] = [0u8; 32];

// METADATA LIMITS

/// The maximum length for a token name
pub const NAME_MAX_LENGTH: usize = mpl_token_metadata::MAX_NAME_LENGTH;
/// The maximum length for a token symbol
pub const SYMBOL_MAX_LENGTH: usize = mpl_token_metadata::MAX_SYMBOL_LENGTH;
/// The maximum length for a metadata URI
pub const URI_MAX_LENGTH: usize = mpl_token_metadata::MAX_URI_LENGTH;
/// The maximum length for the target currency tag, e.g. "USD"
pub const TARGET_CURRENCY_MAX_LENGTH: usize = 8;

/// Largest precision for which 10^decimals still fits in a u64
pub const MAX_DECIMALS: u8 = 19;
