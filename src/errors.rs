use anchor_lang::prelude::*;

#[error_code]
pub enum StableFunError {
    #[msg("Invalid seed for address derivation")]
    InvalidSeed,
    #[msg("Mint already initialized")]
    AlreadyInitialized,
    #[msg("Mint not initialized")]
    MintNotInitialized,
    #[msg("Price feed unavailable")]
    FeedUnavailable,
    #[msg("Price feed stale")]
    FeedStale,
    #[msg("Supply Overflow")]
    SupplyOverflow,
    #[msg("Insufficient balance to redeem")]
    InsufficientBalance,
    #[msg("Invalid Amount")]
    InvalidAmount,
    #[msg("Invalid Decimals")]
    InvalidDecimals,
    #[msg("Metadata field too long")]
    MetadataFieldTooLong,
    #[msg("Metadata account does not match the derived address")]
    InvalidMetadataAccount,
    #[msg("Holder account does not belong to the owner")]
    InvalidHolderAccount,
    #[msg("Minting Paused")]
    MintingPaused,
    #[msg("Redemption Paused")]
    RedemptionPaused,
    #[msg("Invalid feed max age provided")]
    InvalidFeedMaxAge,
    #[msg("Invalid feed program provided")]
    InvalidFeedProgram,
    #[msg("Invalid authority provided")]
    InvalidAuthority,
    #[msg("Only the authority can perform this action")]
    Unauthorized,
    #[msg("Math Overflow")]
    MathOverflow,
}
