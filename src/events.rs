use anchor_lang::prelude::*;

/// Event emitted when the stablecoin is created
/// Fields:
/// - mint: The mint address
/// - metadata: The metadata record address
/// - authority: The payer, authority for admin operations
/// - decimals: The decimal precision of the mint
/// - target_currency: The currency the token is pegged to
/// - name: The token name
/// - symbol: The token symbol
#[event]
pub struct StableMintInitialized {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub authority: Pubkey,
    pub decimals: u8,
    pub target_currency: String,
    pub name: String,
    pub symbol: String,
}

/// Event emitted when tokens are minted to a holder
/// Fields:
/// - owner: The destination owner
/// - amount: The amount minted in base units
/// - balance: The holder balance after minting
/// - total_supply: The total supply after minting
/// - price: The observed feed price
/// - exponent: The exponent of the observed price
/// - publish_time: When the observed price was published
/// - normalized_price: The observed price expressed with the mint's decimals
#[event]
pub struct TokensMinted {
    pub owner: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub total_supply: u64,
    pub price: i64,
    pub exponent: i32,
    pub publish_time: i64,
    pub normalized_price: u64,
}

/// Event emitted when tokens are redeemed by a holder
/// Fields:
/// - owner: The redeeming holder
/// - amount: The amount redeemed in base units
/// - balance: The holder balance after redemption
/// - total_supply: The total supply after redemption
/// - price: The observed feed price
/// - exponent: The exponent of the observed price
/// - publish_time: When the observed price was published
/// - normalized_price: The observed price expressed with the mint's decimals
#[event]
pub struct TokensRedeemed {
    pub owner: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub total_supply: u64,
    pub price: i64,
    pub exponent: i32,
    pub publish_time: i64,
    pub normalized_price: u64,
}

#[event]
pub struct FeedConfigUpdated {
    pub feed_program: Pubkey,
    pub feed_id: [u8; 32],
    pub feed_max_age: u64,
}

#[event]
pub struct PauseStateUpdated {
    pub minting_paused: bool,
    pub redemption_paused: bool,
}

#[event]
pub struct AuthorityTransferred {
    pub previous_authority: Pubkey,
    pub new_authority: Pubkey,
}
