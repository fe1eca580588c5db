use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::{PriceUpdateV2, VerificationLevel};
use solana_sdk_ids::system_program;

use crate::{constants::UNPINNED_FEED_ID, errors::StableFunError, utils::normalize_decimals};

/// Feed settings a price observation is validated against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    // Program that must own the feed account
    pub feed_program: Pubkey,

    // Pinned feed id, all zeroes accepts any feed
    pub feed_id: [u8; 32],

    // Maximum age in seconds of an accepted observation
    pub feed_max_age: u64,
}

/// Borrowed view of a feed account, decoupled from `AccountInfo` so it can be built in tests
pub struct FeedAccountView<'a> {
    pub owner: Pubkey,
    pub data: &'a [u8],
}

/// A validated price observation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub price: i64,
    pub conf: u64,
    pub exponent: i32,
    pub publish_time: i64,
    pub feed_id: [u8; 32],
}

impl Observation {
    /// The observed price expressed with `decimals` decimal places, rounded down
    /// Saturates at `u64::MAX` when scaling up overflows and at 0 when scaling down underflows
    pub fn normalized_price(&self, decimals: u8) -> u64 {
        let Some(from_decimals) = self
            .exponent
            .checked_neg()
            .and_then(|e| u8::try_from(e).ok())
        else {
            return 0;
        };

        // Positive as enforced by `read_feed`
        normalize_decimals(self.price as u64, from_decimals, decimals, false).unwrap_or(
            if decimals > from_decimals {
                u64::MAX
            } else {
                0
            },
        )
    }
}

/// Read and validate a price observation from a feed account
/// # Arguments
/// * `feed` - The feed account to read
/// * `config` - The feed program, pinned feed id and max age to validate against
/// * `now` - The current unix timestamp
/// # Returns
/// * `Result<Observation>` - The observation, `FeedUnavailable` if the account is absent
///   or malformed, `FeedStale` if it is older than `config.feed_max_age`
pub fn read_feed(feed: &FeedAccountView, config: &FeedConfig, now: i64) -> Result<Observation> {
    // An account nobody created is owned by the system program and holds no data
    require!(
        !feed.data.is_empty() && feed.owner != system_program::ID,
        StableFunError::FeedUnavailable
    );

    require_keys_eq!(
        feed.owner,
        config.feed_program,
        StableFunError::FeedUnavailable
    );

    require_eq!(
        feed.data.len(),
        PriceUpdateV2::LEN,
        StableFunError::FeedUnavailable
    );

    let price_update = PriceUpdateV2::try_deserialize(&mut &feed.data[..])
        .map_err(|_| StableFunError::FeedUnavailable)?;

    require!(
        matches!(price_update.verification_level, VerificationLevel::Full),
        StableFunError::FeedUnavailable
    );

    let message = price_update.price_message;

    require!(
        config.feed_id == UNPINNED_FEED_ID || message.feed_id == config.feed_id,
        StableFunError::FeedUnavailable
    );

    require_gt!(message.price, 0, StableFunError::FeedUnavailable);

    // Pyth prices carry a non-positive exponent
    require_gte!(0, message.exponent, StableFunError::FeedUnavailable);

    let max_age = i64::try_from(config.feed_max_age).map_err(|_| StableFunError::FeedStale)?;
    require_gte!(
        max_age,
        now.saturating_sub(message.publish_time),
        StableFunError::FeedStale
    );

    Ok(Observation {
        price: message.price,
        conf: message.conf,
        exponent: message.exponent,
        publish_time: message.publish_time,
        feed_id: message.feed_id,
    })
}
