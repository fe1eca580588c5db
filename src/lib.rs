#![allow(unexpected_cfgs)]
#![allow(deprecated)]

use anchor_lang::prelude::*;
mod constants;
mod errors;
mod events;
mod instructions;
mod ledger;
pub mod security;
mod state;
mod utils;

use instructions::*;
use state::InitTokenParams;

#[cfg(feature = "devnet")]
declare_id!("7k6wDnWGsvwv1fJGSBoTBtY3fH1SdBwfwaHtQ3kEQwPT");
#[cfg(feature = "mainnet")]
declare_id!("5kBMpLkzWyAZVkqGVRSCrRaZq5TLv9FY4nDWbYcKYnKR");
#[cfg(not(any(feature = "mainnet", feature = "devnet")))]
declare_id!("coUnmi3oBUtwtd9fjeAvSsJssXh5A5xyPbhpewyzRVF");

#[program]
pub mod stable_fun {
    use super::*;

    /// Create the stablecoin mint and its metadata record
    ///
    /// The mint address is derived from a fixed seed, so this succeeds at most once
    /// per deployment. The payer funds every account and becomes the authority.
    pub fn initialize_mint(ctx: Context<InitializeMint>, params: InitTokenParams) -> Result<()> {
        ctx.accounts.initialize_mint(params, &ctx.bumps)
    }

    /// Mint `amount` base units to a destination owner
    /// Requires a fresh, fully verified price from the configured feed
    pub fn mint_tokens(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        ctx.accounts.mint_tokens(amount)
    }

    /// Burn `amount` base units from the signer's token account
    /// Requires a fresh, fully verified price from the configured feed
    pub fn redeem_stablecoin(ctx: Context<RedeemStablecoin>, amount: u64) -> Result<()> {
        ctx.accounts.redeem_stablecoin(amount)
    }

    /// Set the feed program, pinned feed id and maximum feed age
    /// Signer must be the authority
    pub fn update_feed_config(
        ctx: Context<StableMintAdmin>,
        feed_program: Pubkey,
        feed_id: [u8; 32],
        feed_max_age: u64,
    ) -> Result<()> {
        ctx.accounts
            .update_feed_config(feed_program, feed_id, feed_max_age)
    }

    /// Pause or unpause minting and redemption
    /// Signer must be the authority
    pub fn set_paused(
        ctx: Context<StableMintAdmin>,
        minting_paused: bool,
        redemption_paused: bool,
    ) -> Result<()> {
        ctx.accounts.set_paused(minting_paused, redemption_paused)
    }

    /// Transfer the authority
    /// Signer must be the current authority
    pub fn transfer_authority(ctx: Context<StableMintAdmin>, new_authority: Pubkey) -> Result<()> {
        ctx.accounts.transfer_authority(new_authority)
    }
}
