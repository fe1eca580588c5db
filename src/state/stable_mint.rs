use anchor_lang::prelude::*;

use crate::{
    constants::{
        DEFAULT_FEED_MAX_AGE, MAX_AGE_UPPER_BOUND, MAX_DECIMALS, NAME_MAX_LENGTH,
        PYTH_RECEIVER_PROGRAM_ID, SYMBOL_MAX_LENGTH, TARGET_CURRENCY_MAX_LENGTH,
        UNPINNED_FEED_ID, URI_MAX_LENGTH,
    },
    errors::StableFunError,
    utils::{decimals_factor, FeedConfig},
};

/// Parameters supplied when creating the stablecoin
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitTokenParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub decimals: u8,
    pub target_currency: String,
}

impl InitTokenParams {
    /// Validate metadata lengths and decimal precision
    pub fn validate(&self) -> Result<()> {
        require!(
            self.name.len() <= NAME_MAX_LENGTH
                && self.symbol.len() <= SYMBOL_MAX_LENGTH
                && self.uri.len() <= URI_MAX_LENGTH
                && self.target_currency.len() <= TARGET_CURRENCY_MAX_LENGTH,
            StableFunError::MetadataFieldTooLong
        );

        require_gte!(MAX_DECIMALS, self.decimals, StableFunError::InvalidDecimals);
        decimals_factor(self.decimals)?;

        Ok(())
    }
}

/// StableMint state account - companion record of the singleton mint
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct StableMint {
    // The payer of the initialization, allowed to run admin operations
    pub authority: Pubkey,

    // The mint address
    pub mint: Pubkey,

    // The metadata record address
    pub metadata: Pubkey,

    // Decimal precision of the mint, fixed at creation
    pub decimals: u8,

    // The currency the token is pegged to, e.g. "USD"
    #[max_len(TARGET_CURRENCY_MAX_LENGTH)]
    pub target_currency: String,

    // Sum of all holder balances
    pub total_supply: u64,

    // The program that owns accepted feed accounts
    pub feed_program: Pubkey,

    // Pinned feed id, all zeroes accepts any feed owned by `feed_program`
    pub feed_id: [u8; 32],

    // The length of time (in seconds) that a feed observation is considered valid
    pub feed_max_age: u64,

    // Whether minting is paused
    pub minting_paused: bool,

    // Whether redemption is paused
    pub redemption_paused: bool,

    // Set once by `initialize`
    pub initialized: bool,

    // The bump of the mint PDA, which signs as mint authority
    pub mint_bump: u8,

    // The bump used to derive the PDA for this account
    // Stored so we don't need to recalculate it later
    pub bump: u8,
}

impl StableMint {
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Record a freshly created mint
    /// # Arguments
    /// * `authority` - The payer of the initialization
    /// * `mint` - The mint address
    /// * `metadata` - The metadata record address
    /// * `params` - The validated creation parameters
    /// * `mint_bump` - The bump of the mint PDA
    /// * `bump` - The bump of this account
    /// # Returns
    /// * `Result<()>` - `AlreadyInitialized` if the record was initialized before, leaving it untouched
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        mint: Pubkey,
        metadata: Pubkey,
        params: &InitTokenParams,
        mint_bump: u8,
        bump: u8,
    ) -> Result<()> {
        require!(!self.initialized, StableFunError::AlreadyInitialized);
        params.validate()?;

        *self = StableMint {
            authority,
            mint,
            metadata,
            decimals: params.decimals,
            target_currency: params.target_currency.clone(),
            total_supply: 0,
            feed_program: PYTH_RECEIVER_PROGRAM_ID,
            feed_id: UNPINNED_FEED_ID,
            feed_max_age: DEFAULT_FEED_MAX_AGE,
            minting_paused: false,
            redemption_paused: false,
            initialized: true,
            mint_bump,
            bump,
        };

        Ok(())
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            feed_program: self.feed_program,
            feed_id: self.feed_id,
            feed_max_age: self.feed_max_age,
        }
    }

    /// Total supply after minting `amount`, without applying it
    pub fn supply_after_mint(&self, amount: u64) -> Result<u64> {
        self.total_supply
            .checked_add(amount)
            .ok_or(StableFunError::SupplyOverflow.into())
    }

    /// Total supply after redeeming `amount`, without applying it
    pub fn supply_after_redeem(&self, amount: u64) -> Result<u64> {
        self.total_supply
            .checked_sub(amount)
            .ok_or(StableFunError::InsufficientBalance.into())
    }

    /// Align the recorded supply with the mint's supply on the ledger
    /// Holders may burn through the token program directly, which lowers the ledger supply
    /// # Returns
    /// * `u64` - The amount the recorded supply drifted by
    pub fn reconcile_supply(&mut self, ledger_supply: u64) -> u64 {
        let drift = self.total_supply.abs_diff(ledger_supply);
        if drift > 0 {
            msg!(
                "Reconciling supply: recorded {}, ledger {}",
                self.total_supply,
                ledger_supply
            );
            self.total_supply = ledger_supply;
        }
        drift
    }

    /// Replace the feed configuration
    pub fn set_feed_config(
        &mut self,
        feed_program: Pubkey,
        feed_id: [u8; 32],
        feed_max_age: u64,
    ) -> Result<()> {
        require_gt!(feed_max_age, 0, StableFunError::InvalidFeedMaxAge);
        require_gte!(
            MAX_AGE_UPPER_BOUND,
            feed_max_age,
            StableFunError::InvalidFeedMaxAge
        );
        require!(
            feed_program != Pubkey::default(),
            StableFunError::InvalidFeedProgram
        );

        self.feed_program = feed_program;
        self.feed_id = feed_id;
        self.feed_max_age = feed_max_age;

        Ok(())
    }

    pub fn set_paused(&mut self, minting_paused: bool, redemption_paused: bool) {
        self.minting_paused = minting_paused;
        self.redemption_paused = redemption_paused;
    }

    pub fn transfer_authority(&mut self, new_authority: Pubkey) -> Result<()> {
        require!(
            new_authority != Pubkey::default(),
            StableFunError::InvalidAuthority
        );
        self.authority = new_authority;

        Ok(())
    }
}
