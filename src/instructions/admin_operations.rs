use anchor_lang::prelude::*;

use crate::{
    constants::STABLE_MINT_SEED,
    errors::StableFunError,
    events::{AuthorityTransferred, FeedConfigUpdated, PauseStateUpdated},
    state::StableMint,
};

/// Admin operations on the StableMint record
/// Requires the signer to be the recorded authority
#[derive(Accounts)]
pub struct StableMintAdmin<'info> {
    /// The account with the authority to execute the operation
    pub authority: Signer<'info>,

    /// The StableMint record to be modified
    /// # PDA Seeds
    /// - STABLE_MINT_SEED
    #[account(
        mut,
        seeds = [STABLE_MINT_SEED],
        bump = stable_mint.bump,
        has_one = authority @ StableFunError::Unauthorized,
    )]
    pub stable_mint: Account<'info, StableMint>,
}

impl<'info> StableMintAdmin<'info> {
    /// Set the feed program, pinned feed id and maximum feed age
    /// # Arguments
    /// * `feed_program` - The program owning accepted feed accounts (cannot be default/zero pubkey)
    /// * `feed_id` - The feed id to pin, all zeroes accepts any feed
    /// * `feed_max_age` - The maximum age in seconds (must be > 0 and <= MAX_AGE_UPPER_BOUND)
    /// # Returns
    /// * `Result<()>` - Ok if the configuration is updated, Err otherwise
    pub fn update_feed_config(
        &mut self,
        feed_program: Pubkey,
        feed_id: [u8; 32],
        feed_max_age: u64,
    ) -> Result<()> {
        self.stable_mint
            .set_feed_config(feed_program, feed_id, feed_max_age)?;

        emit!(FeedConfigUpdated {
            feed_program,
            feed_id,
            feed_max_age,
        });

        Ok(())
    }

    /// Pause or unpause minting and redemption
    pub fn set_paused(&mut self, minting_paused: bool, redemption_paused: bool) -> Result<()> {
        self.stable_mint
            .set_paused(minting_paused, redemption_paused);

        emit!(PauseStateUpdated {
            minting_paused,
            redemption_paused,
        });

        Ok(())
    }

    /// Hand the authority over to `new_authority`
    pub fn transfer_authority(&mut self, new_authority: Pubkey) -> Result<()> {
        let previous_authority = self.stable_mint.authority;
        self.stable_mint.transfer_authority(new_authority)?;

        emit!(AuthorityTransferred {
            previous_authority,
            new_authority,
        });

        Ok(())
    }
}
