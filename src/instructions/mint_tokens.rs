use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::{get_associated_token_address_with_program_id, AssociatedToken},
    token_interface::TokenInterface,
};

use crate::{
    constants::{MINT_SEED, STABLE_MINT_SEED},
    events::TokensMinted,
    instructions::supply_manager::mint_with_feed,
    ledger::{HolderFunding, TokenLedger},
    utils::{load_mint, load_stable_mint, store_stable_mint, FeedAccountView},
};

/// Mint stablecoins to a destination owner, gated by the price feed
/// The destination's associated token account is created when missing, funded by the payer
#[derive(Accounts)]
pub struct MintTokens<'info> {
    /// Pays for the holder account when it has to be created
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Any wallet may receive tokens
    pub destination_owner: UncheckedAccount<'info>,

    /// The destination owner's associated token account
    ///
    /// CHECK: Address is constrained here, the account is created by the handler when empty
    #[account(
        mut,
        address = get_associated_token_address_with_program_id(
            &destination_owner.key(),
            &mint.key(),
            &token_program.key(),
        ),
    )]
    pub destination: UncheckedAccount<'info>,

    /// The stablecoin mint
    /// # PDA Seeds
    /// - MINT_SEED
    ///
    /// CHECK: Loaded by the handler, which fails with `MintNotInitialized` before `initialize_mint`
    #[account(
        mut,
        seeds = [MINT_SEED],
        bump,
    )]
    pub mint: UncheckedAccount<'info>,

    /// The StableMint record
    /// # PDA Seeds
    /// - STABLE_MINT_SEED
    ///
    /// CHECK: Loaded and stored by the handler, which fails with `MintNotInitialized` before `initialize_mint`
    #[account(
        mut,
        seeds = [STABLE_MINT_SEED],
        bump,
    )]
    pub stable_mint: UncheckedAccount<'info>,

    /// CHECK: Owner, layout, verification and freshness are validated when read
    pub feed: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

impl<'info> MintTokens<'info> {
    /// Mint `amount` base units to the destination owner
    /// # Arguments
    /// * `amount` - The amount to mint, already scaled by the mint's decimals
    /// # Returns
    /// * `Result<()>` - Ok if the tokens are minted, Err otherwise
    pub fn mint_tokens(&mut self, amount: u64) -> Result<()> {
        let mut stable_mint = load_stable_mint(&self.stable_mint)?;
        let mint_state = load_mint(&self.mint, &self.token_program.key())?;
        stable_mint.reconcile_supply(mint_state.supply);

        let now = Clock::get()?.unix_timestamp;

        let feed_info = self.feed.to_account_info();
        let feed_data = feed_info.try_borrow_data()?;
        let feed = FeedAccountView {
            owner: *feed_info.owner,
            data: &feed_data,
        };

        let mint = self.mint.to_account_info();
        let holder = self.destination.to_account_info();
        let owner = self.destination_owner.to_account_info();
        let token_program = self.token_program.to_account_info();
        let payer = self.payer.to_account_info();
        let system_program = self.system_program.to_account_info();
        let associated_token_program = self.associated_token_program.to_account_info();

        let mut ledger = TokenLedger {
            mint: &mint,
            holder: &holder,
            owner: &owner,
            token_program: &token_program,
            decimals: mint_state.decimals,
            mint_bump: stable_mint.mint_bump,
            funding: Some(HolderFunding {
                payer: &payer,
                system_program: &system_program,
                associated_token_program: &associated_token_program,
            }),
        };

        let receipt = mint_with_feed(
            &mut stable_mint,
            &mut ledger,
            &feed,
            now,
            &owner.key(),
            amount,
        )?;

        store_stable_mint(&stable_mint, &self.stable_mint)?;

        emit!(TokensMinted {
            owner: receipt.owner,
            amount: receipt.amount,
            balance: receipt.balance,
            total_supply: receipt.total_supply,
            price: receipt.price,
            exponent: receipt.exponent,
            publish_time: receipt.publish_time,
            normalized_price: receipt.normalized_price,
        });

        Ok(())
    }
}
