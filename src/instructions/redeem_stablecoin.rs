use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenInterface;

use crate::{
    constants::{MINT_SEED, STABLE_MINT_SEED},
    events::TokensRedeemed,
    instructions::supply_manager::redeem_with_feed,
    ledger::TokenLedger,
    utils::{load_mint, load_stable_mint, store_stable_mint, FeedAccountView},
};

/// Redeem (burn) stablecoins held by the signer, gated by the price feed
#[derive(Accounts)]
pub struct RedeemStablecoin<'info> {
    /// The holder redeeming tokens, signs the burn
    pub authority: Signer<'info>,

    /// The holder's token account
    ///
    /// CHECK: Its token program, mint and owner are checked when the balance is read
    #[account(mut)]
    pub user_token_account: UncheckedAccount<'info>,

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
}

impl<'info> RedeemStablecoin<'info> {
    /// Redeem `amount` base units from the signer's token account
    /// # Arguments
    /// * `amount` - The amount to redeem, already scaled by the mint's decimals
    /// # Returns
    /// * `Result<()>` - Ok if the tokens are burned, `InsufficientBalance` if the holder has less
    pub fn redeem_stablecoin(&mut self, amount: u64) -> Result<()> {
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
        let holder = self.user_token_account.to_account_info();
        let owner = self.authority.to_account_info();
        let token_program = self.token_program.to_account_info();

        let mut ledger = TokenLedger {
            mint: &mint,
            holder: &holder,
            owner: &owner,
            token_program: &token_program,
            decimals: mint_state.decimals,
            mint_bump: stable_mint.mint_bump,
            funding: None,
        };

        let receipt = redeem_with_feed(
            &mut stable_mint,
            &mut ledger,
            &feed,
            now,
            &owner.key(),
            amount,
        )?;

        store_stable_mint(&stable_mint, &self.stable_mint)?;

        emit!(TokensRedeemed {
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
