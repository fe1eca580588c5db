use anchor_lang::{
    prelude::*,
    solana_program::{
        program::{invoke, invoke_signed},
        system_instruction,
    },
};
use anchor_spl::{metadata::Metadata, token_interface::TokenInterface};
use spl_token_2022::{extension::ExtensionType, instruction::initialize_mint2, pod::PodMint};

use crate::{
    constants::{MINT_SEED, STABLE_MINT_SEED},
    errors::StableFunError,
    events::StableMintInitialized,
    ledger::{MetadataFields, MetadataRegistry, MetaplexRegistry},
    state::{InitTokenParams, StableMint},
    utils::{metadata_address, mint_address},
};

/// Addresses of a created stablecoin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintHandle {
    pub mint: Pubkey,
    pub metadata: Pubkey,
}

/// Record the stablecoin and attach its metadata record
/// # Arguments
/// * `state` - The StableMint record, must not be initialized
/// * `registry` - The store the metadata record is created in
/// * `program_id` - The program the mint address is derived under
/// * `authority` - The payer, recorded as authority for admin operations
/// * `params` - The metadata, decimals and target currency
/// * `bump` - The bump of the StableMint record
/// # Returns
/// * `Result<MintHandle>` - `AlreadyInitialized` on re-invocation, with nothing changed
pub fn initialize_stable_mint<R: MetadataRegistry>(
    state: &mut StableMint,
    registry: &mut R,
    program_id: &Pubkey,
    authority: Pubkey,
    params: &InitTokenParams,
    bump: u8,
) -> Result<MintHandle> {
    require!(!state.is_initialized(), StableFunError::AlreadyInitialized);
    params.validate()?;

    let (mint, mint_bump) = mint_address(program_id)?;
    let (metadata, _) = metadata_address(&mint)?;

    registry.create_record(
        &metadata,
        &MetadataFields {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            uri: params.uri.clone(),
        },
    )?;

    state.initialize(authority, mint, metadata, params, mint_bump, bump)?;

    Ok(MintHandle { mint, metadata })
}

/// Fail with `AlreadyInitialized` if the mint account holds data or the record is initialized
pub fn ensure_uninitialized(mint: &AccountInfo, state: &StableMint) -> Result<()> {
    require!(
        mint.data_is_empty() && !state.is_initialized(),
        StableFunError::AlreadyInitialized
    );
    Ok(())
}

/// Create the singleton mint, its StableMint record and metadata record
/// The payer funds every account and becomes the authority
#[derive(Accounts)]
pub struct InitializeMint<'info> {
    /// Pays for account creation
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The singleton mint, also its own mint authority
    /// # PDA Seeds
    /// - MINT_SEED
    ///
    /// CHECK: Created and initialized by the handler, which fails if it already holds data
    #[account(
        mut,
        seeds = [MINT_SEED],
        bump,
    )]
    pub mint: UncheckedAccount<'info>,

    /// The StableMint record
    /// # PDA Seeds
    /// - STABLE_MINT_SEED
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + StableMint::INIT_SPACE,
        seeds = [STABLE_MINT_SEED],
        bump,
    )]
    pub stable_mint: Account<'info, StableMint>,

    /// CHECK: Checked against the derived metadata address and created by the metadata program
    #[account(mut)]
    pub metadata: UncheckedAccount<'info>,

    pub token_metadata_program: Program<'info, Metadata>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,

    pub rent: Sysvar<'info, Rent>,
}

impl<'info> InitializeMint<'info> {
    /// Initialize the stablecoin
    /// # Arguments
    /// * `params` - The token name, symbol, uri, decimals and target currency
    /// * `bumps` - The PDA bumps for account derivation
    /// # Returns
    /// * `Result<()>` - Ok if the mint and metadata are created, `AlreadyInitialized` if they exist
    pub fn initialize_mint(
        &mut self,
        params: InitTokenParams,
        bumps: &InitializeMintBumps,
    ) -> Result<()> {
        // Idempotency guard, nothing has been written yet
        ensure_uninitialized(&self.mint, &self.stable_mint)?;
        params.validate()?;

        self.create_mint_account(params.decimals, bumps.mint)?;

        let mint_info = self.mint.to_account_info();
        let metadata_program = self.token_metadata_program.to_account_info();
        let metadata = self.metadata.to_account_info();
        let payer = self.payer.to_account_info();
        let system_program = self.system_program.to_account_info();
        let rent = self.rent.to_account_info();

        let mut registry = MetaplexRegistry {
            metadata_program: &metadata_program,
            metadata: &metadata,
            mint: &mint_info,
            payer: &payer,
            system_program: &system_program,
            rent: &rent,
            mint_bump: bumps.mint,
        };

        let handle = initialize_stable_mint(
            &mut self.stable_mint,
            &mut registry,
            &crate::ID,
            self.payer.key(),
            &params,
            bumps.stable_mint,
        )?;

        msg!(
            "Initialized {} ({}) with {} decimals",
            handle.mint,
            params.target_currency,
            params.decimals
        );

        emit!(StableMintInitialized {
            mint: handle.mint,
            metadata: handle.metadata,
            authority: self.payer.key(),
            decimals: params.decimals,
            target_currency: params.target_currency,
            name: params.name,
            symbol: params.symbol,
        });

        Ok(())
    }

    /// Allocate the mint PDA, fund it and hand it to the token program
    fn create_mint_account(&self, decimals: u8, mint_bump: u8) -> Result<()> {
        let seeds = &[MINT_SEED, &[mint_bump]];
        let signer_seeds = &[&seeds[..]];

        let space = ExtensionType::try_calculate_account_len::<PodMint>(&[])?;
        let rent = Rent::get()?;

        // Allocate space
        invoke_signed(
            &system_instruction::allocate(&self.mint.key(), space as u64),
            &[
                self.mint.to_account_info(),
                self.system_program.to_account_info(),
            ],
            signer_seeds,
        )?;

        // Transfer minimum balance, the address may have been pre-funded
        invoke(
            &system_instruction::transfer(
                &self.payer.key(),
                &self.mint.key(),
                rent.minimum_balance(space)
                    .saturating_sub(self.mint.lamports()),
            ),
            &[
                self.payer.to_account_info(),
                self.mint.to_account_info(),
                self.system_program.to_account_info(),
            ],
        )?;

        // Assign the mint account to the token program
        invoke_signed(
            &system_instruction::assign(&self.mint.key(), &self.token_program.key()),
            &[
                self.mint.to_account_info(),
                self.system_program.to_account_info(),
            ],
            signer_seeds,
        )?;

        // The mint PDA is its own mint authority, no freeze authority
        let init_mint_ix = initialize_mint2(
            &self.token_program.key(),
            &self.mint.key(),
            &self.mint.key(),
            None,
            decimals,
        )?;
        invoke(&init_mint_ix, &[self.mint.to_account_info()])?;

        Ok(())
    }
}
