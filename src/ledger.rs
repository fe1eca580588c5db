use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::{self, get_associated_token_address_with_program_id, Create},
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2, CreateMetadataAccountsV3,
    },
    token_interface::{burn_checked, mint_to, BurnChecked, MintTo, TokenAccount},
};

use crate::{constants::MINT_SEED, errors::StableFunError};

/// A change applied to a holder balance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceDelta {
    Credit(u64),
    Debit(u64),
}

/// The account-balance store the mint and redeem transitions are applied to
pub trait BalanceLedger {
    /// The balance held by `owner` for `mint`, or `None` if the holder account does not exist
    fn get_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Option<u64>>;

    /// Create an empty holder account for (`owner`, `mint`)
    fn create_holder(&mut self, owner: &Pubkey, mint: &Pubkey) -> Result<()>;

    fn adjust_balance(&mut self, owner: &Pubkey, mint: &Pubkey, delta: BalanceDelta)
        -> Result<()>;
}

/// Display fields of a metadata record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataFields {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Store of metadata records attached to a mint
pub trait MetadataRegistry {
    fn create_record(&mut self, address: &Pubkey, fields: &MetadataFields) -> Result<()>;
}

/// Accounts paying for a lazily created holder account
pub struct HolderFunding<'a, 'info> {
    pub payer: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub associated_token_program: &'a AccountInfo<'info>,
}

/// `BalanceLedger` backed by the SPL token program through CPI
/// The mint PDA signs as mint authority, the holder's owner signs burns
pub struct TokenLedger<'a, 'info> {
    pub mint: &'a AccountInfo<'info>,
    pub holder: &'a AccountInfo<'info>,
    pub owner: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub decimals: u8,
    pub mint_bump: u8,
    pub funding: Option<HolderFunding<'a, 'info>>,
}

impl<'a, 'info> TokenLedger<'a, 'info> {
    fn check_holder(&self, owner: &Pubkey, mint: &Pubkey) -> Result<()> {
        require_keys_eq!(
            *owner,
            self.owner.key(),
            StableFunError::InvalidHolderAccount
        );
        require_keys_eq!(*mint, self.mint.key(), StableFunError::InvalidHolderAccount);
        Ok(())
    }
}

impl<'a, 'info> BalanceLedger for TokenLedger<'a, 'info> {
    fn get_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Option<u64>> {
        self.check_holder(owner, mint)?;

        if self.holder.data_is_empty() {
            return Ok(None);
        }

        require_keys_eq!(
            *self.holder.owner,
            self.token_program.key(),
            StableFunError::InvalidHolderAccount
        );

        let data = self.holder.try_borrow_data()?;
        let account = TokenAccount::try_deserialize(&mut &data[..])?;

        require_keys_eq!(account.owner, *owner, StableFunError::InvalidHolderAccount);
        require_keys_eq!(account.mint, *mint, StableFunError::InvalidHolderAccount);

        Ok(Some(account.amount))
    }

    fn create_holder(&mut self, owner: &Pubkey, mint: &Pubkey) -> Result<()> {
        self.check_holder(owner, mint)?;

        let funding = self
            .funding
            .as_ref()
            .ok_or(StableFunError::InvalidHolderAccount)?;

        // Only the associated token account can be created on the owner's behalf
        require_keys_eq!(
            self.holder.key(),
            get_associated_token_address_with_program_id(owner, mint, self.token_program.key),
            StableFunError::InvalidHolderAccount
        );

        associated_token::create(CpiContext::new(
            funding.associated_token_program.clone(),
            Create {
                payer: funding.payer.clone(),
                associated_token: self.holder.clone(),
                authority: self.owner.clone(),
                mint: self.mint.clone(),
                system_program: funding.system_program.clone(),
                token_program: self.token_program.clone(),
            },
        ))
    }

    fn adjust_balance(
        &mut self,
        owner: &Pubkey,
        mint: &Pubkey,
        delta: BalanceDelta,
    ) -> Result<()> {
        self.check_holder(owner, mint)?;

        match delta {
            BalanceDelta::Credit(amount) => mint_to(
                CpiContext::new_with_signer(
                    self.token_program.clone(),
                    MintTo {
                        mint: self.mint.clone(),
                        to: self.holder.clone(),
                        authority: self.mint.clone(),
                    },
                    &[&[MINT_SEED, &[self.mint_bump]]],
                ),
                amount,
            ),
            BalanceDelta::Debit(amount) => burn_checked(
                CpiContext::new(
                    self.token_program.clone(),
                    BurnChecked {
                        mint: self.mint.clone(),
                        from: self.holder.clone(),
                        authority: self.owner.clone(),
                    },
                ),
                amount,
                self.decimals,
            ),
        }
    }
}

/// `MetadataRegistry` backed by the Metaplex token metadata program
/// Records are created immutable with the mint PDA as update authority
pub struct MetaplexRegistry<'a, 'info> {
    pub metadata_program: &'a AccountInfo<'info>,
    pub metadata: &'a AccountInfo<'info>,
    pub mint: &'a AccountInfo<'info>,
    pub payer: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub rent: &'a AccountInfo<'info>,
    pub mint_bump: u8,
}

impl<'a, 'info> MetadataRegistry for MetaplexRegistry<'a, 'info> {
    fn create_record(&mut self, address: &Pubkey, fields: &MetadataFields) -> Result<()> {
        require_keys_eq!(
            *address,
            self.metadata.key(),
            StableFunError::InvalidMetadataAccount
        );
        require!(
            self.metadata.data_is_empty(),
            StableFunError::AlreadyInitialized
        );

        create_metadata_accounts_v3(
            CpiContext::new_with_signer(
                self.metadata_program.clone(),
                CreateMetadataAccountsV3 {
                    metadata: self.metadata.clone(),
                    mint: self.mint.clone(),
                    mint_authority: self.mint.clone(),
                    payer: self.payer.clone(),
                    update_authority: self.mint.clone(),
                    system_program: self.system_program.clone(),
                    rent: self.rent.clone(),
                },
                &[&[MINT_SEED, &[self.mint_bump]]],
            ),
            DataV2 {
                name: fields.name.clone(),
                symbol: fields.symbol.clone(),
                uri: fields.uri.clone(),
                seller_fee_basis_points: 0,
                creators: None,
                collection: None,
                uses: None,
            },
            false, // is_mutable
            true,  // update_authority_is_signer
            None,
        )
    }
}
