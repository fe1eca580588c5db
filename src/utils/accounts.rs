use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::{errors::StableFunError, state::StableMint};

/// Load the StableMint record from an unchecked account
/// # Arguments
/// * `info` - The StableMint PDA
/// # Returns
/// * `Result<StableMint>` - The record, `MintNotInitialized` if it was never created
pub fn load_stable_mint(info: &AccountInfo) -> Result<StableMint> {
    require!(
        !info.data_is_empty() && *info.owner == crate::ID,
        StableFunError::MintNotInitialized
    );

    let data = info.try_borrow_data()?;
    StableMint::try_deserialize(&mut &data[..])
}

/// Write the StableMint record back to its account
pub fn store_stable_mint(state: &StableMint, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    state.try_serialize(&mut writer)
}

/// Load the SPL mint from an unchecked account
/// # Arguments
/// * `info` - The mint PDA
/// * `token_program` - The token program expected to own the mint
/// # Returns
/// * `Result<Mint>` - The mint, `MintNotInitialized` if it was never created
pub fn load_mint(info: &AccountInfo, token_program: &Pubkey) -> Result<Mint> {
    require!(
        !info.data_is_empty() && info.owner == token_program,
        StableFunError::MintNotInitialized
    );

    let data = info.try_borrow_data()?;
    let mint = Mint::try_deserialize(&mut &data[..])
        .map_err(|_| StableFunError::MintNotInitialized)?;
    require!(mint.is_initialized, StableFunError::MintNotInitialized);

    Ok(mint)
}
