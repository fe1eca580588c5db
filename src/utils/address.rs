use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey::{MAX_SEEDS, MAX_SEED_LEN};
use anchor_spl::metadata::mpl_token_metadata;

use crate::{
    constants::{METADATA_SEED, MINT_SEED},
    errors::StableFunError,
};

/// Derive a program address from a fixed seed plus optional extra inputs
/// # Arguments
/// * `seed` - The fixed seed string, must not be empty
/// * `extra_inputs` - Additional seed components appended after `seed`
/// * `program_id` - The program owning the derived address
/// # Returns
/// * `Result<(Pubkey, u8)>` - The derived address and its bump, or `InvalidSeed`
pub fn derive_address(
    seed: &[u8],
    extra_inputs: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    require!(!seed.is_empty(), StableFunError::InvalidSeed);

    // One slot is taken by the bump
    require!(
        extra_inputs.len() + 1 < MAX_SEEDS,
        StableFunError::InvalidSeed
    );

    require!(
        seed.len() <= MAX_SEED_LEN && extra_inputs.iter().all(|s| s.len() <= MAX_SEED_LEN),
        StableFunError::InvalidSeed
    );

    let mut seeds: Vec<&[u8]> = Vec::with_capacity(extra_inputs.len() + 1);
    seeds.push(seed);
    seeds.extend_from_slice(extra_inputs);

    Pubkey::try_find_program_address(&seeds, program_id)
        .ok_or_else(|| StableFunError::InvalidSeed.into())
}

/// The singleton mint address, which is also its own mint authority
pub fn mint_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive_address(MINT_SEED, &[], program_id)
}

/// The metadata record address for `mint`, owned by the metadata program
pub fn metadata_address(mint: &Pubkey) -> Result<(Pubkey, u8)> {
    let metadata_program = mpl_token_metadata::ID;
    derive_address(
        METADATA_SEED,
        &[metadata_program.as_ref(), mint.as_ref()],
        &metadata_program,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STABLE_MINT_SEED;
    use proptest::prelude::*;

    #[test]
    fn test_mint_address_is_deterministic() {
        let (first, first_bump) = mint_address(&crate::ID).unwrap();
        let (second, second_bump) = mint_address(&crate::ID).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bump, second_bump);
        assert_eq!(
            (first, first_bump),
            Pubkey::find_program_address(&[MINT_SEED], &crate::ID)
        );
    }

    #[test]
    fn test_singletons_do_not_collide() {
        let (mint, _) = mint_address(&crate::ID).unwrap();
        let (stable_mint, _) = derive_address(STABLE_MINT_SEED, &[], &crate::ID).unwrap();
        let (metadata, _) = metadata_address(&mint).unwrap();

        assert_ne!(mint, stable_mint);
        assert_ne!(mint, metadata);
        assert_ne!(stable_mint, metadata);
    }

    #[test]
    fn test_metadata_address_matches_metaplex() {
        let (mint, _) = mint_address(&crate::ID).unwrap();
        let (metadata, bump) = metadata_address(&mint).unwrap();
        let (expected, expected_bump) = mpl_token_metadata::accounts::Metadata::find_pda(&mint);

        assert_eq!(metadata, expected);
        assert_eq!(bump, expected_bump);
    }

    #[test]
    fn test_address_depends_on_program() {
        let other_program = Pubkey::new_unique();
        let (ours, _) = mint_address(&crate::ID).unwrap();
        let (theirs, _) = mint_address(&other_program).unwrap();

        assert_ne!(ours, theirs);
    }

    #[test]
    fn test_empty_seed_rejected() {
        let err = derive_address(b"", &[], &crate::ID).unwrap_err();
        assert_eq!(err, StableFunError::InvalidSeed.into());
    }

    #[test]
    fn test_oversized_seed_rejected() {
        let long_seed = [7u8; MAX_SEED_LEN + 1];
        let err = derive_address(&long_seed, &[], &crate::ID).unwrap_err();
        assert_eq!(err, StableFunError::InvalidSeed.into());

        let err = derive_address(MINT_SEED, &[&long_seed[..]], &crate::ID).unwrap_err();
        assert_eq!(err, StableFunError::InvalidSeed.into());

        // Exactly MAX_SEED_LEN is still fine
        let max_seed = [7u8; MAX_SEED_LEN];
        assert!(derive_address(&max_seed, &[], &crate::ID).is_ok());
    }

    #[test]
    fn test_too_many_seed_components_rejected() {
        let component: &[u8] = b"x";
        let allowed = vec![component; MAX_SEEDS - 2];
        assert!(derive_address(MINT_SEED, &allowed, &crate::ID).is_ok());

        let too_many = vec![component; MAX_SEEDS - 1];
        let err = derive_address(MINT_SEED, &too_many, &crate::ID).unwrap_err();
        assert_eq!(err, StableFunError::InvalidSeed.into());
    }

    proptest! {
        #[test]
        fn test_derive_address_fuzz(
            seed in proptest::collection::vec(any::<u8>(), 1..=MAX_SEED_LEN),
            extra in proptest::collection::vec(any::<u8>(), 0..=MAX_SEED_LEN),
        ) {
            let first = derive_address(&seed, &[extra.as_slice()], &crate::ID).unwrap();
            let second = derive_address(&seed, &[extra.as_slice()], &crate::ID).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(
                first,
                Pubkey::find_program_address(&[seed.as_slice(), extra.as_slice()], &crate::ID)
            );
        }
    }
}
