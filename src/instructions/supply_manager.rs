use anchor_lang::prelude::*;

use crate::{
    errors::StableFunError,
    ledger::{BalanceDelta, BalanceLedger},
    state::StableMint,
    utils::{read_feed, FeedAccountView, Observation},
};

/// Outcome of a mint or redeem
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub owner: Pubkey,
    pub amount: u64,
    // Holder balance after the operation
    pub balance: u64,
    // Total supply after the operation
    pub total_supply: u64,
    pub price: i64,
    pub exponent: i32,
    pub publish_time: i64,
    // Observed price expressed with the mint's decimals
    pub normalized_price: u64,
}

impl Receipt {
    fn new(
        owner: Pubkey,
        amount: u64,
        balance: u64,
        total_supply: u64,
        observation: &Observation,
        normalized_price: u64,
    ) -> Self {
        Self {
            owner,
            amount,
            balance,
            total_supply,
            price: observation.price,
            exponent: observation.exponent,
            publish_time: observation.publish_time,
            normalized_price,
        }
    }
}

/// Checks shared by mint and redeem, in order: amount, initialization, then the feed
fn gate(
    state: &StableMint,
    feed: &FeedAccountView,
    now: i64,
    amount: u64,
    paused: bool,
    paused_error: StableFunError,
) -> Result<(Observation, u64)> {
    require_gt!(amount, 0, StableFunError::InvalidAmount);
    require!(state.is_initialized(), StableFunError::MintNotInitialized);

    if paused {
        return Err(paused_error.into());
    }

    let observation = read_feed(feed, &state.feed_config(), now)?;
    let normalized_price = observation.normalized_price(state.decimals);

    Ok((observation, normalized_price))
}

/// Credits `amount` base units to `owner` after the feed has been read successfully.
/// The holder account is created when missing.
/// # Arguments
/// * `state` - The StableMint record, its supply is incremented by `amount`
/// * `ledger` - The balance store to credit
/// * `feed` - The feed account gating the operation
/// * `now` - The current unix timestamp
/// * `owner` - The destination owner
/// * `amount` - The amount to mint in base units
/// # Returns
/// * `Result<Receipt>` - The updated balance and supply, nothing is applied on error
pub fn mint_with_feed<L: BalanceLedger>(
    state: &mut StableMint,
    ledger: &mut L,
    feed: &FeedAccountView,
    now: i64,
    owner: &Pubkey,
    amount: u64,
) -> Result<Receipt> {
    let (observation, normalized_price) =
        gate(state, feed, now, amount, state.minting_paused, StableFunError::MintingPaused)?;

    let mint = state.mint;
    let new_supply = state.supply_after_mint(amount)?;

    let existing = ledger.get_balance(owner, &mint)?;
    let new_balance = existing
        .unwrap_or(0)
        .checked_add(amount)
        .ok_or(StableFunError::SupplyOverflow)?;

    if existing.is_none() {
        msg!("Creating holder account for {}", owner);
        ledger.create_holder(owner, &mint)?;
    }

    ledger.adjust_balance(owner, &mint, BalanceDelta::Credit(amount))?;
    state.total_supply = new_supply;

    msg!(
        "Minted {} to {} at price {}+/-{}e{}, supply {}",
        amount,
        owner,
        observation.price,
        observation.conf,
        observation.exponent,
        new_supply
    );

    Ok(Receipt::new(
        *owner,
        amount,
        new_balance,
        new_supply,
        &observation,
        normalized_price,
    ))
}

/// Debits `amount` base units from `owner` after the feed has been read successfully.
/// # Arguments
/// * `state` - The StableMint record, its supply is decremented by `amount`
/// * `ledger` - The balance store to debit
/// * `feed` - The feed account gating the operation
/// * `now` - The current unix timestamp
/// * `owner` - The redeeming holder
/// * `amount` - The amount to redeem in base units
/// # Returns
/// * `Result<Receipt>` - `InsufficientBalance` if `amount` exceeds the holder balance
pub fn redeem_with_feed<L: BalanceLedger>(
    state: &mut StableMint,
    ledger: &mut L,
    feed: &FeedAccountView,
    now: i64,
    owner: &Pubkey,
    amount: u64,
) -> Result<Receipt> {
    let (observation, normalized_price) = gate(
        state,
        feed,
        now,
        amount,
        state.redemption_paused,
        StableFunError::RedemptionPaused,
    )?;

    let mint = state.mint;

    // A missing holder account holds nothing
    let balance = ledger.get_balance(owner, &mint)?.unwrap_or(0);
    require_gte!(balance, amount, StableFunError::InsufficientBalance);

    let new_supply = state.supply_after_redeem(amount)?;

    ledger.adjust_balance(owner, &mint, BalanceDelta::Debit(amount))?;
    state.total_supply = new_supply;

    msg!(
        "Redeemed {} from {} at price {}+/-{}e{}, supply {}",
        amount,
        owner,
        observation.price,
        observation.conf,
        observation.exponent,
        new_supply
    );

    Ok(Receipt::new(
        *owner,
        amount,
        balance - amount,
        new_supply,
        &observation,
        normalized_price,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::PYTH_RECEIVER_PROGRAM_ID,
        ledger::test_utils::InMemoryLedger,
        state::stable_mint::test_utils::{create_test_state, initialized_state, usd_params},
        utils::feed::test_utils::{price_update_bytes, usdc_price_update, USDC_FEED_ID},
    };
    use proptest::prelude::*;

    const NOW: i64 = 1_763_588_500;
    const ONE: u64 = 1_000_000_000;

    fn fresh_feed() -> Vec<u8> {
        price_update_bytes(true, USDC_FEED_ID, 100_000_000, -8, NOW)
    }

    fn view(data: &[u8]) -> FeedAccountView<'_> {
        FeedAccountView {
            owner: PYTH_RECEIVER_PROGRAM_ID,
            data,
        }
    }

    #[test]
    fn test_mint_then_redeem_scenarios() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = fresh_feed();

        // Mint 10 tokens to a holder without an account
        let receipt =
            mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 10 * ONE).unwrap();
        assert_eq!(receipt.balance, 10 * ONE);
        assert_eq!(receipt.total_supply, 10 * ONE);
        assert_eq!(receipt.normalized_price, ONE);
        assert_eq!(ledger.created, vec![user]);
        assert_eq!(state.total_supply, 10 * ONE);

        // Redeem half
        let receipt =
            redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 5 * ONE).unwrap();
        assert_eq!(receipt.balance, 5 * ONE);
        assert_eq!(receipt.total_supply, 5 * ONE);
        assert_eq!(ledger.get_balance(&user, &state.mint).unwrap(), Some(5 * ONE));

        // Over-redeem fails and changes nothing
        let ledger_before = ledger.clone();
        let err = redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 6 * ONE)
            .unwrap_err();
        assert_eq!(err, StableFunError::InsufficientBalance.into());
        assert_eq!(ledger, ledger_before);
        assert_eq!(state.total_supply, 5 * ONE);
    }

    #[test]
    fn test_mint_exact_base_units() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = fresh_feed();

        for k in [1u64, 7, ONE - 1, ONE, 123_456_789_012] {
            let before = ledger.get_balance(&user, &state.mint).unwrap().unwrap_or(0);
            let receipt =
                mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, k).unwrap();
            assert_eq!(receipt.balance - before, k);
        }

        // Holder account created only once
        assert_eq!(ledger.created.len(), 1);
    }

    #[test]
    fn test_existing_holder_is_not_recreated() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        ledger.create_holder(&user, &state.mint).unwrap();
        let feed = fresh_feed();

        mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, ONE).unwrap();
        assert_eq!(ledger.created, vec![user]);
    }

    #[test]
    fn test_redeem_without_holder_account() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let feed = fresh_feed();

        let err = redeem_with_feed(
            &mut state,
            &mut ledger,
            &view(&feed),
            NOW,
            &Pubkey::new_unique(),
            1,
        )
        .unwrap_err();
        assert_eq!(err, StableFunError::InsufficientBalance.into());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = fresh_feed();

        let err =
            mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 0).unwrap_err();
        assert_eq!(err, StableFunError::InvalidAmount.into());

        let err =
            redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 0).unwrap_err();
        assert_eq!(err, StableFunError::InvalidAmount.into());
        assert!(ledger.balances.is_empty());
    }

    #[test]
    fn test_uninitialized_mint_rejected() {
        let mut state = create_test_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = fresh_feed();

        let err =
            mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, ONE).unwrap_err();
        assert_eq!(err, StableFunError::MintNotInitialized.into());

        let err =
            redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, ONE).unwrap_err();
        assert_eq!(err, StableFunError::MintNotInitialized.into());
        assert!(ledger.balances.is_empty());
    }

    #[test]
    fn test_paused_operations() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = fresh_feed();

        mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, ONE).unwrap();

        state.set_paused(true, false);
        let err =
            mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, ONE).unwrap_err();
        assert_eq!(err, StableFunError::MintingPaused.into());
        // Redemption still open
        redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 1).unwrap();

        state.set_paused(false, true);
        let err =
            redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 1).unwrap_err();
        assert_eq!(err, StableFunError::RedemptionPaused.into());

        // Pause is checked before the feed
        state.set_paused(true, true);
        let err = mint_with_feed(&mut state, &mut ledger, &view(&[]), NOW, &user, 1).unwrap_err();
        assert_eq!(err, StableFunError::MintingPaused.into());
    }

    #[test]
    fn test_feed_gates_before_any_mutation() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = fresh_feed();
        mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, 3 * ONE).unwrap();

        let ledger_before = ledger.clone();
        let supply_before = state.total_supply;
        let newcomer = Pubkey::new_unique();

        let mut truncated = fresh_feed();
        truncated.truncate(40);
        let stale = price_update_bytes(true, USDC_FEED_ID, 100_000_000, -8, NOW - 61);

        let cases: Vec<(&[u8], StableFunError)> = vec![
            (&[] as &[u8], StableFunError::FeedUnavailable),
            (truncated.as_slice(), StableFunError::FeedUnavailable),
            (stale.as_slice(), StableFunError::FeedStale),
        ];

        for (data, expected) in cases {
            let expected: anchor_lang::error::Error = expected.into();

            let err = mint_with_feed(&mut state, &mut ledger, &view(data), NOW, &newcomer, ONE)
                .unwrap_err();
            assert_eq!(err, expected);

            let err = redeem_with_feed(&mut state, &mut ledger, &view(data), NOW, &user, ONE)
                .unwrap_err();
            assert_eq!(err, expected);

            assert_eq!(ledger, ledger_before);
            assert_eq!(state.total_supply, supply_before);
        }
    }

    #[test]
    fn test_real_feed_with_pinned_id() {
        let mut state = initialized_state();
        state
            .set_feed_config(PYTH_RECEIVER_PROGRAM_ID, USDC_FEED_ID, 60)
            .unwrap();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = usdc_price_update();

        let receipt =
            mint_with_feed(&mut state, &mut ledger, &view(&feed), 1763588496, &user, ONE).unwrap();
        assert_eq!(receipt.price, 99_989_346);
        assert_eq!(receipt.exponent, -8);
        assert_eq!(receipt.normalized_price, 999_893_460);
    }

    #[test]
    fn test_high_precision_mint_with_large_price() {
        let mut state = create_test_state();
        let mut params = usd_params();
        params.decimals = 19;
        state
            .initialize(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                &params,
                254,
                253,
            )
            .unwrap();

        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        // $20.00 at exponent -8 scaled to 19 decimals exceeds a u64
        let feed = price_update_bytes(true, USDC_FEED_ID, 2_000_000_000, -8, NOW);

        let receipt =
            mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, ONE).unwrap();
        assert_eq!(receipt.balance, ONE);
        assert_eq!(receipt.normalized_price, u64::MAX);

        let receipt =
            redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, ONE).unwrap();
        assert_eq!(receipt.balance, 0);
        assert_eq!(state.total_supply, 0);
    }

    #[test]
    fn test_supply_overflow_rejected() {
        let mut state = initialized_state();
        let mut ledger = InMemoryLedger::default();
        let user = Pubkey::new_unique();
        let feed = fresh_feed();

        mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &user, u64::MAX).unwrap();

        let ledger_before = ledger.clone();
        let err = mint_with_feed(
            &mut state,
            &mut ledger,
            &view(&feed),
            NOW,
            &Pubkey::new_unique(),
            1,
        )
        .unwrap_err();
        assert_eq!(err, StableFunError::SupplyOverflow.into());
        assert_eq!(ledger, ledger_before);
        assert_eq!(state.total_supply, u64::MAX);
    }

    proptest! {
        #[test]
        fn test_supply_matches_balances_fuzz(
            ops in proptest::collection::vec((any::<bool>(), 0usize..4, 0u64..=20 * ONE), 1..40)
        ) {
            let mut state = initialized_state();
            let mut ledger = InMemoryLedger::default();
            let feed = fresh_feed();
            let owners: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();

            for (is_mint, idx, amount) in ops {
                let owner = owners[idx];
                let before = ledger.get_balance(&owner, &state.mint).unwrap().unwrap_or(0);

                let result = if is_mint {
                    mint_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &owner, amount)
                } else {
                    redeem_with_feed(&mut state, &mut ledger, &view(&feed), NOW, &owner, amount)
                };

                let after = ledger.get_balance(&owner, &state.mint).unwrap().unwrap_or(0);
                match result {
                    Ok(receipt) => {
                        prop_assert_eq!(receipt.balance, after);
                        prop_assert_eq!(receipt.total_supply, state.total_supply);
                    }
                    Err(_) => {
                        prop_assert_eq!(before, after);
                    }
                }

                // A redeem never goes below zero, so failures are the only way past the floor
                if !is_mint && amount > before {
                    prop_assert_eq!(before, after);
                }

                prop_assert_eq!(state.total_supply as u128, ledger.total(&state.mint));
            }
        }
    }
}
