use anchor_lang::prelude::*;

use crate::errors::StableFunError;

/// The scaling factor `10^decimals` for an amount with the given precision
/// # Returns
/// * `Result<u64>` - The factor, or `InvalidDecimals` if it does not fit in a u64
#[inline(always)]
pub fn decimals_factor(decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .ok_or(StableFunError::InvalidDecimals.into())
}

/// Normalize an amount from one decimal precision to another
/// # Arguments
/// * `amount` - The amount to normalize
/// * `from_decimals` - The current decimal precision of the amount
/// * `to_decimals` - The target decimal precision to normalize to
/// * `round_up` - Round the result up when precision is lost
/// # Returns
/// * `Result<u64>` - The normalized amount
#[inline(always)]
pub fn normalize_decimals(
    amount: u64,
    from_decimals: u8,
    to_decimals: u8,
    round_up: bool,
) -> Result<u64> {
    if to_decimals > from_decimals {
        let factor = 10u64
            .checked_pow((to_decimals - from_decimals) as u32)
            .ok_or(StableFunError::MathOverflow)?;
        amount
            .checked_mul(factor)
            .ok_or(StableFunError::MathOverflow.into())
    } else if from_decimals > to_decimals {
        let d = 10u128
            .checked_pow((from_decimals - to_decimals) as u32)
            .ok_or(StableFunError::MathOverflow)?;

        // ceil(a/b) = (a + b - 1) / b
        let c = if round_up { d - 1 } else { 0 };

        let q = (amount as u128 + c) / d;

        Ok(u64::try_from(q).map_err(|_| StableFunError::MathOverflow)?)
    } else {
        Ok(amount)
    }
}
