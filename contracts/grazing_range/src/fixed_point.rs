use soroban_sdk::{Env, I256};

use crate::ContractError;

/// Fixed-point scaling factor for `acc_reward_per_share`.
///
/// Reward-per-share values are stored multiplied by this constant so that
/// dividing a block's emission by a large stake does not truncate to zero.
pub const PRECISION: i128 = 100_000_000_000_000_000_000;

/// `a × b / denominator`, floored.
///
/// The product is formed in 256-bit host integers, so only the final
/// quotient has to fit in `i128`. Inputs are expected to be non-negative;
/// for those, truncating division is a floor.
pub fn mul_div_floor(
    env: &Env,
    a: i128,
    b: i128,
    denominator: i128,
) -> Result<i128, ContractError> {
    if denominator <= 0 || a < 0 || b < 0 {
        return Err(ContractError::MathOverflow);
    }
    if a == 0 || b == 0 {
        return Ok(0);
    }

    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
        .ok_or(ContractError::MathOverflow)
}

/// Accumulator increase for `blocks` blocks emitting `reward_per_block`,
/// shared across `total_staked`.
///
/// ```text
/// Δacc = blocks × reward_per_block × PRECISION / total_staked
/// ```
pub fn reward_per_share_delta(
    env: &Env,
    blocks: u32,
    reward_per_block: i128,
    total_staked: i128,
) -> Result<i128, ContractError> {
    let emitted = reward_per_block
        .checked_mul(i128::from(blocks))
        .ok_or(ContractError::MathOverflow)?;
    mul_div_floor(env, emitted, PRECISION, total_staked)
}

/// Everything `amount` has earned at accumulator value `acc`, ignoring debt.
pub fn accrued(env: &Env, amount: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    mul_div_floor(env, amount, acc_reward_per_share, PRECISION)
}

/// Reward earned since the position's last settlement.
///
/// `reward_debt` was taken as `accrued(amount, acc_then)` with the same
/// `amount`, and the accumulator never decreases, so the difference is
/// never negative.
pub fn pending(
    env: &Env,
    amount: i128,
    acc_reward_per_share: i128,
    reward_debt: i128,
) -> Result<i128, ContractError> {
    accrued(env, amount, acc_reward_per_share)?
        .checked_sub(reward_debt)
        .ok_or(ContractError::MathOverflow)
}
