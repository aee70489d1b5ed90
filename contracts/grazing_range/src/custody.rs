//! Token movements in and out of ledger custody.
//!
//! Every call goes through the token client's `try_` variant so a failing
//! transfer surfaces as `TokenTransferFailed` instead of trapping.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Move `amount` of `token` from `from` into the contract. `from` must have
/// authorized the enclosing invocation.
pub fn pull(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let this = env.current_contract_address();
    match token::Client::new(env, token).try_transfer(from, &this, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TokenTransferFailed),
    }
}

/// Move `amount` of `token` from `holder` into the contract against the
/// allowance `holder` granted the contract.
pub fn pull_approved(
    env: &Env,
    token: &Address,
    holder: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let this = env.current_contract_address();
    match token::Client::new(env, token).try_transfer_from(&this, holder, &this, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TokenTransferFailed),
    }
}

/// Send `amount` of `token` out of custody to `to`. Zero is a no-op.
pub fn push(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let this = env.current_contract_address();
    match token::Client::new(env, token).try_transfer(&this, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TokenTransferFailed),
    }
}
