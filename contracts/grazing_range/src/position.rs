use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::fixed_point;
use crate::ContractError;

const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

/// A staker's stake in one campaign.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserPosition {
    pub amount: i128,
    /// `amount × acc_reward_per_share / PRECISION` at the last settlement.
    pub reward_debt: i128,
}

impl UserPosition {
    /// Reward accrued since the last settlement at accumulator value `acc`.
    pub fn pending(&self, env: &Env, acc_reward_per_share: i128) -> Result<i128, ContractError> {
        if self.amount == 0 {
            return Ok(0);
        }
        fixed_point::pending(env, self.amount, acc_reward_per_share, self.reward_debt)
    }

    /// Re-snapshot the debt after `amount` changed or rewards were paid.
    pub fn refresh_debt(
        &mut self,
        env: &Env,
        acc_reward_per_share: i128,
    ) -> Result<(), ContractError> {
        self.reward_debt = fixed_point::accrued(env, self.amount, acc_reward_per_share)?;
        Ok(())
    }
}

fn position_key(campaign_id: u32, staker: &Address) -> (Symbol, u32, Address) {
    (POSITION, campaign_id, staker.clone())
}

pub fn load(env: &Env, campaign_id: u32, staker: &Address) -> UserPosition {
    env.storage()
        .persistent()
        .get(&position_key(campaign_id, staker))
        .unwrap_or_default()
}

/// Persist `position`; an emptied position is removed rather than stored.
pub fn store(env: &Env, campaign_id: u32, staker: &Address, position: &UserPosition) {
    let key = position_key(campaign_id, staker);
    if position.amount == 0 && position.reward_debt == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
