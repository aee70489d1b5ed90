use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const CAMPAIGN: Symbol = symbol_short!("CMPGN");
const CAMPAIGN_CTR: Symbol = symbol_short!("CMPGN_CTR");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

// ── Types ────────────────────────────────────────────────────────────────────

/// An independent staking pool: one staking token, one reward token and its
/// own reward schedule.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u32,
    pub staking_token: Address,
    pub reward_token: Address,
    pub start_block: u32,
    /// Block up to which `acc_reward_per_share` has been brought.
    pub last_reward_block: u32,
    /// Cumulative reward per staked unit, scaled by `PRECISION`.
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
    /// Reward tokens this campaign still holds: funded, less payouts and
    /// reclamations.
    pub total_rewards: i128,
}

impl Campaign {
    /// Book `amount` reward tokens as leaving the campaign's custody.
    ///
    /// Campaigns sharing a reward token share one balance, so a campaign may
    /// never spend more than it was funded with.
    pub fn debit_rewards(&mut self, amount: i128) -> Result<(), ContractError> {
        self.total_rewards = self
            .total_rewards
            .checked_sub(amount)
            .filter(|left| *left >= 0)
            .ok_or(ContractError::InsufficientReward)?;
        Ok(())
    }
}

fn campaign_key(id: u32) -> (Symbol, u32) {
    (CAMPAIGN, id)
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Number of campaigns ever created. Ids are dense in `0..count`.
pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&CAMPAIGN_CTR).unwrap_or(0)
}

/// Create and store a new campaign, returning its id.
pub fn create(
    env: &Env,
    staking_token: Address,
    reward_token: Address,
    start_block: u32,
) -> Campaign {
    let id = count(env);
    let current = env.ledger().sequence();

    let campaign = Campaign {
        id,
        staking_token,
        reward_token,
        start_block,
        last_reward_block: current.max(start_block),
        acc_reward_per_share: 0,
        total_staked: 0,
        total_rewards: 0,
    };
    store(env, &campaign);
    env.storage().instance().set(&CAMPAIGN_CTR, &(id + 1));

    campaign
}

pub fn load(env: &Env, id: u32) -> Result<Campaign, ContractError> {
    env.storage()
        .persistent()
        .get(&campaign_key(id))
        .ok_or(ContractError::CampaignNotFound)
}

pub fn store(env: &Env, campaign: &Campaign) {
    let key = campaign_key(campaign.id);
    env.storage().persistent().set(&key, campaign);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
