#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_holder: Address,
    pub reward_info_limit: u32,
    pub block: u32,
}

/// Fired when the owner opens a new campaign.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignAddedEvent {
    pub campaign_id: u32,
    pub staking_token: Address,
    pub reward_token: Address,
    pub start_block: u32,
}

/// Fired when a reward phase is appended and funded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardInfoAddedEvent {
    pub campaign_id: u32,
    pub phase_index: u32,
    pub end_block: u32,
    pub reward_per_block: i128,
    pub funded: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub campaign_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub campaign_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub block: u32,
}

/// Fired whenever pending reward is paid out, from any entry point.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestedEvent {
    pub campaign_id: u32,
    pub staker: Address,
    pub reward: i128,
    pub block: u32,
}

/// Fired when a staker exits without settling rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub campaign_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when the owner reclaims surplus reward tokens.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardReclaimedEvent {
    pub campaign_id: u32,
    pub beneficiary: Address,
    pub amount: i128,
    pub remaining_rewards: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardInfoLimitSetEvent {
    pub limit: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardHolderSetEvent {
    pub reward_holder: Address,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    reward_holder: Address,
    reward_info_limit: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_holder,
            reward_info_limit,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_campaign_added(
    env: &Env,
    campaign_id: u32,
    staking_token: Address,
    reward_token: Address,
    start_block: u32,
) {
    env.events().publish(
        (symbol_short!("CMPGN_ADD"), campaign_id),
        CampaignAddedEvent {
            campaign_id,
            staking_token,
            reward_token,
            start_block,
        },
    );
}

pub fn publish_reward_info_added(
    env: &Env,
    campaign_id: u32,
    phase_index: u32,
    end_block: u32,
    reward_per_block: i128,
    funded: i128,
) {
    env.events().publish(
        (symbol_short!("PHASE_ADD"), campaign_id),
        RewardInfoAddedEvent {
            campaign_id,
            phase_index,
            end_block,
            reward_per_block,
            funded,
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    campaign_id: u32,
    staker: Address,
    amount: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), campaign_id, staker.clone()),
        DepositedEvent {
            campaign_id,
            staker,
            amount,
            total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    campaign_id: u32,
    staker: Address,
    amount: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), campaign_id, staker.clone()),
        WithdrawnEvent {
            campaign_id,
            staker,
            amount,
            total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_harvested(env: &Env, campaign_id: u32, staker: Address, reward: i128) {
    env.events().publish(
        (symbol_short!("HARVEST"), campaign_id, staker.clone()),
        HarvestedEvent {
            campaign_id,
            staker,
            reward,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdrawn(env: &Env, campaign_id: u32, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), campaign_id, staker.clone()),
        EmergencyWithdrawnEvent {
            campaign_id,
            staker,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_reclaimed(
    env: &Env,
    campaign_id: u32,
    beneficiary: Address,
    amount: i128,
    remaining_rewards: i128,
) {
    env.events().publish(
        (symbol_short!("RWD_RECL"), campaign_id),
        RewardReclaimedEvent {
            campaign_id,
            beneficiary,
            amount,
            remaining_rewards,
        },
    );
}

pub fn publish_reward_info_limit_set(env: &Env, limit: u32) {
    env.events().publish(
        (symbol_short!("LIMIT_SET"),),
        RewardInfoLimitSetEvent { limit },
    );
}

pub fn publish_reward_holder_set(env: &Env, reward_holder: Address) {
    env.events().publish(
        (symbol_short!("HOLDR_SET"),),
        RewardHolderSetEvent { reward_holder },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent { old_owner, new_owner },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
        },
    );
}
