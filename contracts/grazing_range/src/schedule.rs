//! Per-campaign reward schedule.
//!
//! A schedule is an append-only list of phases. Phase `i` covers the blocks
//! `(end_block[i - 1], end_block[i]]`, with `start_block` standing in for
//! `end_block[-1]`, and emits a constant `reward_per_block` over that range.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::campaign::Campaign;
use crate::ContractError;

const PHASES: Symbol = symbol_short!("PHASES");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

/// Default cap on the number of phases a single campaign may hold.
pub const DEFAULT_REWARD_INFO_LIMIT: u32 = 52;

/// A contiguous block range with a constant emission rate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPhase {
    pub end_block: u32,
    pub reward_per_block: i128,
}

fn phases_key(campaign_id: u32) -> (Symbol, u32) {
    (PHASES, campaign_id)
}

pub fn load(env: &Env, campaign_id: u32) -> Vec<RewardPhase> {
    env.storage()
        .persistent()
        .get(&phases_key(campaign_id))
        .unwrap_or(Vec::new(env))
}

fn store(env: &Env, campaign_id: u32, phases: &Vec<RewardPhase>) {
    let key = phases_key(campaign_id);
    env.storage().persistent().set(&key, phases);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Validate a new phase against the campaign's schedule.
///
/// Returns the block the new phase starts after, i.e. the previous phase's
/// end block or the campaign's start block for the first phase.
pub fn check_append(
    env: &Env,
    campaign: &Campaign,
    phases: &Vec<RewardPhase>,
    end_block: u32,
    limit: u32,
) -> Result<u32, ContractError> {
    if phases.len() >= limit {
        return Err(ContractError::PhaseLimitExceeded);
    }

    match phases.last() {
        None => {
            if end_block < campaign.start_block {
                return Err(ContractError::BadStartBlock);
            }
            Ok(campaign.start_block)
        }
        Some(last) => {
            if end_block <= last.end_block {
                return Err(ContractError::BadEndBlock);
            }
            // An ended schedule cannot be extended.
            if env.ledger().sequence() > last.end_block {
                return Err(ContractError::RewardPeriodEnded);
            }
            Ok(last.end_block)
        }
    }
}

/// Append a phase that already passed `check_append`.
pub fn append(env: &Env, campaign_id: u32, mut phases: Vec<RewardPhase>, phase: RewardPhase) {
    phases.push_back(phase);
    store(env, campaign_id, &phases);
}

/// Total emission of a phase spanning `(previous_boundary, end_block]`.
pub fn phase_reward(
    previous_boundary: u32,
    end_block: u32,
    reward_per_block: i128,
) -> Result<i128, ContractError> {
    let blocks = end_block.saturating_sub(previous_boundary);
    reward_per_block
        .checked_mul(i128::from(blocks))
        .ok_or(ContractError::MathOverflow)
}

/// Emission the schedule still releases after block `from`.
pub fn remaining_emission(
    phases: &Vec<RewardPhase>,
    start_block: u32,
    from: u32,
) -> Result<i128, ContractError> {
    let mut remaining: i128 = 0;
    let mut boundary = start_block;
    for phase in phases.iter() {
        let emission = phase_reward(boundary.max(from), phase.end_block, phase.reward_per_block)?;
        remaining = remaining
            .checked_add(emission)
            .ok_or(ContractError::MathOverflow)?;
        boundary = phase.end_block;
    }
    Ok(remaining)
}

/// The first phase that has not ended at `block`, if any.
pub fn active_phase(phases: &Vec<RewardPhase>, block: u32) -> Option<RewardPhase> {
    phases.iter().find(|phase| phase.end_block >= block)
}
