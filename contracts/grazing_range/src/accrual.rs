//! Lazy reward accrual.
//!
//! Nothing ticks in the background: a campaign's accumulator is brought up
//! to the current ledger sequence only when something reads or mutates it.

use soroban_sdk::{Env, Vec};

use crate::campaign::Campaign;
use crate::fixed_point;
use crate::schedule::{self, RewardPhase};
use crate::ContractError;

/// Accumulator state of a campaign at some block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Accrual {
    pub acc_reward_per_share: i128,
    pub last_reward_block: u32,
}

/// Walk the schedule from `campaign.last_reward_block` to `current`.
///
/// Pure with respect to storage; `update` and the read-only views share it.
pub fn accrue(
    env: &Env,
    campaign: &Campaign,
    phases: &Vec<RewardPhase>,
    current: u32,
) -> Result<Accrual, ContractError> {
    let mut acc = campaign.acc_reward_per_share;
    let mut last = campaign.last_reward_block;

    if current <= last {
        return Ok(Accrual {
            acc_reward_per_share: acc,
            last_reward_block: last,
        });
    }

    // Nobody was staked, so nothing was earned; only the watermark moves.
    if campaign.total_staked == 0 {
        return Ok(Accrual {
            acc_reward_per_share: acc,
            last_reward_block: current,
        });
    }

    for phase in phases.iter() {
        if phase.end_block <= last {
            continue;
        }

        let reached = current.min(phase.end_block);
        let delta = fixed_point::reward_per_share_delta(
            env,
            reached - last,
            phase.reward_per_block,
            campaign.total_staked,
        )?;
        acc = acc.checked_add(delta).ok_or(ContractError::MathOverflow)?;
        last = reached;

        if last == current {
            break;
        }
    }

    Ok(Accrual {
        acc_reward_per_share: acc,
        last_reward_block: last,
    })
}

/// Bring `campaign` up to the current block in place. The caller persists it.
pub fn update(env: &Env, campaign: &mut Campaign) -> Result<(), ContractError> {
    let current = env.ledger().sequence();
    if current <= campaign.last_reward_block {
        return Ok(());
    }

    let phases = schedule::load(env, campaign.id);
    let accrual = accrue(env, campaign, &phases, current)?;

    campaign.acc_reward_per_share = accrual.acc_reward_per_share;
    campaign.last_reward_block = accrual.last_reward_block;
    Ok(())
}

/// The accumulator value `update` would produce now, without writing it.
pub fn simulate(env: &Env, campaign: &Campaign) -> Result<i128, ContractError> {
    let phases = schedule::load(env, campaign.id);
    let accrual = accrue(env, campaign, &phases, env.ledger().sequence())?;
    Ok(accrual.acc_reward_per_share)
}
