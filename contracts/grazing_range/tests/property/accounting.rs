#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the reward ledger's accounting.
//!
//! Invariants tested:
//! - `total_staked` always equals the sum of every position's `amount`
//! - `acc_reward_per_share` never decreases
//! - `pending_reward` is stable while the block does not move
//! - every funded reward token is either paid, reclaimed or still held
//! - the ledger holds enough reward tokens for every pending claim
//! - a sole staker receives the scheduled emission, floored by at most 1

use grazing_range::UserPosition;
use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::harness::{emitted_between, setup, PHASES, START};

const STAKERS: usize = 3;
const BALANCE: i128 = 1_000_000;

#[derive(Clone, Debug)]
enum Op {
    Deposit(usize, i128),
    Withdraw(usize, i128),
    Harvest(usize),
    EmergencyWithdraw(usize),
    Reclaim(i128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let who = 0..STAKERS;
    prop_oneof![
        (who.clone(), 1i128..=10_000).prop_map(|(w, a)| Op::Deposit(w, a)),
        (who.clone(), 1i128..=10_000).prop_map(|(w, a)| Op::Withdraw(w, a)),
        who.clone().prop_map(Op::Harvest),
        who.prop_map(Op::EmergencyWithdraw),
        (1i128..=20_000).prop_map(Op::Reclaim),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any interleaving of staker operations keeps the ledger consistent.
    #[test]
    fn prop_ledger_invariants(
        steps in prop::collection::vec((op_strategy(), 0u32..5), 1..30),
    ) {
        let t = setup(STAKERS, BALANCE);
        t.at(START - 5);

        let funded = emitted_between(START, PHASES[1].0);
        let beneficiary = Address::generate(&t.env);
        let mut last_acc = 0i128;
        // Each stake change snapshots a floored debt, which can put that
        // position up to one unit ahead of its exact share.
        let mut snapshots = 0i128;

        for (op, advance) in steps {
            match op {
                Op::Deposit(w, amount) => {
                    t.client.deposit(&t.stakers[w], &0, &amount);
                    snapshots += 1;
                }
                Op::Withdraw(w, amount) => {
                    let staked = t.client.user_info(&0, &t.stakers[w]).amount;
                    let amount = amount.min(staked);
                    if amount > 0 {
                        t.client.withdraw(&t.stakers[w], &0, &amount);
                        snapshots += 1;
                    }
                }
                Op::Harvest(w) => {
                    t.client.harvest(&t.stakers[w], &vec![&t.env, 0u32]);
                }
                Op::EmergencyWithdraw(w) => {
                    t.client.emergency_withdraw(&t.stakers[w], &0);
                }
                Op::Reclaim(amount) => {
                    let _ = t
                        .client
                        .try_emergency_reward_withdraw(&t.owner, &0, &amount, &beneficiary);
                }
            }

            let campaign = t.client.campaign_info(&0);

            let positions: Vec<UserPosition> = t
                .stakers
                .iter()
                .map(|s| t.client.user_info(&0, s))
                .collect();
            let staked: i128 = positions.iter().map(|p| p.amount).sum();
            prop_assert_eq!(campaign.total_staked, staked);

            prop_assert!(campaign.acc_reward_per_share >= last_acc);
            last_acc = campaign.acc_reward_per_share;
            prop_assert!(campaign.last_reward_block <= t.block().max(START));

            let mut owed = 0i128;
            for s in t.stakers.iter() {
                prop_assert_eq!(t.stake_balance(s) + t.client.user_info(&0, s).amount, BALANCE);
                let first = t.client.pending_reward(&0, s);
                let second = t.client.pending_reward(&0, s);
                prop_assert_eq!(first, second);
                owed += first;
            }

            let paid: i128 = t.stakers.iter().map(|s| t.reward_balance(s)).sum();
            let reclaimed = t.reward_balance(&beneficiary);
            prop_assert_eq!(t.custody(), campaign.total_rewards);
            prop_assert_eq!(paid + reclaimed + campaign.total_rewards, funded);
            prop_assert!(t.custody() + snapshots >= owed);

            t.at(t.block() + advance);
        }
    }

    /// A sole staker is paid the schedule's emission over the blocks it was
    /// staked, losing at most one unit to flooring.
    #[test]
    fn prop_sole_staker_receives_emission(
        amount in 1i128..=1_000_000,
        enter in (START - 10)..(PHASES[1].0 + 10),
        stay in 0u32..80,
    ) {
        let t = setup(1, BALANCE);
        let staker = t.stakers[0].clone();

        t.at(enter);
        t.client.deposit(&staker, &0, &amount);

        let exit = enter + stay;
        t.at(exit);
        t.client.withdraw(&staker, &0, &amount);

        let expected = emitted_between(enter.max(START), exit);
        let paid = t.reward_balance(&staker);
        prop_assert!(paid <= expected);
        prop_assert!(paid + 1 >= expected);
        prop_assert_eq!(t.stake_balance(&staker), BALANCE);
    }
}
