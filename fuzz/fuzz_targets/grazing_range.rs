#![no_main]

use arbitrary::Arbitrary;
use grazing_range::{GrazingRange, GrazingRangeClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{vec, Address, Env};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u64 },
    Withdraw { amount: u64 },
    Harvest,
    EmergencyWithdraw,
    AddRewardInfo { end_offset: u8, reward_per_block: u32 },
    ReclaimRewards { amount: u64 },
    Advance { blocks: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let staking_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(GrazingRange, ());
    let client = GrazingRangeClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let holder = Address::generate(&env);
    client.initialize(&owner, &holder);

    let funds = i128::from(u64::MAX);
    StellarAssetClient::new(&env, &reward_token).mint(&holder, &funds);
    TokenClient::new(&env, &reward_token).approve(&holder, &contract_id, &funds, &3_000);

    client.add_campaign_info(&owner, &staking_token, &reward_token, &10);

    let mut users = vec![&env];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &staking_token).mint(&user, &funds);
        users.push_back(user);
    }

    let rewards = TokenClient::new(&env, &reward_token);
    // Deposits and withdrawals snapshot a floored debt; each may leave one
    // position a unit ahead of its exact share.
    let mut snapshots: i128 = 0;

    // Every call may fail; what must never happen is a panic, a broken
    // staked total or a ledger that cannot cover what it owes.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = users.get((i as u32) % users.len()).unwrap();
        match action {
            FuzzAction::Deposit { amount } => {
                if client.try_deposit(&caller, &0, &i128::from(amount)).is_ok() {
                    snapshots += 1;
                }
            }
            FuzzAction::Withdraw { amount } => {
                if client.try_withdraw(&caller, &0, &i128::from(amount)).is_ok() {
                    snapshots += 1;
                }
            }
            FuzzAction::Harvest => {
                let _ = client.try_harvest(&caller, &vec![&env, 0u32]);
            }
            FuzzAction::EmergencyWithdraw => {
                let _ = client.try_emergency_withdraw(&caller, &0);
            }
            FuzzAction::AddRewardInfo {
                end_offset,
                reward_per_block,
            } => {
                let end_block = env.ledger().sequence() + u32::from(end_offset);
                let _ = client.try_add_reward_info(
                    &owner,
                    &0,
                    &end_block,
                    &i128::from(reward_per_block),
                );
            }
            FuzzAction::ReclaimRewards { amount } => {
                let amount = i128::from(amount);
                let _ = client.try_emergency_reward_withdraw(&owner, &0, &amount, &owner);
            }
            FuzzAction::Advance { blocks } => {
                let next = (env.ledger().sequence() + u32::from(blocks)).min(2_000);
                env.ledger().set_sequence_number(next);
            }
        }

        let campaign = client.campaign_info(&0);
        let staked: i128 = users
            .iter()
            .map(|u| client.user_info(&0, &u).amount)
            .sum();
        assert_eq!(campaign.total_staked, staked);

        let custody = rewards.balance(&contract_id);
        assert_eq!(custody, campaign.total_rewards);

        let owed: i128 = users
            .iter()
            .filter_map(|u| match client.try_pending_reward(&0, &u) {
                Ok(Ok(pending)) => Some(pending),
                _ => None,
            })
            .sum();
        assert!(custody + snapshots >= owed);
    }
});
