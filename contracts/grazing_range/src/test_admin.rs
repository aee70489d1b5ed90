extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ContractError, GrazingRange, GrazingRangeClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, GrazingRangeClient<'static>, Address, Address) {
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
    client.add_campaign_info(&owner, &staking_token, &reward_token, &100);

    (env, client, owner, holder)
}

fn assert_not_owner<T: core::fmt::Debug, E: core::fmt::Debug>(
    result: Result<T, Result<ContractError, E>>,
) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        other => unreachable!("Expected NotOwner error, got {:?}", other),
    }
}

// ── Owner gating ─────────────────────────────────────────────────────────────

#[test]
fn test_non_owner_cannot_add_campaign() {
    let (env, client, _owner, _holder) = setup();
    let intruder = Address::generate(&env);
    let token = Address::generate(&env);

    assert_not_owner(client.try_add_campaign_info(&intruder, &token, &token, &0));
    assert_eq!(client.campaign_info_len(), 1);
}

#[test]
fn test_non_owner_cannot_add_reward_info() {
    let (env, client, _owner, _holder) = setup();
    let intruder = Address::generate(&env);

    assert_not_owner(client.try_add_reward_info(&intruder, &0, &200, &1));
    assert_eq!(client.reward_info_len(&0), 0);
}

#[test]
fn test_non_owner_cannot_reclaim_rewards() {
    let (env, client, _owner, _holder) = setup();
    let intruder = Address::generate(&env);

    assert_not_owner(client.try_emergency_reward_withdraw(&intruder, &0, &1, &intruder));
}

#[test]
fn test_non_owner_cannot_configure() {
    let (env, client, _owner, holder) = setup();
    let intruder = Address::generate(&env);

    assert_not_owner(client.try_set_reward_info_limit(&intruder, &1));
    assert_not_owner(client.try_set_reward_holder(&intruder, &intruder));

    assert_eq!(client.get_reward_info_limit(), 52);
    assert_eq!(client.get_reward_holder(), holder);
}

#[test]
fn test_owner_configures_limit_and_holder() {
    let (env, client, owner, _holder) = setup();
    let new_holder = Address::generate(&env);

    client.set_reward_info_limit(&owner, &4);
    client.set_reward_holder(&owner, &new_holder);

    assert_eq!(client.get_reward_info_limit(), 4);
    assert_eq!(client.get_reward_holder(), new_holder);
}

#[test]
fn test_reclaim_zero_fails() {
    let (_env, client, owner, _holder) = setup();

    let result = client.try_emergency_reward_withdraw(&owner, &0, &0, &owner);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
}

#[test]
fn test_reclaim_from_unfunded_campaign_fails() {
    let (_env, client, owner, _holder) = setup();

    let result = client.try_emergency_reward_withdraw(&owner, &0, &1, &owner);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientReward),
        _ => unreachable!("Expected InsufficientReward error"),
    }
}

// ── Ownership transfer (two-step) ───────────────────────────────────────────

#[test]
fn test_ownership_transfer() {
    let (env, client, owner, _holder) = setup();
    let successor = Address::generate(&env);

    client.propose_owner(&owner, &successor);
    assert_eq!(client.get_pending_owner(), Some(successor.clone()));
    // Nothing changes until the successor accepts.
    assert_eq!(client.get_owner(), owner);

    client.accept_owner(&successor);
    assert_eq!(client.get_owner(), successor);
    assert_eq!(client.get_pending_owner(), None);

    // The old owner lost its rights.
    assert_not_owner(client.try_set_reward_info_limit(&owner, &1));
    client.set_reward_info_limit(&successor, &1);
    assert_eq!(client.get_reward_info_limit(), 1);
}

#[test]
fn test_only_proposed_owner_can_accept() {
    let (env, client, owner, _holder) = setup();
    let successor = Address::generate(&env);
    let intruder = Address::generate(&env);

    client.propose_owner(&owner, &successor);
    assert_not_owner(client.try_accept_owner(&intruder));
    assert_eq!(client.get_owner(), owner);
}

#[test]
fn test_accept_without_proposal_fails() {
    let (env, client, _owner, _holder) = setup();
    let someone = Address::generate(&env);

    let result = client.try_accept_owner(&someone);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }
}

#[test]
fn test_cancel_ownership_transfer() {
    let (env, client, owner, _holder) = setup();
    let successor = Address::generate(&env);

    client.propose_owner(&owner, &successor);
    client.cancel_owner_transfer(&owner);
    assert_eq!(client.get_pending_owner(), None);

    let result = client.try_accept_owner(&successor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }
}

#[test]
fn test_non_owner_cannot_propose() {
    let (env, client, _owner, _holder) = setup();
    let intruder = Address::generate(&env);

    assert_not_owner(client.try_propose_owner(&intruder, &intruder));
    assert_eq!(client.get_pending_owner(), None);
}
