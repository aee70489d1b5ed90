#![no_std]

pub mod accrual;
pub mod campaign;
pub mod custody;
pub mod events;
pub mod fixed_point;
pub mod position;
pub mod schedule;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

pub use campaign::Campaign;
pub use fixed_point::PRECISION;
pub use position::UserPosition;
pub use schedule::{RewardPhase, DEFAULT_REWARD_INFO_LIMIT};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_HOLDER: Symbol = symbol_short!("RWD_HOLD");
const REWARD_INFO_LIMIT: Symbol = symbol_short!("RWD_LIMIT");

const INSTANCE_TTL_THRESHOLD: u32 = 17_280;
const INSTANCE_TTL_EXTEND_TO: u32 = 518_400;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 3,
    CampaignNotFound = 4,
    PhaseNotFound = 5,
    PhaseLimitExceeded = 6,
    BadStartBlock = 7,
    BadEndBlock = 8,
    RewardPeriodEnded = 9,
    InsufficientStake = 10,
    TokenTransferFailed = 11,
    InsufficientReward = 12,
    InvalidAmount = 13,
    MathOverflow = 14,
    NoPendingOwner = 15,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct GrazingRange;

#[contractimpl]
impl GrazingRange {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `owner`         – the only address allowed to run admin operations.
    /// * `reward_holder` – account that funds new reward phases; it must
    ///   approve this contract as a spender of each campaign's reward token.
    pub fn initialize(
        env: Env,
        owner: Address,
        reward_holder: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_HOLDER, &reward_holder);
        env.storage()
            .instance()
            .set(&REWARD_INFO_LIMIT, &DEFAULT_REWARD_INFO_LIMIT);
        Self::bump_instance(&env);

        events::publish_initialized(&env, owner, reward_holder, DEFAULT_REWARD_INFO_LIMIT);

        Ok(())
    }

    // ── Campaign administration ─────────────────────────────────────────────

    /// Open a new campaign and return its id. Ids are assigned densely from 0.
    pub fn add_campaign_info(
        env: Env,
        caller: Address,
        staking_token: Address,
        reward_token: Address,
        start_block: u32,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let campaign = campaign::create(&env, staking_token, reward_token, start_block);

        events::publish_campaign_added(
            &env,
            campaign.id,
            campaign.staking_token,
            campaign.reward_token,
            campaign.start_block,
        );

        Ok(campaign.id)
    }

    /// Append a reward phase ending at `end_block` and fund it.
    ///
    /// The phase covers the blocks after the previous phase's end (or after
    /// `start_block` for the first phase) up to and including `end_block`.
    /// Its full emission is pulled from the reward holder via `transfer_from`.
    pub fn add_reward_info(
        env: Env,
        caller: Address,
        campaign_id: u32,
        end_block: u32,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if reward_per_block < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut campaign = campaign::load(&env, campaign_id)?;
        let phases = schedule::load(&env, campaign_id);
        let limit = Self::get_reward_info_limit(env.clone());

        let previous_boundary = schedule::check_append(&env, &campaign, &phases, end_block, limit)?;
        let funded = schedule::phase_reward(previous_boundary, end_block, reward_per_block)?;

        campaign.total_rewards = campaign
            .total_rewards
            .checked_add(funded)
            .ok_or(ContractError::MathOverflow)?;

        let phase_index = phases.len();
        schedule::append(
            &env,
            campaign_id,
            phases,
            RewardPhase {
                end_block,
                reward_per_block,
            },
        );
        campaign::store(&env, &campaign);

        if funded > 0 {
            let holder = Self::get_reward_holder(env.clone())?;
            custody::pull_approved(&env, &campaign.reward_token, &holder, funded)?;
        }

        events::publish_reward_info_added(
            &env,
            campaign_id,
            phase_index,
            end_block,
            reward_per_block,
            funded,
        );

        Ok(())
    }

    /// Reclaim `amount` surplus reward tokens of a campaign to `beneficiary`.
    ///
    /// The campaign keeps enough to cover `total_staked` at the accumulator
    /// value it would have right now plus everything its schedule has yet to
    /// emit; only what it holds beyond that is surplus.
    pub fn emergency_reward_withdraw(
        env: Env,
        caller: Address,
        campaign_id: u32,
        amount: i128,
        beneficiary: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut campaign = campaign::load(&env, campaign_id)?;
        let reserve = Self::reward_reserve(&env, &campaign)?;
        let required = reserve
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        if required > campaign.total_rewards {
            return Err(ContractError::InsufficientReward);
        }

        campaign.debit_rewards(amount)?;
        campaign::store(&env, &campaign);

        custody::push(&env, &campaign.reward_token, &beneficiary, amount)?;

        events::publish_reward_reclaimed(
            &env,
            campaign_id,
            beneficiary,
            amount,
            campaign.total_rewards,
        );

        Ok(())
    }

    // ── Configuration ───────────────────────────────────────────────────────

    /// Cap the number of phases any campaign may hold from now on.
    /// Campaigns already above the new cap keep their phases.
    pub fn set_reward_info_limit(
        env: Env,
        caller: Address,
        limit: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&REWARD_INFO_LIMIT, &limit);

        events::publish_reward_info_limit_set(&env, limit);

        Ok(())
    }

    /// Change the account that funds future reward phases.
    pub fn set_reward_holder(
        env: Env,
        caller: Address,
        reward_holder: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&REWARD_HOLDER, &reward_holder);

        events::publish_reward_holder_set(&env, reward_holder);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` staking tokens into a campaign.
    ///
    /// The accumulator is brought up to date first, so the new stake earns
    /// nothing for blocks before this one. Reward pending on the existing
    /// stake is paid out in the same call.
    pub fn deposit(
        env: Env,
        staker: Address,
        campaign_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut campaign = campaign::load(&env, campaign_id)?;
        accrual::update(&env, &mut campaign)?;

        let mut position = position::load(&env, campaign_id, &staker);
        let reward = position.pending(&env, campaign.acc_reward_per_share)?;
        campaign.debit_rewards(reward)?;

        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        campaign.total_staked = campaign
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        position.refresh_debt(&env, campaign.acc_reward_per_share)?;

        campaign::store(&env, &campaign);
        position::store(&env, campaign_id, &staker, &position);

        // Interactions only after every write above.
        custody::pull(&env, &campaign.staking_token, &staker, amount)?;
        Self::pay_reward(&env, &campaign, &staker, reward)?;

        events::publish_deposited(&env, campaign_id, staker, amount, campaign.total_staked);

        Ok(())
    }

    /// Unstake `amount` and collect pending reward.
    pub fn withdraw(
        env: Env,
        staker: Address,
        campaign_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut campaign = campaign::load(&env, campaign_id)?;
        let mut position = position::load(&env, campaign_id, &staker);
        if amount > position.amount {
            return Err(ContractError::InsufficientStake);
        }

        accrual::update(&env, &mut campaign)?;
        let reward = position.pending(&env, campaign.acc_reward_per_share)?;
        campaign.debit_rewards(reward)?;

        position.amount -= amount;
        campaign.total_staked -= amount;
        position.refresh_debt(&env, campaign.acc_reward_per_share)?;

        campaign::store(&env, &campaign);
        position::store(&env, campaign_id, &staker, &position);

        custody::push(&env, &campaign.staking_token, &staker, amount)?;
        Self::pay_reward(&env, &campaign, &staker, reward)?;

        events::publish_withdrawn(&env, campaign_id, staker, amount, campaign.total_staked);

        Ok(())
    }

    /// Collect pending reward from each listed campaign. Stakes are untouched.
    ///
    /// Every campaign is settled and written before any reward is sent.
    pub fn harvest(env: Env, staker: Address, campaign_ids: Vec<u32>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut payouts: Vec<(Campaign, i128)> = Vec::new(&env);

        for campaign_id in campaign_ids.iter() {
            let mut campaign = campaign::load(&env, campaign_id)?;
            accrual::update(&env, &mut campaign)?;

            let mut position = position::load(&env, campaign_id, &staker);
            let reward = position.pending(&env, campaign.acc_reward_per_share)?;
            campaign.debit_rewards(reward)?;
            position.refresh_debt(&env, campaign.acc_reward_per_share)?;

            campaign::store(&env, &campaign);
            position::store(&env, campaign_id, &staker, &position);

            payouts.push_back((campaign, reward));
        }

        for (campaign, reward) in payouts.iter() {
            Self::pay_reward(&env, &campaign, &staker, reward)?;
        }

        Ok(())
    }

    /// Return the whole stake of `staker` without settling rewards.
    ///
    /// Accrual is skipped entirely; any unpaid reward is forfeited.
    pub fn emergency_withdraw(
        env: Env,
        staker: Address,
        campaign_id: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut campaign = campaign::load(&env, campaign_id)?;
        let position = position::load(&env, campaign_id, &staker);
        let amount = position.amount;

        campaign.total_staked -= amount;
        campaign::store(&env, &campaign);
        position::store(&env, campaign_id, &staker, &UserPosition::default());

        custody::push(&env, &campaign.staking_token, &staker, amount)?;

        events::publish_emergency_withdrawn(&env, campaign_id, staker, amount);

        Ok(())
    }

    // ── Accrual ─────────────────────────────────────────────────────────────

    /// Bring one campaign's accumulator up to the current block.
    pub fn update_campaign(env: Env, campaign_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::update_and_store(&env, campaign_id)
    }

    /// Bring every campaign's accumulator up to the current block.
    pub fn mass_update_campaigns(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        for campaign_id in 0..campaign::count(&env) {
            Self::update_and_store(&env, campaign_id)?;
        }
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn campaign_info_len(env: Env) -> u32 {
        campaign::count(&env)
    }

    pub fn reward_info_len(env: Env, campaign_id: u32) -> Result<u32, ContractError> {
        campaign::load(&env, campaign_id)?;
        Ok(schedule::load(&env, campaign_id).len())
    }

    pub fn campaign_info(env: Env, campaign_id: u32) -> Result<Campaign, ContractError> {
        campaign::load(&env, campaign_id)
    }

    pub fn campaign_reward_info(
        env: Env,
        campaign_id: u32,
        phase_index: u32,
    ) -> Result<RewardPhase, ContractError> {
        campaign::load(&env, campaign_id)?;
        schedule::load(&env, campaign_id)
            .get(phase_index)
            .ok_or(ContractError::PhaseNotFound)
    }

    /// Return a staker's position; absent positions read as zero.
    pub fn user_info(env: Env, campaign_id: u32, staker: Address) -> UserPosition {
        position::load(&env, campaign_id, &staker)
    }

    /// Reward `staker` could collect right now, without mutating state.
    pub fn pending_reward(
        env: Env,
        campaign_id: u32,
        staker: Address,
    ) -> Result<i128, ContractError> {
        let campaign = campaign::load(&env, campaign_id)?;
        let acc = accrual::simulate(&env, &campaign)?;
        position::load(&env, campaign_id, &staker).pending(&env, acc)
    }

    /// End block of the phase active at the current block, or 0 once the
    /// schedule has ended (or before it has any phase).
    pub fn current_end_block(env: Env, campaign_id: u32) -> Result<u32, ContractError> {
        campaign::load(&env, campaign_id)?;
        let phases = schedule::load(&env, campaign_id);
        Ok(schedule::active_phase(&phases, env.ledger().sequence())
            .map(|phase| phase.end_block)
            .unwrap_or(0))
    }

    /// Emission rate of the phase active at the current block, or 0.
    pub fn current_reward_per_block(env: Env, campaign_id: u32) -> Result<i128, ContractError> {
        campaign::load(&env, campaign_id)?;
        let phases = schedule::load(&env, campaign_id);
        Ok(schedule::active_phase(&phases, env.ledger().sequence())
            .map(|phase| phase.reward_per_block)
            .unwrap_or(0))
    }

    pub fn get_reward_info_limit(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&REWARD_INFO_LIMIT)
            .unwrap_or(DEFAULT_REWARD_INFO_LIMIT)
    }

    pub fn get_reward_holder(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_HOLDER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. Only the current owner can call this.
    /// The new owner must call `accept_owner` to complete the transfer.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        env.storage().instance().set(&PENDING_OWNER, &new_owner);

        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    /// Accept the pending ownership transfer. Only the proposed owner can call this.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::NoPendingOwner)?;

        if new_owner != pending {
            return Err(ContractError::NotOwner);
        }

        let old_owner = Self::get_owner(env.clone())?;

        env.storage().instance().set(&OWNER, &new_owner);
        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Cancel a pending ownership transfer. Only the current owner can call this.
    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::NoPendingOwner)?;

        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_cancelled(&env, current_owner, pending);

        Ok(())
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_OWNER)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Self::bump_instance(env);
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::NotOwner);
        }
        Ok(())
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }

    fn update_and_store(env: &Env, campaign_id: u32) -> Result<(), ContractError> {
        let mut campaign = campaign::load(env, campaign_id)?;
        accrual::update(env, &mut campaign)?;
        campaign::store(env, &campaign);
        Ok(())
    }

    /// Reward tokens that must stay in a campaign: everything the current
    /// stake has earned at the up-to-date accumulator, ignoring debts, plus
    /// the emission still scheduled after the current block.
    fn reward_reserve(env: &Env, campaign: &Campaign) -> Result<i128, ContractError> {
        let current = env.ledger().sequence();
        let phases = schedule::load(env, campaign.id);
        let accrual = accrual::accrue(env, campaign, &phases, current)?;

        let earned = if campaign.total_staked == 0 {
            0
        } else {
            fixed_point::accrued(env, campaign.total_staked, accrual.acc_reward_per_share)?
        };

        // Blocks up to the watermark are either priced into `earned` or went
        // unclaimed while nobody was staked.
        let from = current.max(accrual.last_reward_block);
        let unemitted = schedule::remaining_emission(&phases, campaign.start_block, from)?;

        earned
            .checked_add(unemitted)
            .ok_or(ContractError::MathOverflow)
    }

    /// Send settled reward to `staker`. Called after all storage writes, with
    /// `reward` already debited from the campaign.
    fn pay_reward(
        env: &Env,
        campaign: &Campaign,
        staker: &Address,
        reward: i128,
    ) -> Result<(), ContractError> {
        if reward <= 0 {
            return Ok(());
        }
        custody::push(env, &campaign.reward_token, staker, reward)?;
        events::publish_harvested(env, campaign.id, staker.clone(), reward);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
