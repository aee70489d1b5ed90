use grazing_range::{GrazingRange, GrazingRangeClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

/// Start block of the test campaign.
pub const START: u32 = 100;

/// `(end_block, reward_per_block)` of the test campaign's two phases.
pub const PHASES: [(u32, i128); 2] = [(130, 1_000), (160, 3_000)];

pub struct TestLedger {
    pub env: Env,
    pub client: GrazingRangeClient<'static>,
    pub owner: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub stakers: Vec<Address>,
}

/// Deploys the ledger with one funded campaign (id 0) and `n_stakers`
/// stakers, each holding `balance` staking tokens.
pub fn setup(n_stakers: usize, balance: i128) -> TestLedger {
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

    let funds: i128 = 1_000_000_000;
    StellarAssetClient::new(&env, &reward_token).mint(&holder, &funds);
    TokenClient::new(&env, &reward_token).approve(&holder, &contract_id, &funds, &3_000);

    client.add_campaign_info(&owner, &staking_token, &reward_token, &START);
    for (end_block, reward_per_block) in PHASES {
        client.add_reward_info(&owner, &0, &end_block, &reward_per_block);
    }

    let stakers = (0..n_stakers)
        .map(|_| {
            let staker = Address::generate(&env);
            StellarAssetClient::new(&env, &staking_token).mint(&staker, &balance);
            staker
        })
        .collect();

    TestLedger {
        env,
        client,
        owner,
        staking_token,
        reward_token,
        stakers,
    }
}

impl TestLedger {
    pub fn block(&self) -> u32 {
        self.env.ledger().sequence()
    }

    pub fn at(&self, block: u32) {
        self.env.ledger().set_sequence_number(block);
    }

    pub fn reward_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(who)
    }

    /// Reward tokens held by the ledger across all campaigns.
    pub fn custody(&self) -> i128 {
        self.reward_balance(&self.client.address)
    }

    pub fn stake_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.staking_token).balance(who)
    }
}

/// Total emission of the test schedule over `(from, to]`.
pub fn emitted_between(from: u32, to: u32) -> i128 {
    let mut emitted = 0;
    let mut boundary = START;
    for (end_block, reward_per_block) in PHASES {
        let lo = from.max(boundary);
        let hi = to.min(end_block);
        if hi > lo {
            emitted += i128::from(hi - lo) * reward_per_block;
        }
        boundary = end_block;
    }
    emitted
}
