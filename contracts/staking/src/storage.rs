use roost::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use roost::math::{accrued, SafeMath};
use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeKey {
    pub owner: Address,
    pub item_id: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config = 1,
    Initialized = 2,
}

#[contracttype]
#[derive(Clone)]
pub enum RecordKey {
    Stake(StakeKey),
    StakedItems(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub registry: Address,
    pub issuer: Address,
    /// Reward units accrued per second per staked item.
    pub reward_rate: i128,
    /// Seconds between unstake and withdraw eligibility.
    pub unbonding_period: u64,
    /// Minimum seconds between reward settlements of one stake.
    pub claim_delay: u64,
    pub paused: bool,
}

/// One item's stake lifecycle for one owner. Created on stake, moved to
/// unbonding on unstake, deleted on withdraw.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    /// Accrual origin: set at stake, reset on every reward settlement.
    pub staking_time: u64,
    /// Zero while actively staked; the unstake timestamp afterwards.
    pub unbonding_start: u64,
    /// Reward banked at the last settlement but not yet minted.
    pub reward_debt: i128,
}

impl StakeRecord {
    pub fn new(now: u64) -> Self {
        StakeRecord {
            staking_time: now,
            unbonding_start: 0,
            reward_debt: 0,
        }
    }

    pub fn is_unbonding(&self) -> bool {
        self.unbonding_start > 0
    }

    /// Banked debt plus live accrual since the last settlement. Accrual is
    /// frozen once the record is unbonding.
    pub fn earned(&self, env: &Env, now: u64, rate: i128) -> i128 {
        if self.is_unbonding() {
            return self.reward_debt;
        }
        let live = accrued(env, rate, self.staking_time, now)
            .unwrap_or_else(|err| panic_with_error!(env, err));
        self.reward_debt
            .safe_add(live, env)
            .unwrap_or_else(|err| panic_with_error!(env, err))
    }

    /// Banks the live accrual into `reward_debt` and resets the origin.
    pub fn settle(&mut self, env: &Env, now: u64, rate: i128) {
        self.reward_debt = self.earned(env, now, rate);
        self.staking_time = now;
    }
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().persistent().set(&DataKey::Config, config);
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .persistent()
        .get(&DataKey::Config)
        .expect("Staking: Config not set");

    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    config
}

/// Absence is an explicit signal: the lifecycle engine must distinguish
/// "never staked" from a zero-valued record.
pub fn get_stake(env: &Env, owner: &Address, item_id: u64) -> Option<StakeRecord> {
    let key = RecordKey::Stake(StakeKey {
        owner: owner.clone(),
        item_id,
    });
    let record = env.storage().persistent().get(&key);
    if record.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    record
}

pub fn save_stake(env: &Env, owner: &Address, item_id: u64, record: &StakeRecord) {
    let key = RecordKey::Stake(StakeKey {
        owner: owner.clone(),
        item_id,
    });
    env.storage().persistent().set(&key, record);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn remove_stake(env: &Env, owner: &Address, item_id: u64) {
    let key = RecordKey::Stake(StakeKey {
        owner: owner.clone(),
        item_id,
    });
    env.storage().persistent().remove(&key);
}

pub fn get_staked_items(env: &Env, owner: &Address) -> Vec<u64> {
    let key = RecordKey::StakedItems(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(items) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            items
        }
        None => Vec::new(env),
    }
}

pub fn save_staked_items(env: &Env, owner: &Address, items: &Vec<u64>) {
    let key = RecordKey::StakedItems(owner.clone());
    env.storage().persistent().set(&key, items);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn add_to_index(env: &Env, owner: &Address, item_id: u64) {
    let mut items = get_staked_items(env, owner);
    items.push_back(item_id);
    save_staked_items(env, owner, &items);
}

/// Swap-with-last-and-truncate removal. Listing order carries no meaning.
pub fn remove_from_index(env: &Env, owner: &Address, item_id: u64) {
    let mut items = get_staked_items(env, owner);
    if let Some(pos) = items.iter().position(|id| id == item_id) {
        let pos = pos as u32;
        let last = items.len() - 1;
        if pos != last {
            items.set(pos, items.get_unchecked(last));
        }
        items.pop_back();
        save_staked_items(env, owner, &items);
    }
}

pub mod utils {
    use roost::constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};

    use super::*;

    pub fn is_initialized(e: &Env) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::Initialized)
            .unwrap_or(false)
    }

    pub fn set_initialized(e: &Env) {
        e.storage().instance().set(&DataKey::Initialized, &true);
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }
}
