use soroban_sdk::{Address, Env, Symbol};

pub struct StakingEvents {}

impl StakingEvents {
    /// Emitted when the contract is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[registry: Address, issuer: Address]`
    pub fn initialize(env: &Env, admin: &Address, registry: &Address, issuer: &Address) {
        let topics = (Symbol::new(env, "initialize"), admin.clone());
        env.events().publish(topics, (registry.clone(), issuer.clone()));
    }

    /// Emitted once per item successfully staked
    ///
    /// - topics - `["staked", owner: Address]`
    /// - data - `[item_id: u64, ts: u64]`
    pub fn staked(env: &Env, owner: &Address, item_id: u64, ts: u64) {
        let topics = (Symbol::new(env, "staked"), owner.clone());
        env.events().publish(topics, (item_id, ts));
    }

    /// Emitted once per item entering the unbonding period
    ///
    /// - topics - `["unstaked", owner: Address]`
    /// - data - `[item_id: u64, ts: u64]`
    pub fn unstaked(env: &Env, owner: &Address, item_id: u64, ts: u64) {
        let topics = (Symbol::new(env, "unstaked"), owner.clone());
        env.events().publish(topics, (item_id, ts));
    }

    /// Emitted once per successful claim batch, after the aggregate mint
    ///
    /// - topics - `["reward_claimed", owner: Address]`
    /// - data - `[amount: i128, ts: u64]`
    pub fn reward_claimed(env: &Env, owner: &Address, amount: i128, ts: u64) {
        let topics = (Symbol::new(env, "reward_claimed"), owner.clone());
        env.events().publish(topics, (amount, ts));
    }

    /// Emitted once per item returned to its owner
    ///
    /// - topics - `["withdrawn", owner: Address]`
    /// - data - `[item_id: u64, ts: u64]`
    pub fn withdrawn(env: &Env, owner: &Address, item_id: u64, ts: u64) {
        let topics = (Symbol::new(env, "withdrawn"), owner.clone());
        env.events().publish(topics, (item_id, ts));
    }
}
