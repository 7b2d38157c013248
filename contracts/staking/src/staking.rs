use soroban_sdk::{Address, Env, Vec};

use crate::msg::{ConfigResponse, StakeInfoResponse, StakedResponse};

pub trait StakingTrait {
    #[allow(clippy::too_many_arguments)]
    fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        issuer: Address,
        reward_rate: i128,
        unbonding_period: u64,
        claim_delay: u64,
    );

    // ################################################################
    //                             Users
    // ################################################################

    fn stake(env: Env, sender: Address, items: Vec<u64>);

    fn unstake(env: Env, sender: Address, items: Vec<u64>);

    fn claim_reward(env: Env, sender: Address, items: Vec<u64>);

    fn withdraw(env: Env, sender: Address, items: Vec<u64>);

    // ################################################################
    //                             Admin
    // ################################################################

    fn set_reward_rate(env: Env, sender: Address, reward_rate: i128);

    fn set_unbonding_period(env: Env, sender: Address, unbonding_period: u64);

    fn set_claim_delay(env: Env, sender: Address, claim_delay: u64);

    fn set_registry(env: Env, sender: Address, registry: Address);

    fn set_issuer(env: Env, sender: Address, issuer: Address);

    fn pause(env: Env, sender: Address);

    fn unpause(env: Env, sender: Address);

    // ################################################################
    //                             Queries
    // ################################################################

    fn query_earned(env: Env, owner: Address, item_id: u64) -> i128;

    fn query_stake_info(env: Env, owner: Address, item_id: u64) -> StakeInfoResponse;

    fn query_staked(env: Env, owner: Address) -> StakedResponse;

    fn query_config(env: Env) -> ConfigResponse;

    fn query_admin(env: Env) -> Address;
}
