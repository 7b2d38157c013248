use roost::constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use roost::math::SafeMath;
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Env, Vec,
};

use crate::{
    errors::ContractError,
    events::StakingEvents,
    interfaces::{IssuerClient, RegistryClient},
    msg::{ConfigResponse, StakeInfoResponse, StakedResponse},
    staking::StakingTrait,
    storage::{
        add_to_index, get_config, get_stake, get_staked_items, remove_from_index, remove_stake,
        save_config, save_stake,
        utils::{is_initialized, set_initialized},
        Config, StakeRecord,
    },
};

contractmeta!(
    key = "Description",
    val = "NFT staking with unbonding and time-based rewards"
);

#[contract]
pub struct Staking;

#[contractimpl]
impl StakingTrait for Staking {
    fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        issuer: Address,
        reward_rate: i128,
        unbonding_period: u64,
        claim_delay: u64,
    ) {
        if is_initialized(&env) {
            log!(
                &env,
                "Staking: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ContractError::AlreadyInitialized);
        }

        if reward_rate < 0 {
            log!(&env, "Staking: Initialize: reward rate cannot be negative");
            panic_with_error!(&env, ContractError::InvalidRate);
        }

        set_initialized(&env);

        let config = Config {
            admin: admin.clone(),
            registry: registry.clone(),
            issuer: issuer.clone(),
            reward_rate,
            unbonding_period,
            claim_delay,
            paused: false,
        };
        save_config(&env, &config);

        StakingEvents::initialize(&env, &admin, &registry, &issuer);
    }

    // ################################################################
    //                             Users
    // ################################################################

    fn stake(env: Env, sender: Address, items: Vec<u64>) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let config = get_config(&env);
        ensure_not_paused(&env, &config);
        ensure_not_empty(&env, &items);

        let now = env.ledger().timestamp();
        let contract = env.current_contract_address();
        let registry = RegistryClient::new(&env, &config.registry);

        for item_id in items.iter() {
            if get_stake(&env, &sender, item_id).is_some() {
                log!(&env, "Staking: Stake: item {} is already staked", item_id);
                panic_with_error!(&env, ContractError::AlreadyStaked);
            }
            if registry.owner_of(&item_id) != sender {
                log!(
                    &env,
                    "Staking: Stake: sender does not own item {}",
                    item_id
                );
                panic_with_error!(&env, ContractError::NotOwner);
            }
            if !registry.is_approved(&item_id, &contract) {
                log!(
                    &env,
                    "Staking: Stake: transfer of item {} has not been approved",
                    item_id
                );
                panic_with_error!(&env, ContractError::NotApproved);
            }
            if registry.try_transfer(&sender, &contract, &item_id).is_err() {
                log!(
                    &env,
                    "Staking: Stake: registry refused transfer of item {}",
                    item_id
                );
                panic_with_error!(&env, ContractError::RegistryCallFailed);
            }

            save_stake(&env, &sender, item_id, &StakeRecord::new(now));
            add_to_index(&env, &sender, item_id);

            StakingEvents::staked(&env, &sender, item_id, now);
        }
    }

    fn unstake(env: Env, sender: Address, items: Vec<u64>) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let config = get_config(&env);
        ensure_not_paused(&env, &config);
        ensure_not_empty(&env, &items);

        let now = env.ledger().timestamp();

        for item_id in items.iter() {
            let mut record = match get_stake(&env, &sender, item_id) {
                Some(record) => record,
                None => {
                    log!(&env, "Staking: Unstake: item {} is not staked", item_id);
                    panic_with_error!(&env, ContractError::NotStaked);
                }
            };
            if record.is_unbonding() {
                log!(
                    &env,
                    "Staking: Unstake: item {} is already unbonding",
                    item_id
                );
                panic_with_error!(&env, ContractError::AlreadyUnstaking);
            }

            // Bank the accrued reward; no further accrual past this instant.
            record.settle(&env, now, config.reward_rate);
            record.unbonding_start = now;
            save_stake(&env, &sender, item_id, &record);

            StakingEvents::unstaked(&env, &sender, item_id, now);
        }
    }

    fn claim_reward(env: Env, sender: Address, items: Vec<u64>) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let config = get_config(&env);
        ensure_not_paused(&env, &config);
        ensure_not_empty(&env, &items);

        let now = env.ledger().timestamp();
        let mut total: i128 = 0;

        for item_id in items.iter() {
            let mut record = match get_stake(&env, &sender, item_id) {
                Some(record) => record,
                None => {
                    log!(&env, "Staking: Claim: item {} is not staked", item_id);
                    panic_with_error!(&env, ContractError::NotStaked);
                }
            };

            if record.is_unbonding() {
                // Accrual stopped and was banked at unstake; the claim delay
                // gates settlements, not the payout of an already settled
                // balance.
                total = total
                    .safe_add(record.reward_debt, &env)
                    .unwrap_or_else(|err| panic_with_error!(&env, err));
                record.reward_debt = 0;
            } else {
                let elapsed = now
                    .safe_sub(record.staking_time, &env)
                    .unwrap_or_else(|err| panic_with_error!(&env, err));
                if elapsed < config.claim_delay {
                    log!(
                        &env,
                        "Staking: Claim: claim delay has not elapsed for item {}",
                        item_id
                    );
                    panic_with_error!(&env, ContractError::DelayNotElapsed);
                }
                total = total
                    .safe_add(record.earned(&env, now, config.reward_rate), &env)
                    .unwrap_or_else(|err| panic_with_error!(&env, err));
                record.reward_debt = 0;
                record.staking_time = now;
            }
            save_stake(&env, &sender, item_id, &record);
        }

        if total == 0 {
            log!(&env, "Staking: Claim: nothing to claim");
            panic_with_error!(&env, ContractError::ZeroReward);
        }

        // One aggregate mint per batch. A failed mint panics, which reverts
        // every settlement above: settlement and mint succeed or fail
        // together.
        let issuer = IssuerClient::new(&env, &config.issuer);
        if issuer.try_mint(&sender, &total).is_err() {
            log!(&env, "Staking: Claim: reward issuer rejected the mint");
            panic_with_error!(&env, ContractError::IssuerCallFailed);
        }

        StakingEvents::reward_claimed(&env, &sender, total, now);
    }

    fn withdraw(env: Env, sender: Address, items: Vec<u64>) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let config = get_config(&env);
        ensure_not_paused(&env, &config);
        ensure_not_empty(&env, &items);

        let now = env.ledger().timestamp();
        let contract = env.current_contract_address();
        let registry = RegistryClient::new(&env, &config.registry);

        for item_id in items.iter() {
            let record = match get_stake(&env, &sender, item_id) {
                Some(record) => record,
                None => {
                    log!(&env, "Staking: Withdraw: item {} is not staked", item_id);
                    panic_with_error!(&env, ContractError::NotStaked);
                }
            };
            if !record.is_unbonding() {
                log!(
                    &env,
                    "Staking: Withdraw: unstake item {} before withdrawing",
                    item_id
                );
                panic_with_error!(&env, ContractError::NotUnbonding);
            }

            let unbonded_at = record
                .unbonding_start
                .safe_add(config.unbonding_period, &env)
                .unwrap_or_else(|err| panic_with_error!(&env, err));
            if now < unbonded_at {
                log!(
                    &env,
                    "Staking: Withdraw: unbonding period for item {} has not elapsed",
                    item_id
                );
                panic_with_error!(&env, ContractError::UnbondingNotOver);
            }
            if record.earned(&env, now, config.reward_rate) != 0 {
                log!(
                    &env,
                    "Staking: Withdraw: item {} still has unclaimed rewards",
                    item_id
                );
                panic_with_error!(&env, ContractError::ClaimBeforeWithdraw);
            }

            remove_stake(&env, &sender, item_id);
            remove_from_index(&env, &sender, item_id);

            // A refused transfer panics and reverts the removals above, so a
            // failed batch never leaves the ledger out of step with custody.
            if registry.try_transfer(&contract, &sender, &item_id).is_err() {
                log!(
                    &env,
                    "Staking: Withdraw: registry refused to return item {}",
                    item_id
                );
                panic_with_error!(&env, ContractError::RegistryCallFailed);
            }

            StakingEvents::withdrawn(&env, &sender, item_id, now);
        }
    }

    // ################################################################
    //                             Admin
    // ################################################################

    fn set_reward_rate(env: Env, sender: Address, reward_rate: i128) {
        let mut config = admin_update_start(&env, &sender);
        if reward_rate < 0 {
            log!(&env, "Staking: Set reward rate: rate cannot be negative");
            panic_with_error!(&env, ContractError::InvalidRate);
        }
        config.reward_rate = reward_rate;
        save_config(&env, &config);
    }

    fn set_unbonding_period(env: Env, sender: Address, unbonding_period: u64) {
        let mut config = admin_update_start(&env, &sender);
        config.unbonding_period = unbonding_period;
        save_config(&env, &config);
    }

    fn set_claim_delay(env: Env, sender: Address, claim_delay: u64) {
        let mut config = admin_update_start(&env, &sender);
        config.claim_delay = claim_delay;
        save_config(&env, &config);
    }

    fn set_registry(env: Env, sender: Address, registry: Address) {
        let mut config = admin_update_start(&env, &sender);
        config.registry = registry;
        save_config(&env, &config);
    }

    fn set_issuer(env: Env, sender: Address, issuer: Address) {
        let mut config = admin_update_start(&env, &sender);
        config.issuer = issuer;
        save_config(&env, &config);
    }

    fn pause(env: Env, sender: Address) {
        let mut config = admin_update_start(&env, &sender);
        if config.paused {
            log!(&env, "Staking: Pause: contract is already paused");
            panic_with_error!(&env, ContractError::AlreadyPaused);
        }
        config.paused = true;
        save_config(&env, &config);

        // The pause must not succeed locally while the issuer keeps minting.
        // A failed propagation panics and reverts the local flag.
        let issuer = IssuerClient::new(&env, &config.issuer);
        if issuer.try_pause().is_err() {
            log!(&env, "Staking: Pause: reward issuer refused to pause");
            panic_with_error!(&env, ContractError::IssuerCallFailed);
        }
    }

    fn unpause(env: Env, sender: Address) {
        let mut config = admin_update_start(&env, &sender);
        if !config.paused {
            log!(&env, "Staking: Unpause: contract is not paused");
            panic_with_error!(&env, ContractError::NotPaused);
        }
        config.paused = false;
        save_config(&env, &config);

        let issuer = IssuerClient::new(&env, &config.issuer);
        if issuer.try_unpause().is_err() {
            log!(&env, "Staking: Unpause: reward issuer refused to unpause");
            panic_with_error!(&env, ContractError::IssuerCallFailed);
        }
    }

    // ################################################################
    //                             Queries
    // ################################################################

    fn query_earned(env: Env, owner: Address, item_id: u64) -> i128 {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        let config = get_config(&env);
        match get_stake(&env, &owner, item_id) {
            Some(record) => record.earned(&env, env.ledger().timestamp(), config.reward_rate),
            None => 0,
        }
    }

    fn query_stake_info(env: Env, owner: Address, item_id: u64) -> StakeInfoResponse {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        match get_stake(&env, &owner, item_id) {
            Some(record) => StakeInfoResponse { stake: record },
            None => {
                log!(&env, "Staking: Query stake info: item {} is not staked", item_id);
                panic_with_error!(&env, ContractError::NotStaked);
            }
        }
    }

    fn query_staked(env: Env, owner: Address) -> StakedResponse {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        StakedResponse {
            items: get_staked_items(&env, &owner),
        }
    }

    fn query_config(env: Env) -> ConfigResponse {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        ConfigResponse {
            config: get_config(&env),
        }
    }

    fn query_admin(env: Env) -> Address {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        get_config(&env).admin
    }
}

fn ensure_not_paused(env: &Env, config: &Config) {
    if config.paused {
        log!(env, "Staking: operations are paused");
        panic_with_error!(env, ContractError::Paused);
    }
}

fn ensure_not_empty(env: &Env, items: &Vec<u64>) {
    if items.is_empty() {
        log!(env, "Staking: at least one item must be provided");
        panic_with_error!(env, ContractError::EmptyBatch);
    }
}

/// Shared preamble of every admin operation: authorization against the
/// configured admin, instance TTL bump, and the current config.
fn admin_update_start(env: &Env, sender: &Address) -> Config {
    sender.require_auth();
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

    let config = get_config(env);
    if config.admin != *sender {
        log!(env, "Staking: you are not authorized");
        panic_with_error!(env, ContractError::Unauthorized);
    }
    config
}
