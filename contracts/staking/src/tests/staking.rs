extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    vec, Address, Env,
};

use super::setup::{
    deploy_issuer, deploy_registry, deploy_staking_contract, mint_and_approve, setup_default,
    ONE_DAY, ONE_WEEK,
};
use crate::storage::{Config, StakeRecord};

#[test]
fn initialize_staking_contract() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env);
    let issuer = deploy_issuer(&env);

    let staking = deploy_staking_contract(
        &env,
        &admin,
        &registry.address,
        &issuer.address,
        10,
        ONE_WEEK,
        ONE_DAY,
    );

    let response = staking.query_config();
    assert_eq!(
        response.config,
        Config {
            admin: admin.clone(),
            registry: registry.address,
            issuer: issuer.address,
            reward_rate: 10,
            unbonding_period: ONE_WEEK,
            claim_delay: ONE_DAY,
            paused: false,
        }
    );
    assert_eq!(staking.query_admin(), admin);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn initializing_twice_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    ctx.staking.initialize(
        &ctx.admin,
        &ctx.registry.address,
        &ctx.issuer.address,
        &10,
        &ONE_WEEK,
        &ONE_DAY,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #19)")]
fn initializing_with_negative_rate_should_fail() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env);
    let issuer = deploy_issuer(&env);

    deploy_staking_contract(
        &env,
        &admin,
        &registry.address,
        &issuer.address,
        -1,
        ONE_WEEK,
        ONE_DAY,
    );
}

#[test]
fn stake_single_item() {
    let env = Env::default();
    let ctx = setup_default(&env);

    env.ledger().with_mut(|li| {
        li.timestamp = 100;
    });

    mint_and_approve(&ctx.registry, &ctx.user, &ctx.staking.address, &[7]);
    ctx.staking.stake(&ctx.user, &vec![&env, 7]);

    // custody moved to the staking contract
    assert_eq!(ctx.registry.owner_of(&7), ctx.staking.address);
    assert_eq!(ctx.staking.query_staked(&ctx.user).items, vec![&env, 7]);
    assert_eq!(
        ctx.staking.query_stake_info(&ctx.user, &7).stake,
        StakeRecord {
            staking_time: 100,
            unbonding_start: 0,
            reward_debt: 0,
        }
    );
}

#[test]
fn stake_batch_of_items() {
    let env = Env::default();
    let ctx = setup_default(&env);

    mint_and_approve(&ctx.registry, &ctx.user, &ctx.staking.address, &[1, 2, 3]);
    ctx.staking.stake(&ctx.user, &vec![&env, 1, 2, 3]);

    assert_eq!(
        ctx.staking.query_staked(&ctx.user).items,
        vec![&env, 1, 2, 3]
    );
    for item_id in [1u64, 2, 3] {
        assert_eq!(ctx.registry.owner_of(&item_id), ctx.staking.address);
    }
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn staking_same_item_twice_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    mint_and_approve(&ctx.registry, &ctx.user, &ctx.staking.address, &[7]);
    ctx.staking.stake(&ctx.user, &vec![&env, 7]);
    ctx.staking.stake(&ctx.user, &vec![&env, 7]);
}

#[test]
#[should_panic(expected = "Error(Contract, #8)")]
fn staking_item_owned_by_someone_else_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    let other = Address::generate(&env);
    ctx.registry.mint(&other, &7);
    ctx.registry.approve(&7, &ctx.staking.address);

    ctx.staking.stake(&ctx.user, &vec![&env, 7]);
}

#[test]
#[should_panic(expected = "Error(Contract, #9)")]
fn staking_without_transfer_approval_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    ctx.registry.mint(&ctx.user, &7);

    ctx.staking.stake(&ctx.user, &vec![&env, 7]);
}

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn staking_while_paused_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    mint_and_approve(&ctx.registry, &ctx.user, &ctx.staking.address, &[7]);
    ctx.staking.pause(&ctx.admin);

    ctx.staking.stake(&ctx.user, &vec![&env, 7]);
}

#[test]
#[should_panic(expected = "Error(Contract, #6)")]
fn staking_empty_batch_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    ctx.staking.stake(&ctx.user, &vec![&env]);
}

#[test]
fn failed_batch_leaves_no_partial_state() {
    let env = Env::default();
    let ctx = setup_default(&env);

    // item 2 is never approved, so the second iteration aborts the batch
    ctx.registry.mint(&ctx.user, &1);
    ctx.registry.approve(&1, &ctx.staking.address);
    ctx.registry.mint(&ctx.user, &2);

    assert!(ctx.staking.try_stake(&ctx.user, &vec![&env, 1, 2]).is_err());

    // item 1 was neither recorded nor transferred
    assert_eq!(ctx.staking.query_staked(&ctx.user).items, vec![&env]);
    assert_eq!(ctx.registry.owner_of(&1), ctx.user);
    assert_eq!(ctx.staking.query_earned(&ctx.user, &1), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #18)")]
fn staking_with_failing_registry_transfer_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    mint_and_approve(&ctx.registry, &ctx.user, &ctx.staking.address, &[7]);
    ctx.registry.set_fail_transfers(&true);

    ctx.staking.stake(&ctx.user, &vec![&env, 7]);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn unstaking_item_that_was_never_staked_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    ctx.staking.unstake(&ctx.user, &vec![&env, 7]);
}

#[test]
#[should_panic(expected = "Error(Contract, #11)")]
fn unstaking_twice_should_fail() {
    let env = Env::default();
    let ctx = setup_default(&env);

    env.ledger().with_mut(|li| {
        li.timestamp = 100;
    });
    mint_and_approve(&ctx.registry, &ctx.user, &ctx.staking.address, &[7]);
    ctx.staking.stake(&ctx.user, &vec![&env, 7]);

    ctx.staking.unstake(&ctx.user, &vec![&env, 7]);
    ctx.staking.unstake(&ctx.user, &vec![&env, 7]);
}

#[test]
fn unstake_banks_reward_and_starts_unbonding() {
    let env = Env::default();
    let ctx = setup_default(&env);

    env.ledger().with_mut(|li| {
        li.timestamp = 100;
    });
    mint_and_approve(&ctx.registry, &ctx.user, &ctx.staking.address, &[7]);
    ctx.staking.stake(&ctx.user, &vec![&env, 7]);

    env.ledger().with_mut(|li| {
        li.timestamp = 150;
    });
    ctx.staking.unstake(&ctx.user, &vec![&env, 7]);

    assert_eq!(
        ctx.staking.query_stake_info(&ctx.user, &7).stake,
        StakeRecord {
            staking_time: 150,
            unbonding_start: 150,
            reward_debt: 500,
        }
    );
    // custody stays with the contract during unbonding
    assert_eq!(ctx.registry.owner_of(&7), ctx.staking.address);
    assert_eq!(ctx.staking.query_staked(&ctx.user).items, vec![&env, 7]);
}
