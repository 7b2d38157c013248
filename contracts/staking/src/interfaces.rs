use soroban_sdk::{contractclient, Address, Env};

/// External registry holding custody of the staked items. Ownership and
/// approval are checked before every custody move; a failed `transfer`
/// surfaces as `RegistryCallFailed` and aborts the batch.
#[contractclient(name = "RegistryClient")]
pub trait AssetRegistryTrait {
    fn owner_of(env: Env, item_id: u64) -> Address;

    fn is_approved(env: Env, item_id: u64, spender: Address) -> bool;

    fn transfer(env: Env, from: Address, to: Address, item_id: u64);
}

/// External reward currency issuer. The staking contract issues at most one
/// `mint` per claim batch and propagates `pause`/`unpause` to it.
#[contractclient(name = "IssuerClient")]
pub trait RewardIssuerTrait {
    fn mint(env: Env, to: Address, amount: i128);

    fn burn(env: Env, from: Address, amount: i128);

    fn pause(env: Env);

    fn unpause(env: Env);
}
