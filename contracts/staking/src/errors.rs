use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    Unauthorized = 2,
    Paused = 3,
    AlreadyPaused = 4,
    NotPaused = 5,
    EmptyBatch = 6,
    AlreadyStaked = 7,
    NotOwner = 8,
    NotApproved = 9,
    NotStaked = 10,
    AlreadyUnstaking = 11,
    NotUnbonding = 12,
    UnbondingNotOver = 13,
    DelayNotElapsed = 14,
    ZeroReward = 15,
    ClaimBeforeWithdraw = 16,
    IssuerCallFailed = 17,
    RegistryCallFailed = 18,
    InvalidRate = 19,
}
