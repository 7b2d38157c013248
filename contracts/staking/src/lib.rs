#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod contract;
mod errors;
mod events;
mod interfaces;
mod msg;
mod staking;
mod storage;

#[cfg(test)]
mod tests;

pub use contract::*;
