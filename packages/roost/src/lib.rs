#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

pub mod constants;
pub mod error;
pub mod math;
