use soroban_sdk::{log, Env};

use crate::error::{ErrorCode, RoostResult};

pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self, env: &Env) -> RoostResult<Self>;
    fn safe_sub(self, rhs: Self, env: &Env) -> RoostResult<Self>;
    fn safe_mul(self, rhs: Self, env: &Env) -> RoostResult<Self>;
}

macro_rules! checked_impl {
    ($t:ty) => {
        impl SafeMath for $t {
            #[track_caller]
            #[inline(always)]
            fn safe_add(self, v: $t, env: &Env) -> RoostResult<$t> {
                match self.checked_add(v) {
                    Some(result) => Ok(result),
                    None => {
                        log!(env, "Math error thrown at {}:{}", file!(), line!());
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_sub(self, v: $t, env: &Env) -> RoostResult<$t> {
                match self.checked_sub(v) {
                    Some(result) => Ok(result),
                    None => {
                        log!(env, "Math error thrown at {}:{}", file!(), line!());
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_mul(self, v: $t, env: &Env) -> RoostResult<$t> {
                match self.checked_mul(v) {
                    Some(result) => Ok(result),
                    None => {
                        log!(env, "Math error thrown at {}:{}", file!(), line!());
                        Err(ErrorCode::MathError)
                    }
                }
            }
        }
    };
}

checked_impl!(u64);
checked_impl!(i128);

/// Reward accrued over the interval `[from, to]` at `rate` units per second.
/// A clock running backwards is a math error, never a silent zero.
pub fn accrued(env: &Env, rate: i128, from: u64, to: u64) -> RoostResult<i128> {
    let elapsed = to.safe_sub(from, env)? as i128;
    elapsed.safe_mul(rate, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;
    use test_case::test_case;

    #[test_case(10, 100, 150 => 500 ; "fifty seconds at ten per second")]
    #[test_case(0, 100, 150 => 0 ; "zero rate accrues nothing")]
    #[test_case(10, 100, 100 => 0 ; "no elapsed time")]
    #[test_case(1, 0, u64::MAX => (u64::MAX as i128) ; "full range elapsed")]
    fn accrued_cases(rate: i128, from: u64, to: u64) -> i128 {
        let env = Env::default();
        accrued(&env, rate, from, to).unwrap()
    }

    #[test]
    fn accrued_rejects_clock_regression() {
        let env = Env::default();
        assert_eq!(accrued(&env, 10, 150, 100), Err(ErrorCode::MathError));
    }

    #[test]
    fn safe_mul_detects_overflow() {
        let env = Env::default();
        assert_eq!(i128::MAX.safe_mul(2, &env), Err(ErrorCode::MathError));
        assert_eq!(2i128.safe_mul(3, &env), Ok(6));
    }

    #[test]
    fn safe_add_detects_overflow() {
        let env = Env::default();
        assert_eq!(i128::MAX.safe_add(1, &env), Err(ErrorCode::MathError));
        assert_eq!(u64::MAX.safe_add(1, &env), Err(ErrorCode::MathError));
    }
}
