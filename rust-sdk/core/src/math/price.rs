//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{CoreError, INVALID_PRICE, TICK_BASE, TICK_INDEX_OUT_OF_BOUNDS, ZERO_SQRT_PRICE};
use ethnum::U256;
use libm::{floor, log, pow};

use super::fixed_point::{try_f64_to_u256, u256_to_f64, Q96_F64};
use super::is_tick_index_in_bounds;

/// Convert a tick index into a price
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
///
/// # Returns
/// - A f64 number representing `1.0001^tick_index`
pub fn tick_index_to_price(tick_index: i32) -> f64 {
    pow(TICK_BASE, tick_index as f64)
}

/// Convert a price into the tick index at or below it
///
/// # Parameters
/// - `price` - A f64 number representing the price
///
/// # Returns
/// - `Ok`: `floor(ln(price) / ln(1.0001))`
/// - `Err`: `INVALID_PRICE` for a non-finite or non-positive price,
///   `TICK_INDEX_OUT_OF_BOUNDS` if the tick falls outside the tick domain
pub fn try_price_to_tick_index(price: f64) -> Result<i32, CoreError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(INVALID_PRICE);
    }

    let tick_index = floor(log(price) / log(TICK_BASE));
    tick_index_from_f64(tick_index)
}

/// Estimate the sqrt price of a tick with floating point math.
///
/// Off-chain estimate only: it can differ from `try_tick_index_to_sqrt_price_x96`
/// in the low-order bits and must not be used to build positions.
///
/// # Returns
/// - `Ok`: `floor(2^96 * 1.0001^(tick_index / 2))`
/// - `Err`: `TICK_INDEX_OUT_OF_BOUNDS` if the tick is outside the tick domain
pub fn try_tick_index_to_sqrt_price_x96_approx(tick_index: i32) -> Result<U256, CoreError> {
    if !is_tick_index_in_bounds(tick_index) {
        return Err(TICK_INDEX_OUT_OF_BOUNDS);
    }

    try_f64_to_u256(pow(TICK_BASE, tick_index as f64 / 2.0) * Q96_F64)
}

/// Estimate the tick of a sqrt price with floating point math.
///
/// Off-chain estimate only: near a tick boundary the result can be one tick off
/// from `try_sqrt_price_x96_to_tick_index`.
///
/// # Returns
/// - `Ok`: `floor(2 * ln(sqrt_price_x96 / 2^96) / ln(1.0001))`
/// - `Err`: `ZERO_SQRT_PRICE` if the sqrt price is zero
pub fn try_sqrt_price_x96_to_tick_index_approx(sqrt_price_x96: U256) -> Result<i32, CoreError> {
    if sqrt_price_x96 == U256::ZERO {
        return Err(ZERO_SQRT_PRICE);
    }

    let sqrt_price = u256_to_f64(sqrt_price_x96) / Q96_F64;
    let tick_index = floor(2.0 * log(sqrt_price) / log(TICK_BASE));
    tick_index_from_f64(tick_index)
}

fn tick_index_from_f64(tick_index: f64) -> Result<i32, CoreError> {
    if !tick_index.is_finite() || tick_index < i32::MIN as f64 || tick_index > i32::MAX as f64 {
        return Err(TICK_INDEX_OUT_OF_BOUNDS);
    }

    let tick_index = tick_index as i32;
    if !is_tick_index_in_bounds(tick_index) {
        return Err(TICK_INDEX_OUT_OF_BOUNDS);
    }

    Ok(tick_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{try_sqrt_price_x96_to_tick_index, try_tick_index_to_sqrt_price_x96, MAX_TICK_INDEX, MIN_TICK_INDEX};
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_index_to_price() {
        assert_eq!(tick_index_to_price(0), 1.0);
        assert_relative_eq!(tick_index_to_price(100), 1.0100496620928754, max_relative = 1e-12);
        assert_relative_eq!(tick_index_to_price(-100), 0.9900503287412106, max_relative = 1e-12);
        assert_relative_eq!(tick_index_to_price(46050), 99.95996595178954, max_relative = 1e-12);
    }

    #[test]
    fn test_price_to_tick_index() {
        assert_eq!(try_price_to_tick_index(1.0), Ok(0));
        assert_eq!(try_price_to_tick_index(2.0), Ok(6931));
        assert_eq!(try_price_to_tick_index(0.5), Ok(-6932));
        assert_eq!(try_price_to_tick_index(35.0), Ok(35555));
        assert_eq!(try_price_to_tick_index(50.0), Ok(39122));
        assert_eq!(try_price_to_tick_index(70.0), Ok(42487));
        assert_eq!(try_price_to_tick_index(4000.0), Ok(82944));
    }

    #[test]
    fn test_price_to_tick_index_invalid() {
        assert_eq!(try_price_to_tick_index(0.0), Err(INVALID_PRICE));
        assert_eq!(try_price_to_tick_index(-2.0), Err(INVALID_PRICE));
        assert_eq!(try_price_to_tick_index(f64::NAN), Err(INVALID_PRICE));
        assert_eq!(try_price_to_tick_index(1e300), Err(TICK_INDEX_OUT_OF_BOUNDS));
        assert_eq!(try_price_to_tick_index(1e-300), Err(TICK_INDEX_OUT_OF_BOUNDS));
    }

    #[test]
    fn test_tick_index_to_sqrt_price_x96_approx() {
        assert_eq!(try_tick_index_to_sqrt_price_x96_approx(0), Ok(U256::new(1 << 96)));
        for tick_index in [-46080, -100, 1, 100, 35550, 46050, MIN_TICK_INDEX, MAX_TICK_INDEX] {
            let approx = u256_to_f64(try_tick_index_to_sqrt_price_x96_approx(tick_index).unwrap());
            let exact = u256_to_f64(try_tick_index_to_sqrt_price_x96(tick_index).unwrap());
            assert_relative_eq!(approx, exact, max_relative = 1e-9);
        }
        assert_eq!(try_tick_index_to_sqrt_price_x96_approx(MAX_TICK_INDEX + 1), Err(TICK_INDEX_OUT_OF_BOUNDS));
    }

    #[test]
    fn test_sqrt_price_x96_to_tick_index_approx() {
        assert_eq!(try_sqrt_price_x96_to_tick_index_approx(U256::new(1 << 96)), Ok(0));
        assert_eq!(try_sqrt_price_x96_to_tick_index_approx(U256::new(560227709747861419891227623424)), Ok(39122));
        assert_eq!(try_sqrt_price_x96_to_tick_index_approx(U256::new((1 << 96) / 10)), Ok(-46055));
        assert_eq!(try_sqrt_price_x96_to_tick_index_approx(U256::ZERO), Err(ZERO_SQRT_PRICE));
    }

    #[test]
    fn test_approx_tick_agrees_with_exact_away_from_boundaries() {
        for tick_index in [-46080, -6932, 100, 39122, 46050] {
            // midway between two ticks
            let lower = u256_to_f64(try_tick_index_to_sqrt_price_x96(tick_index).unwrap());
            let upper = u256_to_f64(try_tick_index_to_sqrt_price_x96(tick_index + 1).unwrap());
            let midpoint = try_f64_to_u256((lower + upper) / 2.0).unwrap();
            assert_eq!(try_sqrt_price_x96_to_tick_index_approx(midpoint), try_sqrt_price_x96_to_tick_index(midpoint));
        }
    }
}
