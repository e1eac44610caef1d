//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{CoreError, ARITHMETIC_OVERFLOW, INVALID_PRICE, SQRT_PRICE_EXCEEDS_MAX_U160, ZERO_SQRT_PRICE};
use ethnum::U256;
use libm::{pow, sqrt};

pub(crate) const Q96_F64: f64 = 79228162514264337593543950336.0;
const TWO_POW_128_F64: f64 = 340282366920938463463374607431768211456.0;
const TWO_POW_160_F64: f64 = 1461501637330902918203684832716283019655932542976.0;
const TWO_POW_256_F64: f64 = 115792089237316195423570985008687907853269984665640564039457584007913129639936.0;

const F64_MANTISSA_BITS: u32 = 52;
const F64_EXPONENT_BIAS: i32 = 1023;

/// Floor a non-negative finite f64 into a U256.
///
/// The float is split into its mantissa and exponent, so the result is the exact
/// integer part of the value rather than a rounded decimal rendering.
pub(crate) fn try_f64_to_u256(value: f64) -> Result<U256, CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(INVALID_PRICE);
    }
    if value >= TWO_POW_256_F64 {
        return Err(ARITHMETIC_OVERFLOW);
    }

    let bits = value.to_bits();
    let biased_exponent = ((bits >> F64_MANTISSA_BITS) & 0x7ff) as i32;
    if biased_exponent == 0 {
        // zero or subnormal
        return Ok(U256::ZERO);
    }

    let mantissa = U256::from((bits & ((1 << F64_MANTISSA_BITS) - 1)) | (1 << F64_MANTISSA_BITS));
    let shift = biased_exponent - F64_EXPONENT_BIAS - F64_MANTISSA_BITS as i32;

    if shift >= 0 {
        Ok(mantissa << shift as u32)
    } else if shift > -(F64_MANTISSA_BITS as i32 + 1) {
        Ok(mantissa >> (-shift) as u32)
    } else {
        Ok(U256::ZERO)
    }
}

/// Convert a U256 to the nearest f64.
pub(crate) fn u256_to_f64(value: U256) -> f64 {
    let (hi, lo) = value.into_words();
    hi as f64 * TWO_POW_128_F64 + lo as f64
}

/// Convert a price into a sqrt price
///
/// # Parameters
/// - `price` - A f64 representing the price (token 1 per token 0, in raw units)
///
/// # Returns
/// - `Ok`: `floor(sqrt(price) * 2^96)` as a U256
/// - `Err`: `INVALID_PRICE` for a non-finite or non-positive price,
///   `ZERO_SQRT_PRICE` if the sqrt price floors to zero,
///   `SQRT_PRICE_EXCEEDS_MAX_U160` if it does not fit in 160 bits
pub fn try_price_to_sqrt_price_x96(price: f64) -> Result<U256, CoreError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(INVALID_PRICE);
    }

    let sqrt_price_x96 = sqrt(price) * Q96_F64;
    if sqrt_price_x96 >= TWO_POW_160_F64 {
        return Err(SQRT_PRICE_EXCEEDS_MAX_U160);
    }

    let sqrt_price_x96 = try_f64_to_u256(sqrt_price_x96)?;
    if sqrt_price_x96 == U256::ZERO {
        return Err(ZERO_SQRT_PRICE);
    }

    Ok(sqrt_price_x96)
}

/// Convert a sqrt price into a price
///
/// # Parameters
/// - `sqrt_price_x96` - A U256 representing the sqrt price as a Q64.96 number
///
/// # Returns
/// - A f64 representing the price (token 1 per token 0, in raw units)
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / Q96_F64;
    sqrt_price * sqrt_price
}

/// Convert a human price into a sqrt price
///
/// # Parameters
/// - `price` - A f64 representing the price of token 0 in units of token 1
/// - `decimals_0` - A u8 representing the number of decimals of token 0
/// - `decimals_1` - A u8 representing the number of decimals of token 1
///
/// # Returns
/// - `Ok`: The sqrt price of the raw price as a U256
/// - `Err`: See `try_price_to_sqrt_price_x96`
pub fn try_price_to_sqrt_price_x96_with_decimals(price: f64, decimals_0: u8, decimals_1: u8) -> Result<U256, CoreError> {
    let power = pow(10f64, decimals_1 as f64 - decimals_0 as f64);
    try_price_to_sqrt_price_x96(price * power)
}

/// Convert a sqrt price into a human price
///
/// # Parameters
/// - `sqrt_price_x96` - A U256 representing the sqrt price as a Q64.96 number
/// - `decimals_0` - A u8 representing the number of decimals of token 0
/// - `decimals_1` - A u8 representing the number of decimals of token 1
///
/// # Returns
/// - A f64 representing the price of token 0 in units of token 1
pub fn sqrt_price_x96_to_price_with_decimals(sqrt_price_x96: U256, decimals_0: u8, decimals_1: u8) -> f64 {
    let power = pow(10f64, decimals_0 as f64 - decimals_1 as f64);
    sqrt_price_x96_to_price(sqrt_price_x96) * power
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_f64_to_u256() {
        assert_eq!(try_f64_to_u256(0.0), Ok(U256::ZERO));
        assert_eq!(try_f64_to_u256(0.999), Ok(U256::ZERO));
        assert_eq!(try_f64_to_u256(1.5), Ok(U256::ONE));
        assert_eq!(try_f64_to_u256(123456789.75), Ok(U256::new(123456789)));
        assert_eq!(try_f64_to_u256(Q96_F64), Ok(U256::new(1 << 96)));
        assert_eq!(try_f64_to_u256(TWO_POW_160_F64), Ok(U256::from_words(1 << 32, 0)));
        assert_eq!(try_f64_to_u256(f64::MIN_POSITIVE / 2.0), Ok(U256::ZERO));
        assert_eq!(try_f64_to_u256(TWO_POW_256_F64), Err(ARITHMETIC_OVERFLOW));
        assert_eq!(try_f64_to_u256(-1.0), Err(INVALID_PRICE));
        assert_eq!(try_f64_to_u256(f64::NAN), Err(INVALID_PRICE));
    }

    #[test]
    fn test_u256_to_f64() {
        assert_eq!(u256_to_f64(U256::ZERO), 0.0);
        assert_eq!(u256_to_f64(U256::new(1 << 96)), Q96_F64);
        assert_eq!(u256_to_f64(U256::from_words(1, 0)), TWO_POW_128_F64);
    }

    #[test]
    fn test_price_to_sqrt_price_x96() {
        assert_eq!(try_price_to_sqrt_price_x96(1.0), Ok(U256::new(79228162514264337593543950336)));
        assert_eq!(try_price_to_sqrt_price_x96(100.0), Ok(U256::new(792281625142643375935439503360)));
        assert_eq!(try_price_to_sqrt_price_x96(0.01), Ok(U256::new(7922816251426434199159046144)));
        assert_eq!(try_price_to_sqrt_price_x96(50.0), Ok(U256::new(560227709747861419891227623424)));
        assert_eq!(try_price_to_sqrt_price_x96(2.0), Ok(U256::new(112045541949572287496682733568)));
        assert_eq!(try_price_to_sqrt_price_x96(1e-12), Ok(U256::new(79228162514264334008320)));
    }

    #[test]
    fn test_price_to_sqrt_price_x96_invalid() {
        assert_eq!(try_price_to_sqrt_price_x96(0.0), Err(INVALID_PRICE));
        assert_eq!(try_price_to_sqrt_price_x96(-1.0), Err(INVALID_PRICE));
        assert_eq!(try_price_to_sqrt_price_x96(f64::NAN), Err(INVALID_PRICE));
        assert_eq!(try_price_to_sqrt_price_x96(f64::INFINITY), Err(INVALID_PRICE));
        assert_eq!(try_price_to_sqrt_price_x96(1e-80), Err(ZERO_SQRT_PRICE));
        assert_eq!(try_price_to_sqrt_price_x96(1e100), Err(SQRT_PRICE_EXCEEDS_MAX_U160));
    }

    #[test]
    fn test_sqrt_price_x96_to_price() {
        assert_eq!(sqrt_price_x96_to_price(U256::new(1 << 96)), 1.0);
        assert_eq!(sqrt_price_x96_to_price(U256::new(10 << 96)), 100.0);
        assert_relative_eq!(sqrt_price_x96_to_price(U256::new(560227709747861419891227623424)), 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_price_round_trip() {
        for price in [1e-12, 0.0001, 0.01, 0.5, 1.0, 2.0, 35.0, 50.0, 70.0, 4000.0, 1e6, 1e20] {
            let sqrt_price_x96 = try_price_to_sqrt_price_x96(price).unwrap();
            assert_relative_eq!(sqrt_price_x96_to_price(sqrt_price_x96), price, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_price_with_decimals() {
        // 4000 token 1 (6 decimals) per token 0 (18 decimals)
        let sqrt_price_x96 = try_price_to_sqrt_price_x96_with_decimals(4000.0, 18, 6).unwrap();
        assert_relative_eq!(u256_to_f64(sqrt_price_x96), 5010828967500958937382912.0, max_relative = 1e-12);
        assert_relative_eq!(sqrt_price_x96_to_price_with_decimals(sqrt_price_x96, 18, 6), 4000.0, max_relative = 1e-9);

        let sqrt_price_x96 = try_price_to_sqrt_price_x96_with_decimals(50.0, 18, 18).unwrap();
        assert_eq!(sqrt_price_x96, U256::new(560227709747861419891227623424));
    }
}
