//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{
    CoreError, TokenAmounts, AMOUNT_EXCEEDS_MAX_U128, INVALID_SQRT_PRICE_RANGE, LIQUIDITY_EXCEEDS_MAX_U128, MAX_U160, RESOLUTION_X96,
    SQRT_PRICE_EXCEEDS_MAX_U160, ZERO_SQRT_PRICE,
};
use ethnum::U256;

use super::{try_mul_div, try_mul_shift_96};

const U128_MAX: U256 = U256::from_words(0, u128::MAX);

fn try_sqrt_price_range_width(sqrt_price_lower_x96: U256, sqrt_price_upper_x96: U256) -> Result<U256, CoreError> {
    if sqrt_price_upper_x96 <= sqrt_price_lower_x96 {
        return Err(INVALID_SQRT_PRICE_RANGE);
    }
    if sqrt_price_lower_x96 == U256::ZERO {
        return Err(ZERO_SQRT_PRICE);
    }
    if sqrt_price_upper_x96 > MAX_U160 {
        return Err(SQRT_PRICE_EXCEEDS_MAX_U160);
    }

    Ok(sqrt_price_upper_x96 - sqrt_price_lower_x96)
}

fn try_into_u128(value: U256, error: CoreError) -> Result<u128, CoreError> {
    if value > U128_MAX {
        return Err(error);
    }
    Ok(value.as_u128())
}

/// Calculate the liquidity minted by a single-sided deposit of token 1.
///
/// The current price is at or above the range, so the whole deposit is token 1
/// and `liquidity = floor(amount * 2^96 / (upper - lower))`. Always rounds down,
/// so the position never claims more than was deposited.
///
/// # Parameters
/// - `amount` - The deposit in the smallest units of token 1
/// - `sqrt_price_lower_x96` - The sqrt price of the lower bound of the range
/// - `sqrt_price_upper_x96` - The sqrt price of the upper bound of the range
///
/// # Returns
/// - `Ok`: The liquidity as a u128
/// - `Err`: `INVALID_SQRT_PRICE_RANGE` if upper is not above lower,
///   `LIQUIDITY_EXCEEDS_MAX_U128` if the liquidity does not fit in 128 bits
pub fn try_deposit_to_liquidity(amount: u128, sqrt_price_lower_x96: U256, sqrt_price_upper_x96: U256) -> Result<u128, CoreError> {
    try_get_liquidity_for_amount_1(sqrt_price_lower_x96, sqrt_price_upper_x96, amount)
}

/// Calculate the token 1 amount backing a liquidity over a range.
///
/// `amount = ceil(liquidity * (upper - lower) / 2^96)`. Always rounds up, so the
/// amount is what a depositor must provide for that liquidity.
///
/// # Parameters
/// - `liquidity` - The liquidity of the position
/// - `sqrt_price_lower_x96` - The sqrt price of the lower bound of the range
/// - `sqrt_price_upper_x96` - The sqrt price of the upper bound of the range
///
/// # Returns
/// - `Ok`: The amount of token 1 as a u128
/// - `Err`: `INVALID_SQRT_PRICE_RANGE` if upper is not above lower,
///   `AMOUNT_EXCEEDS_MAX_U128` if the amount does not fit in 128 bits
pub fn try_liquidity_to_amount(liquidity: u128, sqrt_price_lower_x96: U256, sqrt_price_upper_x96: U256) -> Result<u128, CoreError> {
    try_get_amount_1_for_liquidity(sqrt_price_lower_x96, sqrt_price_upper_x96, liquidity, true)
}

/// Calculate the liquidity for an amount of token 0 over a range.
///
/// `liquidity = floor(amount_0 * (lower * upper / 2^96) / (upper - lower))`
pub fn try_get_liquidity_for_amount_0(sqrt_price_lower_x96: U256, sqrt_price_upper_x96: U256, amount_0: u128) -> Result<u128, CoreError> {
    let width = try_sqrt_price_range_width(sqrt_price_lower_x96, sqrt_price_upper_x96)?;
    let intermediate = try_mul_shift_96(sqrt_price_lower_x96, sqrt_price_upper_x96, false)?;
    let liquidity = try_mul_div(U256::from(amount_0), intermediate, width, false)?;
    try_into_u128(liquidity, LIQUIDITY_EXCEEDS_MAX_U128)
}

/// Calculate the liquidity for an amount of token 1 over a range.
///
/// `liquidity = floor(amount_1 * 2^96 / (upper - lower))`
pub fn try_get_liquidity_for_amount_1(sqrt_price_lower_x96: U256, sqrt_price_upper_x96: U256, amount_1: u128) -> Result<u128, CoreError> {
    let width = try_sqrt_price_range_width(sqrt_price_lower_x96, sqrt_price_upper_x96)?;
    // below 2^224
    let numerator = U256::from(amount_1) << RESOLUTION_X96;
    try_into_u128(numerator / width, LIQUIDITY_EXCEEDS_MAX_U128)
}

/// Calculate the largest liquidity both token amounts can back at the current price.
///
/// # Parameters
/// - `current_sqrt_price_x96` - The sqrt price of the pool
/// - `sqrt_price_lower_x96` - The sqrt price of the lower bound of the range
/// - `sqrt_price_upper_x96` - The sqrt price of the upper bound of the range
/// - `amount_0` - The available amount of token 0
/// - `amount_1` - The available amount of token 1
///
/// # Returns
/// - `Ok`: The liquidity as a u128
/// - `Err`: Any error of the single-sided formulas
pub fn try_get_liquidity_for_amounts(
    current_sqrt_price_x96: U256,
    sqrt_price_lower_x96: U256,
    sqrt_price_upper_x96: U256,
    amount_0: u128,
    amount_1: u128,
) -> Result<u128, CoreError> {
    try_sqrt_price_range_width(sqrt_price_lower_x96, sqrt_price_upper_x96)?;

    if current_sqrt_price_x96 <= sqrt_price_lower_x96 {
        try_get_liquidity_for_amount_0(sqrt_price_lower_x96, sqrt_price_upper_x96, amount_0)
    } else if current_sqrt_price_x96 < sqrt_price_upper_x96 {
        let liquidity_0 = try_get_liquidity_for_amount_0(current_sqrt_price_x96, sqrt_price_upper_x96, amount_0)?;
        let liquidity_1 = try_get_liquidity_for_amount_1(sqrt_price_lower_x96, current_sqrt_price_x96, amount_1)?;
        Ok(liquidity_0.min(liquidity_1))
    } else {
        try_get_liquidity_for_amount_1(sqrt_price_lower_x96, sqrt_price_upper_x96, amount_1)
    }
}

/// Calculate the amount of token 0 backing a liquidity over a range.
///
/// `amount_0 = liquidity * 2^96 * (upper - lower) / upper / lower`
pub fn try_get_amount_0_for_liquidity(
    sqrt_price_lower_x96: U256,
    sqrt_price_upper_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, CoreError> {
    let width = try_sqrt_price_range_width(sqrt_price_lower_x96, sqrt_price_upper_x96)?;
    let numerator = U256::from(liquidity) << RESOLUTION_X96;
    let intermediate = try_mul_div(numerator, width, sqrt_price_upper_x96, round_up)?;

    let quotient = intermediate / sqrt_price_lower_x96;
    let remainder = intermediate % sqrt_price_lower_x96;
    let amount = if round_up && remainder != U256::ZERO {
        quotient + U256::ONE
    } else {
        quotient
    };

    try_into_u128(amount, AMOUNT_EXCEEDS_MAX_U128)
}

/// Calculate the amount of token 1 backing a liquidity over a range.
///
/// `amount_1 = liquidity * (upper - lower) / 2^96`
pub fn try_get_amount_1_for_liquidity(
    sqrt_price_lower_x96: U256,
    sqrt_price_upper_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, CoreError> {
    let width = try_sqrt_price_range_width(sqrt_price_lower_x96, sqrt_price_upper_x96)?;
    let amount = try_mul_shift_96(U256::from(liquidity), width, round_up)?;
    try_into_u128(amount, AMOUNT_EXCEEDS_MAX_U128)
}

/// Calculate both token amounts backing a liquidity at the current price.
///
/// # Parameters
/// - `current_sqrt_price_x96` - The sqrt price of the pool
/// - `sqrt_price_lower_x96` - The sqrt price of the lower bound of the range
/// - `sqrt_price_upper_x96` - The sqrt price of the upper bound of the range
/// - `liquidity` - The liquidity of the position
/// - `round_up` - Round the amounts up (deposits) or down (withdrawals)
///
/// # Returns
/// - `Ok`: The TokenAmounts of the position
/// - `Err`: Any error of the single-sided formulas
pub fn try_get_amounts_for_liquidity(
    current_sqrt_price_x96: U256,
    sqrt_price_lower_x96: U256,
    sqrt_price_upper_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<TokenAmounts, CoreError> {
    try_sqrt_price_range_width(sqrt_price_lower_x96, sqrt_price_upper_x96)?;

    if current_sqrt_price_x96 <= sqrt_price_lower_x96 {
        Ok(TokenAmounts {
            amount_0: try_get_amount_0_for_liquidity(sqrt_price_lower_x96, sqrt_price_upper_x96, liquidity, round_up)?,
            amount_1: 0,
        })
    } else if current_sqrt_price_x96 < sqrt_price_upper_x96 {
        Ok(TokenAmounts {
            amount_0: try_get_amount_0_for_liquidity(current_sqrt_price_x96, sqrt_price_upper_x96, liquidity, round_up)?,
            amount_1: try_get_amount_1_for_liquidity(sqrt_price_lower_x96, current_sqrt_price_x96, liquidity, round_up)?,
        })
    } else {
        Ok(TokenAmounts {
            amount_0: 0,
            amount_1: try_get_amount_1_for_liquidity(sqrt_price_lower_x96, sqrt_price_upper_x96, liquidity, round_up)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{try_tick_index_to_sqrt_price_x96, MAX_SQRT_PRICE_X96, MIN_SQRT_PRICE_X96, Q96};

    const E18: u128 = 1_000_000_000_000_000_000;

    fn sqrt_price(tick_index: i32) -> U256 {
        try_tick_index_to_sqrt_price_x96(tick_index).unwrap()
    }

    #[test]
    fn test_deposit_to_liquidity_doubling_range() {
        let liquidity = try_deposit_to_liquidity(E18, Q96, U256::new(2 << 96)).unwrap();
        assert_eq!(liquidity, E18);
        assert_eq!(try_liquidity_to_amount(liquidity, Q96, U256::new(2 << 96)), Ok(E18));
    }

    #[test]
    fn test_deposit_to_liquidity_wide_band() {
        let lower = U256::new((1 << 96) / 10);
        let upper = U256::new(10 << 96);

        let liquidity = try_deposit_to_liquidity(200 * E18, lower, upper).unwrap();
        assert_eq!(liquidity, 20202020202020202020);
        assert_eq!(try_liquidity_to_amount(liquidity, lower, upper), Ok(199999999999999999999));

        let liquidity = try_deposit_to_liquidity(10 * E18, lower, upper).unwrap();
        assert_eq!(liquidity, 1010101010101010101);
        assert_eq!(try_liquidity_to_amount(liquidity, lower, upper), Ok(10 * E18));
    }

    #[test]
    fn test_deposit_to_liquidity_tick_band() {
        let lower = sqrt_price(40950);
        let upper = sqrt_price(46050);

        let liquidity = try_deposit_to_liquidity(200 * E18, lower, upper).unwrap();
        assert_eq!(liquidity, 88877605423416318691);
        assert_eq!(try_liquidity_to_amount(liquidity, lower, upper), Ok(199999999999999999999));

        let liquidity = try_deposit_to_liquidity(10 * E18, lower, upper).unwrap();
        assert_eq!(liquidity, 4443880271170815934);
        assert_eq!(try_liquidity_to_amount(liquidity, lower, upper), Ok(9999999999999999999));
    }

    #[test]
    fn test_deposit_to_liquidity_default_band() {
        let lower = sqrt_price(-46080);
        let upper = sqrt_price(46050);

        let liquidity = try_deposit_to_liquidity(200 * E18, lower, upper).unwrap();
        assert_eq!(liquidity, 20205840974997667464);
        assert_eq!(try_liquidity_to_amount(liquidity, lower, upper), Ok(199999999999999999997));
    }

    #[test]
    fn test_deposit_to_liquidity_invalid_range() {
        assert_eq!(try_deposit_to_liquidity(E18, Q96, Q96), Err(INVALID_SQRT_PRICE_RANGE));
        assert_eq!(try_deposit_to_liquidity(E18, U256::new(2 << 96), Q96), Err(INVALID_SQRT_PRICE_RANGE));
        assert_eq!(try_liquidity_to_amount(E18, Q96, Q96), Err(INVALID_SQRT_PRICE_RANGE));
        assert_eq!(try_liquidity_to_amount(E18, U256::new(2 << 96), Q96), Err(INVALID_SQRT_PRICE_RANGE));
        assert_eq!(try_deposit_to_liquidity(E18, U256::ZERO, Q96), Err(ZERO_SQRT_PRICE));
        assert_eq!(try_deposit_to_liquidity(E18, Q96, MAX_U160 + U256::ONE), Err(SQRT_PRICE_EXCEEDS_MAX_U160));
    }

    #[test]
    fn test_deposit_to_liquidity_overflow() {
        assert_eq!(try_deposit_to_liquidity(u128::MAX, Q96, Q96 + U256::ONE), Err(LIQUIDITY_EXCEEDS_MAX_U128));
        assert_eq!(try_liquidity_to_amount(u128::MAX, MIN_SQRT_PRICE_X96, MAX_SQRT_PRICE_X96), Err(AMOUNT_EXCEEDS_MAX_U128));
    }

    #[test]
    fn test_deposit_to_liquidity_zero_amount() {
        assert_eq!(try_deposit_to_liquidity(0, Q96, U256::new(2 << 96)), Ok(0));
        assert_eq!(try_liquidity_to_amount(0, Q96, U256::new(2 << 96)), Ok(0));
    }

    #[test]
    fn test_deposit_to_liquidity_is_monotonic() {
        let lower = Q96;
        let upper = Q96 + U256::from_words(0, 1 << 80);
        assert_eq!(try_deposit_to_liquidity(1, lower, upper), Ok(65536));
        assert_eq!(try_deposit_to_liquidity(2, lower, upper), Ok(131072));
        assert_eq!(try_deposit_to_liquidity(3, lower, upper), Ok(196608));

        let mut previous = 0;
        for amount in 1..200 {
            let liquidity = try_deposit_to_liquidity(amount, lower, upper).unwrap();
            assert!(liquidity > previous);
            previous = liquidity;
        }
    }

    #[test]
    fn test_rounding_is_conservative() {
        let ranges = [(Q96, U256::new(2 << 96)), (U256::new((1 << 96) / 10), U256::new(10 << 96)), (sqrt_price(-46080), sqrt_price(46050)), (sqrt_price(100), sqrt_price(130))];
        for (lower, upper) in ranges {
            for amount in [1, 7, 999, E18, 200 * E18 + 1, 123456789012345678901234567] {
                let liquidity = try_deposit_to_liquidity(amount, lower, upper).unwrap();
                let recovered = try_liquidity_to_amount(liquidity, lower, upper).unwrap();
                assert!(recovered <= amount + 1, "{amount} -> {recovered}");
                if upper - lower <= Q96 {
                    assert!(recovered + 1 >= amount, "{amount} -> {recovered}");
                }
            }
        }
    }

    #[test]
    fn test_liquidity_for_amount_0() {
        assert_eq!(try_get_liquidity_for_amount_0(Q96, U256::new(2 << 96), E18), Ok(2 * E18));
        assert_eq!(try_get_amount_0_for_liquidity(Q96, U256::new(2 << 96), 2 * E18, true), Ok(E18));
        assert_eq!(try_get_amount_0_for_liquidity(Q96, U256::new(2 << 96), 2 * E18, false), Ok(E18));
        assert_eq!(try_get_liquidity_for_amount_0(Q96, Q96, E18), Err(INVALID_SQRT_PRICE_RANGE));
    }

    #[test]
    fn test_liquidity_for_amounts() {
        let lower = sqrt_price(-46080);
        let upper = sqrt_price(46050);
        let current = U256::new(560227709747861419891227623424);

        // below range: token 0 only
        assert_eq!(try_get_liquidity_for_amounts(lower, lower, upper, E18, 200 * E18), Ok(100877782234052748));
        // in range: the scarcer side
        assert_eq!(try_get_liquidity_for_amounts(current, lower, upper, E18, 200 * E18), Ok(24153811548651414531));
        // above range: token 1 only
        assert_eq!(try_get_liquidity_for_amounts(upper, lower, upper, E18, 200 * E18), Ok(20205840974997667464));
        assert_eq!(try_get_liquidity_for_amounts(current, upper, lower, E18, E18), Err(INVALID_SQRT_PRICE_RANGE));
    }

    #[test]
    fn test_amounts_for_liquidity() {
        let lower = sqrt_price(-46080);
        let upper = sqrt_price(46050);
        let current = U256::new(560227709747861419891227623424);

        let amounts = try_get_amounts_for_liquidity(current, lower, upper, 24153811548651414531, true).unwrap();
        assert_eq!(amounts, TokenAmounts { amount_0: E18, amount_1: 168380995487808508135 });

        let amounts = try_get_amounts_for_liquidity(current, lower, upper, 24153811548651414531, false).unwrap();
        assert_eq!(amounts, TokenAmounts { amount_0: 999999999999999999, amount_1: 168380995487808508134 });

        let amounts = try_get_amounts_for_liquidity(MIN_SQRT_PRICE_X96, lower, upper, 100 * E18, true).unwrap();
        assert_eq!(amounts, TokenAmounts { amount_0: 991298557376924166354, amount_1: 0 });

        let amounts = try_get_amounts_for_liquidity(upper, lower, upper, 100 * E18, false).unwrap();
        assert_eq!(amounts, TokenAmounts { amount_0: 0, amount_1: 989812798425347835525 });
    }
}
