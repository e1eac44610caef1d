//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{
    CoreError, TickRange, TickRounding, ARITHMETIC_OVERFLOW, INVALID_TICK_RANGE, INVALID_TICK_SPACING, MAX_SQRT_PRICE_X96, MAX_TICK_INDEX,
    MIN_SQRT_PRICE_X96, MIN_TICK_INDEX, SQRT_PRICE_OUT_OF_BOUNDS, TICK_INDEX_OUT_OF_BOUNDS,
};
use ethnum::{I256, U256};

const Q128: U256 = U256::from_words(1, 0);

// 1 / sqrt(1.0001)^(2^i) as Q128.128, for i in 0..20
const INVERSE_SQRT_RATIOS_X128: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

// log_sqrt(1.0001)(2) as Q128.128 divided by 2^64
const LOG_SQRT_10001_MULTIPLIER: i128 = 255738958999603826347141;
// Error bounds of the log approximation, as Q128.128
const TICK_LOW_ERROR_MARGIN: i128 = 3402992956809132418596140100660247210;
const TICK_HIGH_ERROR_MARGIN_COMPLEMENT: i128 = 48942902148948840556346986278370122961;

/// Check if a tick is within the bounds of the tick index range.
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
///
/// # Returns
/// - A boolean value indicating if the tick is in bounds
pub fn is_tick_index_in_bounds(tick_index: i32) -> bool {
    (MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&tick_index)
}

/// Check if a tick is a multiple of the tick spacing.
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
/// - `tick_spacing` - A i32 integer representing the tick spacing
///
/// # Returns
/// - A boolean value indicating if the tick can be used as a position bound
pub fn is_tick_aligned(tick_index: i32, tick_spacing: i32) -> bool {
    tick_spacing > 0 && tick_index % tick_spacing == 0
}

/// Get the sqrt price for a tick index.
///
/// The result is `sqrt(1.0001^tick_index) * 2^96`, rounded up so that
/// `try_sqrt_price_x96_to_tick_index` maps it back onto the same tick.
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
///
/// # Returns
/// - `Ok`: A U256 representing the sqrt price as a Q64.96 number
/// - `Err`: `TICK_INDEX_OUT_OF_BOUNDS` if the tick is outside `[MIN_TICK_INDEX, MAX_TICK_INDEX]`
pub fn try_tick_index_to_sqrt_price_x96(tick_index: i32) -> Result<U256, CoreError> {
    if !is_tick_index_in_bounds(tick_index) {
        return Err(TICK_INDEX_OUT_OF_BOUNDS);
    }

    let abs_tick_index = tick_index.unsigned_abs();

    let mut ratio = Q128;
    for (bit, multiplier) in INVERSE_SQRT_RATIOS_X128.iter().enumerate() {
        if abs_tick_index & (1 << bit) != 0 {
            ratio = (ratio * U256::new(*multiplier)) >> 128u32;
        }
    }

    if tick_index > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 to Q64.96, rounding up
    let remainder = ratio & U256::new(0xffff_ffff);
    let sqrt_price_x96: U256 = (ratio >> 32u32) + if remainder == U256::ZERO { U256::ZERO } else { U256::ONE };

    Ok(sqrt_price_x96)
}

/// Get the tick index for a sqrt price.
///
/// Returns the greatest tick whose sqrt price is less than or equal to the input.
///
/// # Parameters
/// - `sqrt_price_x96` - A U256 representing the sqrt price as a Q64.96 number
///
/// # Returns
/// - `Ok`: A i32 integer representing the tick integer
/// - `Err`: `SQRT_PRICE_OUT_OF_BOUNDS` if the sqrt price is outside `[MIN_SQRT_PRICE_X96, MAX_SQRT_PRICE_X96)`
pub fn try_sqrt_price_x96_to_tick_index(sqrt_price_x96: U256) -> Result<i32, CoreError> {
    if sqrt_price_x96 < MIN_SQRT_PRICE_X96 || sqrt_price_x96 >= MAX_SQRT_PRICE_X96 {
        return Err(SQRT_PRICE_OUT_OF_BOUNDS);
    }

    // Q128.128, below 2^192
    let ratio: U256 = sqrt_price_x96 << 32u32;
    let msb = 255 - ratio.leading_zeros();

    // Normalize to 127 fractional bits
    let mut r: U256 = if msb >= 128 { ratio >> (msb - 127) } else { ratio << (127 - msb) };
    let mut log_2: i128 = (msb as i128 - 128) << 64;

    for i in 0..14 {
        r = (r * r) >> 127u32;
        let (_, f) = (r >> 128u32).into_words();
        let f = f as u32;
        log_2 |= (f as i128) << (63 - i);
        r >>= f;
    }

    let log_sqrt_10001: I256 = I256::from(log_2) * I256::from(LOG_SQRT_10001_MULTIPLIER);

    let tick_low = ((log_sqrt_10001 - I256::from(TICK_LOW_ERROR_MARGIN)) >> 128u32).as_i32();
    let tick_high = ((log_sqrt_10001 - I256::from(TICK_HIGH_ERROR_MARGIN_COMPLEMENT)) >> 128u32).as_i32() + 1;

    if tick_low == tick_high {
        return Ok(tick_low);
    }

    if try_tick_index_to_sqrt_price_x96(tick_high)? <= sqrt_price_x96 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

/// Align a tick down to the nearest multiple of the tick spacing.
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
/// - `tick_spacing` - A i32 integer representing the tick spacing
///
/// # Returns
/// - `Ok`: The greatest multiple of `tick_spacing` that is less than or equal to `tick_index`
/// - `Err`: `INVALID_TICK_SPACING` if the tick spacing is not positive
pub fn try_align_tick_down(tick_index: i32, tick_spacing: i32) -> Result<i32, CoreError> {
    if tick_spacing <= 0 {
        return Err(INVALID_TICK_SPACING);
    }

    tick_index.div_euclid(tick_spacing).checked_mul(tick_spacing).ok_or(ARITHMETIC_OVERFLOW)
}

/// Align a tick up to the nearest multiple of the tick spacing.
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
/// - `tick_spacing` - A i32 integer representing the tick spacing
///
/// # Returns
/// - `Ok`: The least multiple of `tick_spacing` that is greater than or equal to `tick_index`
/// - `Err`: `INVALID_TICK_SPACING` if the tick spacing is not positive
pub fn try_align_tick_up(tick_index: i32, tick_spacing: i32) -> Result<i32, CoreError> {
    if tick_spacing <= 0 {
        return Err(INVALID_TICK_SPACING);
    }

    let quotient = tick_index.div_euclid(tick_spacing);
    let quotient = if tick_index.rem_euclid(tick_spacing) == 0 {
        quotient
    } else {
        quotient + 1
    };

    quotient.checked_mul(tick_spacing).ok_or(ARITHMETIC_OVERFLOW)
}

/// Align a tick to a multiple of the tick spacing in the given direction.
pub fn try_align_tick_index(tick_index: i32, tick_spacing: i32, rounding: TickRounding) -> Result<i32, CoreError> {
    match rounding {
        TickRounding::Down => try_align_tick_down(tick_index, tick_spacing),
        TickRounding::Up => try_align_tick_up(tick_index, tick_spacing),
    }
}

/// Widen a tick range outward to the tick spacing.
///
/// The lower tick is aligned down and the upper tick is aligned up.
///
/// # Parameters
/// - `tick_lower_index` - A i32 integer representing the lower tick of the range
/// - `tick_upper_index` - A i32 integer representing the upper tick of the range
/// - `tick_spacing` - A i32 integer representing the tick spacing
///
/// # Returns
/// - `Ok`: The aligned TickRange
/// - `Err`: `INVALID_TICK_SPACING`, or `INVALID_TICK_RANGE` if the aligned lower tick is not below the aligned upper tick
pub fn try_align_tick_range(tick_lower_index: i32, tick_upper_index: i32, tick_spacing: i32) -> Result<TickRange, CoreError> {
    let tick_lower_index = try_align_tick_down(tick_lower_index, tick_spacing)?;
    let tick_upper_index = try_align_tick_up(tick_upper_index, tick_spacing)?;

    if tick_lower_index >= tick_upper_index {
        return Err(INVALID_TICK_RANGE);
    }

    Ok(TickRange {
        tick_lower_index,
        tick_upper_index,
    })
}

/// Get the minimum and maximum usable tick indexes for a tick spacing.
///
/// # Parameters
/// - `tick_spacing` - A i32 integer representing the tick spacing
///
/// # Returns
/// - `Ok`: A TickRange covering every initializable tick
/// - `Err`: `INVALID_TICK_SPACING` if the tick spacing is not positive
pub fn try_get_full_range_tick_indexes(tick_spacing: i32) -> Result<TickRange, CoreError> {
    Ok(TickRange {
        tick_lower_index: try_align_tick_up(MIN_TICK_INDEX, tick_spacing)?,
        tick_upper_index: try_align_tick_down(MAX_TICK_INDEX, tick_spacing)?,
    })
}

/// Order tick indexes in ascending order.
///
/// # Parameters
/// - `tick_index_1` - A i32 integer representing the first tick index
/// - `tick_index_2` - A i32 integer representing the second tick index
///
/// # Returns
/// - A TickRange struct containing the lower and upper tick index
pub fn order_tick_indexes(tick_index_1: i32, tick_index_2: i32) -> TickRange {
    if tick_index_1 < tick_index_2 {
        TickRange {
            tick_lower_index: tick_index_1,
            tick_upper_index: tick_index_2,
        }
    } else {
        TickRange {
            tick_lower_index: tick_index_2,
            tick_upper_index: tick_index_1,
        }
    }
}

/// Get the tick index of the inverted price (token order swapped).
pub fn invert_tick_index(tick_index: i32) -> i32 {
    -tick_index
}
