//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::PositionStatus;

use ethnum::U256;

use super::{order_tick_indexes, try_tick_index_to_sqrt_price_x96};

/// Check if a position is in range.
/// When a position is in range it holds both tokens
///
/// # Parameters
/// - `current_sqrt_price_x96` - A U256 representing the sqrt price of the pool
/// - `tick_index_1` - A i32 integer representing the first tick index of the position
/// - `tick_index_2` - A i32 integer representing the second tick index of the position
///
/// # Returns
/// - A boolean value indicating if the position is in range
pub fn is_position_in_range(current_sqrt_price_x96: U256, tick_index_1: i32, tick_index_2: i32) -> bool {
    position_status(current_sqrt_price_x96, tick_index_1, tick_index_2) == PositionStatus::PriceInRange
}

/// Calculate the status of a position
/// The status can be one of four values:
/// - InRange: The position is in range
/// - BelowRange: The position is below the range and holds only token 0
/// - AboveRange: The position is above the range and holds only token 1
/// - Invalid: The ticks are equal or outside the tick domain
///
/// # Parameters
/// - `current_sqrt_price_x96` - A U256 representing the sqrt price of the pool
/// - `tick_index_1` - A i32 integer representing the first tick index of the position
/// - `tick_index_2` - A i32 integer representing the second tick index of the position
///
/// # Returns
/// - A PositionStatus enum value indicating the status of the position
pub fn position_status(current_sqrt_price_x96: U256, tick_index_1: i32, tick_index_2: i32) -> PositionStatus {
    if tick_index_1 == tick_index_2 {
        return PositionStatus::Invalid;
    }

    let tick_range = order_tick_indexes(tick_index_1, tick_index_2);
    let (Ok(sqrt_price_lower_x96), Ok(sqrt_price_upper_x96)) = (
        try_tick_index_to_sqrt_price_x96(tick_range.tick_lower_index),
        try_tick_index_to_sqrt_price_x96(tick_range.tick_upper_index),
    ) else {
        return PositionStatus::Invalid;
    };

    if current_sqrt_price_x96 <= sqrt_price_lower_x96 {
        PositionStatus::PriceBelowRange
    } else if current_sqrt_price_x96 >= sqrt_price_upper_x96 {
        PositionStatus::PriceAboveRange
    } else {
        PositionStatus::PriceInRange
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_TICK_INDEX, Q96};

    #[test]
    fn test_is_position_in_range() {
        assert!(is_position_in_range(Q96, -5, 5));
        assert!(is_position_in_range(Q96, 5, -5));
        assert!(!is_position_in_range(Q96, 0, 5));
        assert!(!is_position_in_range(Q96, -5, 0));
        assert!(!is_position_in_range(Q96, -5, -1));
        assert!(!is_position_in_range(Q96, 1, 5));
    }

    #[test]
    fn test_position_status() {
        let lower = U256::new(78833030112140176575862854579);
        let upper = U256::new(79625275426524748796330556128);
        assert_eq!(position_status(lower - U256::ONE, -100, 100), PositionStatus::PriceBelowRange);
        assert_eq!(position_status(lower, -100, 100), PositionStatus::PriceBelowRange);
        assert_eq!(position_status(lower + U256::ONE, -100, 100), PositionStatus::PriceInRange);
        assert_eq!(position_status(Q96, -100, 100), PositionStatus::PriceInRange);
        assert_eq!(position_status(upper - U256::ONE, -100, 100), PositionStatus::PriceInRange);
        assert_eq!(position_status(upper, -100, 100), PositionStatus::PriceAboveRange);
        assert_eq!(position_status(upper + U256::ONE, -100, 100), PositionStatus::PriceAboveRange);
        assert_eq!(position_status(Q96, 100, 100), PositionStatus::Invalid);
        assert_eq!(position_status(Q96, -100, MAX_TICK_INDEX + 1), PositionStatus::Invalid);
    }
}
