//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use ethnum::U256;

/// Number of fractional bits of an X96 fixed-point number.
pub const RESOLUTION_X96: u32 = 96;

/// 2^96, the X96 representation of 1.
pub const Q96: U256 = U256::new(1 << 96);

/// 2^160 - 1, the largest value a stored sqrt price can take.
pub const MAX_U160: U256 = U256::from_words(u32::MAX as u128, u128::MAX);

/// The sqrt price of `MIN_TICK_INDEX`.
pub const MIN_SQRT_PRICE_X96: U256 = U256::new(4295128739);

/// The sqrt price of `MAX_TICK_INDEX`: 1461446703485210103287273052203988822378723970342.
pub const MAX_SQRT_PRICE_X96: U256 = U256::from_words(4294805859, 318775800626314356294205765087544249638);
