//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

/// The minimum tick index. Its sqrt price is `MIN_SQRT_PRICE_X96`.
pub const MIN_TICK_INDEX: i32 = -887272;

/// The maximum tick index. Its sqrt price is `MAX_SQRT_PRICE_X96`.
pub const MAX_TICK_INDEX: i32 = 887272;

/// The geometric base of the tick grid: price = TICK_BASE ^ tick.
pub const TICK_BASE: f64 = 1.0001;
