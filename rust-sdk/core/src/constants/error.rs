//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

pub type CoreError = &'static str;

pub const INVALID_PRICE: CoreError = "Price must be finite and positive";

pub const ZERO_SQRT_PRICE: CoreError = "Sqrt price must be positive";

pub const INVALID_SQRT_PRICE_RANGE: CoreError = "Upper sqrt price must be greater than lower sqrt price";

pub const SQRT_PRICE_OUT_OF_BOUNDS: CoreError = "Sqrt price out of bounds";

pub const TICK_INDEX_OUT_OF_BOUNDS: CoreError = "Tick index out of bounds";

pub const DIVISION_BY_ZERO: CoreError = "Division by zero";

pub const INVALID_TICK_SPACING: CoreError = "Tick spacing must be positive";

pub const INVALID_TICK_RANGE: CoreError = "Aligned lower tick must be less than aligned upper tick";

pub const ARITHMETIC_OVERFLOW: CoreError = "Arithmetic over- or underflow";

pub const SQRT_PRICE_EXCEEDS_MAX_U160: CoreError = "Sqrt price exceeds max u160";

pub const LIQUIDITY_EXCEEDS_MAX_U128: CoreError = "Liquidity exceeds max u128";

pub const AMOUNT_EXCEEDS_MAX_U128: CoreError = "Amount exceeds max u128";

/// The failure class of a `CoreError`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// An input lies outside the domain of the operation (non-positive price,
    /// empty sqrt price range, tick outside the representable range).
    Domain,
    /// A tick spacing or an aligned tick range is unusable.
    InvalidRange,
    /// An intermediate or final value does not fit its target width.
    Overflow,
}

/// Classify a `CoreError` returned by this crate.
///
/// Errors that do not originate from this crate are reported as `None`.
pub fn error_kind(error: CoreError) -> Option<ErrorKind> {
    match error {
        INVALID_PRICE | ZERO_SQRT_PRICE | INVALID_SQRT_PRICE_RANGE | SQRT_PRICE_OUT_OF_BOUNDS | TICK_INDEX_OUT_OF_BOUNDS | DIVISION_BY_ZERO => {
            Some(ErrorKind::Domain)
        }
        INVALID_TICK_SPACING | INVALID_TICK_RANGE => Some(ErrorKind::InvalidRange),
        ARITHMETIC_OVERFLOW | SQRT_PRICE_EXCEEDS_MAX_U160 | LIQUIDITY_EXCEEDS_MAX_U128 | AMOUNT_EXCEEDS_MAX_U128 => Some(ErrorKind::Overflow),
        _ => None,
    }
}
