//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::PlanError;

/// The largest supported number of token decimals. `10^38` is the largest power of ten in a u128.
pub const MAX_DECIMALS: u8 = 38;

fn invalid_amount(input: impl ToString, reason: &'static str) -> PlanError {
    PlanError::InvalidAmount {
        input: input.to_string(),
        reason,
    }
}

fn power_of_ten(exponent: u8, input: impl ToString) -> Result<u128, PlanError> {
    10u128.checked_pow(exponent as u32).ok_or_else(|| invalid_amount(input, "too many decimals"))
}

fn parse_digits(digits: &str, text: &str) -> Result<u128, PlanError> {
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid_amount(text, "not a decimal number"));
    }
    digits.parse::<u128>().map_err(|_| invalid_amount(text, "amount exceeds max u128"))
}

/// Parse a decimal token amount into its smallest units.
///
/// `"1.5"` with 6 decimals is `1_500_000`. Signs, exponents, separators and
/// fractional digits beyond `decimals` are rejected.
///
/// # Parameters
/// - `text` - The decimal amount, e.g. `"200"` or `"0.25"`
/// - `decimals` - The number of decimals of the token
///
/// # Returns
/// - `Ok`: The amount in the smallest units of the token
/// - `Err`: `PlanError::InvalidAmount` if the text is not a valid amount
pub fn parse_token_amount(text: &str, decimals: u8) -> Result<u128, PlanError> {
    if decimals > MAX_DECIMALS {
        return Err(invalid_amount(text, "too many decimals"));
    }

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    if integer.is_empty() {
        return Err(invalid_amount(text, "missing integer part"));
    }

    let scale = power_of_ten(decimals, text)?;
    let mut amount = parse_digits(integer, text)?
        .checked_mul(scale)
        .ok_or_else(|| invalid_amount(text, "amount exceeds max u128"))?;

    if let Some(fraction) = fraction {
        if fraction.is_empty() {
            return Err(invalid_amount(text, "missing fractional part"));
        }
        if fraction.len() > decimals as usize {
            return Err(invalid_amount(text, "more fractional digits than token decimals"));
        }

        let fraction_scale = power_of_ten(decimals - fraction.len() as u8, text)?;
        let fraction = parse_digits(fraction, text)? * fraction_scale;
        amount = amount
            .checked_add(fraction)
            .ok_or_else(|| invalid_amount(text, "amount exceeds max u128"))?;
    }

    Ok(amount)
}

/// Format an amount in smallest units as a decimal string, trailing zeros included.
pub fn format_token_amount(amount: u128, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let digits = format!("{:0>width$}", amount, width = decimals as usize + 1);
    let (integer, fraction) = digits.split_at(digits.len() - decimals as usize);
    format!("{}.{}", integer, fraction)
}

/// Convert an amount between token precisions.
///
/// Scaling up is exact; scaling down rounds toward zero.
///
/// # Parameters
/// - `amount` - The amount in smallest units at `from_decimals`
/// - `from_decimals` - The precision of `amount`
/// - `to_decimals` - The precision of the result
///
/// # Returns
/// - `Ok`: The amount in smallest units at `to_decimals`
/// - `Err`: `PlanError::InvalidAmount` if the result does not fit in a u128
pub fn rescale_amount(amount: u128, from_decimals: u8, to_decimals: u8) -> Result<u128, PlanError> {
    if to_decimals >= from_decimals {
        let scale = power_of_ten(to_decimals - from_decimals, amount)?;
        amount
            .checked_mul(scale)
            .ok_or_else(|| invalid_amount(amount, "amount exceeds max u128"))
    } else {
        match 10u128.checked_pow((from_decimals - to_decimals) as u32) {
            Some(scale) => Ok(amount / scale),
            None => Ok(0),
        }
    }
}
