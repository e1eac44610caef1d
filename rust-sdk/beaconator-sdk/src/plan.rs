//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{rescale_amount, u128_deserialize, u128_serialize, u256_deserialize, u256_serialize, PlanError, PositionConfig};
use beaconator_core::{
    try_align_tick_range, try_deposit_to_liquidity, try_liquidity_to_amount, try_price_to_tick_index, try_tick_index_to_sqrt_price_x96,
    INVALID_PRICE, INVALID_TICK_RANGE,
};
use ethnum::U256;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A single-sided position ready to be submitted.
///
/// Every value is exact: the sqrt prices come from the integer tick math and the
/// liquidity is rounded down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPlan {
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    #[serde(serialize_with = "u256_serialize", deserialize_with = "u256_deserialize")]
    pub sqrt_price_lower_x96: U256,
    #[serde(serialize_with = "u256_serialize", deserialize_with = "u256_deserialize")]
    pub sqrt_price_upper_x96: U256,
    /// The deposit, in the smallest units of the deposit token.
    #[serde(serialize_with = "u128_serialize", deserialize_with = "u128_deserialize")]
    pub amount: u128,
    #[serde(serialize_with = "u128_serialize", deserialize_with = "u128_deserialize")]
    pub liquidity: u128,
}

impl PositionPlan {
    /// The deposit the liquidity actually requires, rounded up. Never more than `amount`.
    pub fn try_required_amount(&self) -> Result<u128, PlanError> {
        Ok(try_liquidity_to_amount(self.liquidity, self.sqrt_price_lower_x96, self.sqrt_price_upper_x96)?)
    }

    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Plan a position over a tick band.
///
/// The lower tick is aligned down and the upper tick aligned up to the tick
/// spacing, so the planned band always contains the requested one. Both bounds
/// may fall on the same unaligned tick; the widened band is then one spacing wide.
///
/// # Parameters
/// - `tick_lower_index` - The requested lower tick
/// - `tick_upper_index` - The requested upper tick
/// - `amount` - The deposit in the smallest units of the deposit token
/// - `config` - The position configuration
///
/// # Returns
/// - `Ok`: The PositionPlan
/// - `Err`: `PlanError::InvalidConfig`, or `PlanError::Core` if the band is empty,
///   outside the tick domain, or the liquidity overflows
pub fn plan_position_for_tick_band(tick_lower_index: i32, tick_upper_index: i32, amount: u128, config: &PositionConfig) -> Result<PositionPlan, PlanError> {
    config.validate()?;

    if tick_lower_index > tick_upper_index {
        return Err(INVALID_TICK_RANGE.into());
    }

    let tick_range = try_align_tick_range(tick_lower_index, tick_upper_index, config.tick_spacing)?;
    if tick_range.tick_lower_index != tick_lower_index || tick_range.tick_upper_index != tick_upper_index {
        warn!(
            target: "log",
            "Tick band [{}, {}] widened to [{}, {}] for tick spacing {}",
            tick_lower_index, tick_upper_index, tick_range.tick_lower_index, tick_range.tick_upper_index, config.tick_spacing
        );
    }

    let sqrt_price_lower_x96 = try_tick_index_to_sqrt_price_x96(tick_range.tick_lower_index)?;
    let sqrt_price_upper_x96 = try_tick_index_to_sqrt_price_x96(tick_range.tick_upper_index)?;
    let liquidity = try_deposit_to_liquidity(amount, sqrt_price_lower_x96, sqrt_price_upper_x96)?;

    debug!(
        target: "log",
        "Planned position: ticks [{}, {}], sqrt prices [{}, {}], amount {}, liquidity {}",
        tick_range.tick_lower_index, tick_range.tick_upper_index, sqrt_price_lower_x96, sqrt_price_upper_x96, amount, liquidity
    );

    Ok(PositionPlan {
        tick_lower_index: tick_range.tick_lower_index,
        tick_upper_index: tick_range.tick_upper_index,
        sqrt_price_lower_x96,
        sqrt_price_upper_x96,
        amount,
        liquidity,
    })
}

/// Plan a position over a price band.
///
/// Prices are token 1 per token 0 in raw units. Each bound is converted to the
/// tick at or below it before the band is aligned.
pub fn plan_position_for_price_band(price_lower: f64, price_upper: f64, amount: u128, config: &PositionConfig) -> Result<PositionPlan, PlanError> {
    if price_lower.is_nan() || price_upper.is_nan() || price_lower >= price_upper {
        return Err(INVALID_PRICE.into());
    }

    let tick_lower_index = try_price_to_tick_index(price_lower)?;
    let tick_upper_index = try_price_to_tick_index(price_upper)?;
    debug!(target: "log", "Price band [{}, {}] maps to ticks [{}, {}]", price_lower, price_upper, tick_lower_index, tick_upper_index);

    plan_position_for_tick_band(tick_lower_index, tick_upper_index, amount, config)
}

/// Plan a position over the configured default tick band.
pub fn plan_default_position(amount: u128, config: &PositionConfig) -> Result<PositionPlan, PlanError> {
    let tick_range = config.default_tick_range();
    plan_position_for_tick_band(tick_range.tick_lower_index, tick_range.tick_upper_index, amount, config)
}

/// Plan a position over the default band from a margin deposit.
///
/// The margin is given at the margin token's precision and rescaled to the
/// deposit token's precision first.
pub fn plan_position_for_margin(margin_amount: u128, config: &PositionConfig) -> Result<PositionPlan, PlanError> {
    let amount = rescale_amount(margin_amount, config.margin_decimals, config.deposit_decimals)?;
    plan_default_position(amount, config)
}
