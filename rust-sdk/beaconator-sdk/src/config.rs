//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{PlanError, MAX_DECIMALS};
use beaconator_core::{is_tick_aligned, is_tick_index_in_bounds, TickRange};
use serde::{Deserialize, Serialize};

/// The default tick spacing of the perp pools.
pub const DEFAULT_TICK_SPACING: i32 = 30;

/// The default number of decimals of the deposited token.
pub const DEFAULT_DEPOSIT_DECIMALS: u8 = 18;

/// The default number of decimals of the margin token (USDC).
pub const DEFAULT_MARGIN_DECIMALS: u8 = 6;

/// The default lower tick of a position, a price of about 0.01.
pub const DEFAULT_TICK_LOWER_INDEX: i32 = -46080;

/// The default upper tick of a position, a price of about 100.
pub const DEFAULT_TICK_UPPER_INDEX: i32 = 46050;

/// Parameters for planning positions.
///
/// Missing fields take their `DEFAULT_*` value when loaded from TOML.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    pub tick_spacing: i32,
    pub deposit_decimals: u8,
    pub margin_decimals: u8,
    pub default_tick_lower_index: i32,
    pub default_tick_upper_index: i32,
}

impl Default for PositionConfig {
    fn default() -> Self {
        PositionConfig {
            tick_spacing: DEFAULT_TICK_SPACING,
            deposit_decimals: DEFAULT_DEPOSIT_DECIMALS,
            margin_decimals: DEFAULT_MARGIN_DECIMALS,
            default_tick_lower_index: DEFAULT_TICK_LOWER_INDEX,
            default_tick_upper_index: DEFAULT_TICK_UPPER_INDEX,
        }
    }
}

impl PositionConfig {
    /// Load and validate a configuration from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, PlanError> {
        let config: PositionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The default tick band of a position.
    pub fn default_tick_range(&self) -> TickRange {
        TickRange {
            tick_lower_index: self.default_tick_lower_index,
            tick_upper_index: self.default_tick_upper_index,
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.tick_spacing <= 0 {
            return Err(PlanError::InvalidConfig(format!("tick spacing must be positive: {}", self.tick_spacing)));
        }

        if self.deposit_decimals > MAX_DECIMALS || self.margin_decimals > MAX_DECIMALS {
            return Err(PlanError::InvalidConfig(format!(
                "decimals must not exceed {}: deposit={}, margin={}",
                MAX_DECIMALS, self.deposit_decimals, self.margin_decimals
            )));
        }

        if self.default_tick_lower_index >= self.default_tick_upper_index {
            return Err(PlanError::InvalidConfig(format!(
                "invalid tick range: lower ({}) >= upper ({})",
                self.default_tick_lower_index, self.default_tick_upper_index
            )));
        }

        if !is_tick_index_in_bounds(self.default_tick_lower_index) || !is_tick_index_in_bounds(self.default_tick_upper_index) {
            return Err(PlanError::InvalidConfig(format!(
                "ticks out of bounds: lower={}, upper={}",
                self.default_tick_lower_index, self.default_tick_upper_index
            )));
        }

        if !is_tick_aligned(self.default_tick_lower_index, self.tick_spacing) || !is_tick_aligned(self.default_tick_upper_index, self.tick_spacing) {
            return Err(PlanError::InvalidConfig(format!(
                "ticks not aligned to spacing {}: lower={}, upper={}",
                self.tick_spacing, self.default_tick_lower_index, self.default_tick_upper_index
            )));
        }

        Ok(())
    }
}
