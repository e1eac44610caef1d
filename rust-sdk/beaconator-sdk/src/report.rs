//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{format_token_amount, PositionPlan};
use beaconator_core::sqrt_price_x96_to_price;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Human readable rendering of a PositionPlan.
///
/// Prices are derived from the exact sqrt prices for display only.
#[derive(Clone, Copy, Debug)]
pub struct PositionReport<'a> {
    pub plan: &'a PositionPlan,
    pub deposit_decimals: u8,
}

impl<'a> PositionReport<'a> {
    pub fn new(plan: &'a PositionPlan, deposit_decimals: u8) -> Self {
        PositionReport { plan, deposit_decimals }
    }

    pub fn price_lower(&self) -> f64 {
        sqrt_price_x96_to_price(self.plan.sqrt_price_lower_x96)
    }

    pub fn price_upper(&self) -> f64 {
        sqrt_price_x96_to_price(self.plan.sqrt_price_upper_x96)
    }
}

impl Display for PositionReport<'_> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let plan = self.plan;
        writeln!(f, "Position plan")?;
        writeln!(f, "  tick range:       [{}, {}]", plan.tick_lower_index, plan.tick_upper_index)?;
        writeln!(f, "  sqrt price lower: {} (price {:.6})", plan.sqrt_price_lower_x96, self.price_lower())?;
        writeln!(f, "  sqrt price upper: {} (price {:.6})", plan.sqrt_price_upper_x96, self.price_upper())?;
        writeln!(f, "  deposit:          {}", format_token_amount(plan.amount, self.deposit_decimals))?;
        write!(f, "  liquidity:        {}", plan.liquidity)
    }
}
