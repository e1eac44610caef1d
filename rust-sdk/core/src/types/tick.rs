//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
}

/// Direction used when snapping a tick onto the tick spacing grid.
///
/// A lower position bound is aligned `Down` and an upper bound `Up`, so that
/// alignment only ever widens the requested range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickRounding {
    /// Toward negative infinity.
    Down,
    /// Toward positive infinity.
    Up,
}
