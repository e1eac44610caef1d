//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

mod liquidity;
mod position;
mod tick;
mod u512_math;

#[cfg(feature = "floats")]
mod fixed_point;
#[cfg(feature = "floats")]
mod price;

pub use liquidity::*;
pub use position::*;
pub use tick::*;
pub use u512_math::*;

#[cfg(feature = "floats")]
pub use fixed_point::*;
#[cfg(feature = "floats")]
pub use price::*;
