//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

mod liquidity;
mod position;
mod tick;

pub use liquidity::*;
pub use position::*;
pub use tick::*;
