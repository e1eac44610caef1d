//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

mod amount;
mod config;
mod decimal;
mod error;
mod plan;
mod report;

pub use amount::*;
pub use config::*;
pub use decimal::*;
pub use error::*;
pub use plan::*;
pub use report::*;
