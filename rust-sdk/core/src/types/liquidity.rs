//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

/// Token amounts backing a liquidity value. Token 0 is the base token, token 1
/// the quote token the price is denominated in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenAmounts {
    pub amount_0: u128,
    pub amount_1: u128,
}
