//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{CoreError, ARITHMETIC_OVERFLOW, DIVISION_BY_ZERO};
use ethnum::U256;
use std::{
    cmp::Ordering,
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
};

const NUM_WORDS: usize = 8;

/// A 512-bit unsigned integer stored as little-endian 64-bit words.
///
/// Only used as the intermediate of `a * b / d` where `a`, `b` and `d` are
/// 256-bit values, so the product never wraps.
#[derive(Copy, Clone, Debug)]
pub struct U512Muldiv {
    pub items: [u64; NUM_WORDS],
}

impl U512Muldiv {
    pub fn new(h: U256, l: U256) -> Self {
        let (hh, hl) = h.into_words();
        let (lh, ll) = l.into_words();
        U512Muldiv {
            items: [ll.lo(), ll.hi(), lh.lo(), lh.hi(), hl.lo(), hl.hi(), hh.lo(), hh.hi()],
        }
    }

    pub fn from_u256(value: U256) -> Self {
        U512Muldiv::new(U256::ZERO, value)
    }

    fn zero() -> Self {
        U512Muldiv { items: [0; NUM_WORDS] }
    }

    fn update_word(&mut self, index: usize, value: u64) {
        self.items[index] = value;
    }

    fn num_words(&self) -> usize {
        for i in (0..self.items.len()).rev() {
            if self.items[i] != 0 {
                return i + 1;
            }
        }
        0
    }

    fn num_bits(&self) -> u32 {
        match self.num_words() {
            0 => 0,
            n => (n as u32 - 1) * U64_RESOLUTION + (U64_RESOLUTION - self.items[n - 1].leading_zeros()),
        }
    }

    fn bit(&self, index: u32) -> bool {
        let word = self.items[(index / U64_RESOLUTION) as usize];
        (word >> (index % U64_RESOLUTION)) & 1 == 1
    }

    fn set_bit(&mut self, index: u32) {
        self.items[(index / U64_RESOLUTION) as usize] |= 1 << (index % U64_RESOLUTION);
    }

    fn get_word(&self, index: usize) -> u64 {
        self.items[index]
    }

    fn get_word_u128(&self, index: usize) -> u128 {
        self.items[index] as u128
    }

    // Logical-left shift, does not trigger overflow
    fn shift_word_left(&self) -> Self {
        let mut result = U512Muldiv::zero();

        for i in (0..NUM_WORDS - 1).rev() {
            result.items[i + 1] = self.items[i];
        }

        result
    }

    // Logical-left shift, does not trigger overflow
    pub fn shift_left(&self, mut shift_amount: u32) -> Self {
        // Return 0 if shift is greater than number of bits
        if shift_amount >= U64_RESOLUTION * (NUM_WORDS as u32) {
            return U512Muldiv::zero();
        }

        let mut result = *self;

        while shift_amount >= U64_RESOLUTION {
            result = result.shift_word_left();
            shift_amount -= U64_RESOLUTION;
        }

        if shift_amount == 0 {
            return result;
        }

        for i in (1..NUM_WORDS).rev() {
            result.items[i] = result.items[i] << shift_amount | result.items[i - 1] >> (U64_RESOLUTION - shift_amount);
        }

        result.items[0] <<= shift_amount;

        result
    }

    // Logical-right shift, does not trigger overflow
    fn shift_word_right(&self) -> Self {
        let mut result = U512Muldiv::zero();

        for i in 0..NUM_WORDS - 1 {
            result.items[i] = self.items[i + 1]
        }

        result
    }

    // Logical-right shift, does not trigger overflow
    pub fn shift_right(&self, mut shift_amount: u32) -> Self {
        // Return 0 if shift is greater than number of bits
        if shift_amount >= U64_RESOLUTION * (NUM_WORDS as u32) {
            return U512Muldiv::zero();
        }

        let mut result = *self;

        while shift_amount >= U64_RESOLUTION {
            result = result.shift_word_right();
            shift_amount -= U64_RESOLUTION;
        }

        if shift_amount == 0 {
            return result;
        }

        for i in 0..NUM_WORDS - 1 {
            result.items[i] = result.items[i] >> shift_amount | result.items[i + 1] << (U64_RESOLUTION - shift_amount);
        }

        result.items[NUM_WORDS - 1] >>= shift_amount;

        result
    }

    fn cmp_words(&self, other: &U512Muldiv) -> Ordering {
        for i in (0..self.items.len()).rev() {
            match self.items[i].cmp(&other.items[i]) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
        }

        Ordering::Equal
    }

    fn eq(&self, other: U512Muldiv) -> bool {
        self.cmp_words(&other) == Ordering::Equal
    }

    fn lt(&self, other: U512Muldiv) -> bool {
        self.cmp_words(&other) == Ordering::Less
    }

    fn gte(&self, other: U512Muldiv) -> bool {
        self.cmp_words(&other) != Ordering::Less
    }

    pub fn try_into_u256(&self) -> Result<U256, CoreError> {
        if self.num_words() > 4 {
            return Err(ARITHMETIC_OVERFLOW);
        }

        Ok(U256::from_words(hi_lo(self.items[3], self.items[2]), hi_lo(self.items[1], self.items[0])))
    }

    pub fn is_zero(self) -> bool {
        self.num_words() == 0
    }

    // Result underflows if other is greater than self
    fn sub(&self, other: U512Muldiv) -> Self {
        let mut result = U512Muldiv::zero();

        let mut carry = 0;
        for i in 0..NUM_WORDS {
            let x = self.get_word(i);
            let y = other.get_word(i);
            let (t0, overflowing0) = x.overflowing_sub(y);
            let (t1, overflowing1) = t0.overflowing_sub(carry);
            result.update_word(i, t1);

            carry = if overflowing0 || overflowing1 { 1 } else { 0 };
        }

        result
    }

    // Result overflows if greater than 2^512-1
    pub fn mul(&self, other: U512Muldiv) -> Self {
        let mut result = U512Muldiv::zero();

        let m = self.num_words();
        let n = other.num_words();

        for j in 0..n {
            let mut k = 0;
            for i in 0..m {
                let x = self.get_word_u128(i);
                let y = other.get_word_u128(j);
                if i + j < NUM_WORDS {
                    let z = result.get_word_u128(i + j);
                    let t = x.wrapping_mul(y).wrapping_add(z).wrapping_add(k);
                    result.update_word(i + j, t.lo());
                    k = t.hi_u128();
                }
            }

            // Don't update the carry word
            if j + m < NUM_WORDS {
                result.update_word(j + m, k as u64);
            }
        }

        result
    }

    /// Restoring binary long division, one quotient bit per step.
    pub fn div(&self, divisor: U512Muldiv, return_remainder: bool) -> Result<(Self, Self), CoreError> {
        if divisor.is_zero() {
            return Err(DIVISION_BY_ZERO);
        }

        if self.lt(divisor) {
            let remainder = if return_remainder { *self } else { U512Muldiv::zero() };
            return Ok((U512Muldiv::zero(), remainder));
        }

        let mut quotient = U512Muldiv::zero();
        let mut remainder = U512Muldiv::zero();

        for i in (0..self.num_bits()).rev() {
            // The remainder is below the divisor, so a set top bit means the
            // shifted value is at least the divisor and the wrapping sub is exact.
            let carry = remainder.items[NUM_WORDS - 1] >> (U64_RESOLUTION - 1) == 1;
            remainder = remainder.shift_left(1);
            if self.bit(i) {
                remainder.items[0] |= 1;
            }
            if carry || remainder.gte(divisor) {
                remainder = remainder.sub(divisor);
                quotient.set_bit(i);
            }
        }

        if return_remainder {
            Ok((quotient, remainder))
        } else {
            Ok((quotient, U512Muldiv::zero()))
        }
    }
}

impl Display for U512Muldiv {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let mut buf = [0_u8; NUM_WORDS * 20];
        let mut i = buf.len() - 1;

        let ten = U512Muldiv::from_u256(U256::new(10));
        let mut current = *self;

        loop {
            let (quotient, remainder) = current.div(ten, true).map_err(|_| FmtError)?;
            let digit = remainder.get_word(0) as u8;
            buf[i] = digit + b'0';
            current = quotient;

            if current.is_zero() {
                break;
            }

            i -= 1;
        }

        let s = std::str::from_utf8(&buf[i..]).map_err(|_| FmtError)?;

        f.write_str(s)
    }
}

const U64_MAX: u128 = u64::MAX as u128;
const U64_RESOLUTION: u32 = 64;

trait LoHi {
    fn lo(self) -> u64;
    fn hi(self) -> u64;
    fn hi_u128(self) -> u128;
}

impl LoHi for u128 {
    fn lo(self) -> u64 {
        (self & U64_MAX) as u64
    }
    fn hi(self) -> u64 {
        (self >> U64_RESOLUTION) as u64
    }
    fn hi_u128(self) -> u128 {
        self >> U64_RESOLUTION
    }
}

fn hi_lo(hi: u64, lo: u64) -> u128 {
    (hi as u128) << U64_RESOLUTION | (lo as u128)
}

/// Full 512-bit product of two 256-bit values.
pub fn mul_u512(a: U256, b: U256) -> U512Muldiv {
    U512Muldiv::from_u256(a).mul(U512Muldiv::from_u256(b))
}

/// Computes `a * b / denominator` with a 512-bit intermediate product.
///
/// # Parameters
/// - `a` - The multiplicand
/// - `b` - The multiplier
/// - `denominator` - The divisor
/// - `round_up` - Round the quotient up if there is a remainder
///
/// # Returns
/// - `Ok`: The quotient
/// - `Err`: `DIVISION_BY_ZERO` or `ARITHMETIC_OVERFLOW` if the quotient does not fit in 256 bits
pub fn try_mul_div(a: U256, b: U256, denominator: U256, round_up: bool) -> Result<U256, CoreError> {
    if denominator == U256::ZERO {
        return Err(DIVISION_BY_ZERO);
    }

    let product = mul_u512(a, b);
    let (quotient, remainder) = product.div(U512Muldiv::from_u256(denominator), round_up)?;
    let quotient = quotient.try_into_u256()?;

    if round_up && !remainder.is_zero() {
        quotient.checked_add(U256::ONE).ok_or(ARITHMETIC_OVERFLOW)
    } else {
        Ok(quotient)
    }
}

/// Computes `a * b / 2^96`, the product of two X96 numbers, with a 512-bit intermediate.
pub fn try_mul_shift_96(a: U256, b: U256, round_up: bool) -> Result<U256, CoreError> {
    let product = mul_u512(a, b);
    let quotient = product.shift_right(96).try_into_u256()?;
    let has_remainder = !product.shift_left(U64_RESOLUTION * NUM_WORDS as u32 - 96).is_zero();

    if round_up && has_remainder {
        quotient.checked_add(U256::ONE).ok_or(ARITHMETIC_OVERFLOW)
    } else {
        Ok(quotient)
    }
}
