//! Non-negative big integers for descendant tables.
//!
//! Limbs are base 1e9, least significant first, with no zero limb on top, so
//! zero is the empty vector and equality is structural.

use std::cmp::Ordering;
use std::fmt;
use std::ops::AddAssign;

use thiserror::Error;

use crate::cfg::{LIMB_BASE, LIMB_DIGITS};

/// A subtraction would have gone below zero; the value is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("big count would become negative")]
pub struct Underflow;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BigCount {
    limbs: Vec<u32>,
}

impl BigCount {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self { limbs: vec![1] }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Number of base 1e9 limbs.
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    fn trim(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    /// `self += factor · other`. A negative result is rejected.
    pub fn add_mul(&mut self, other: &BigCount, factor: i64) -> Result<(), Underflow> {
        let base = LIMB_BASE as i128;
        let f = factor as i128;
        let mut out = self.limbs.clone();
        if out.len() < other.limbs.len() {
            out.resize(other.limbs.len(), 0);
        }
        let mut carry: i128 = 0;
        for (i, limb) in out.iter_mut().enumerate() {
            let b = other.limbs.get(i).copied().unwrap_or(0) as i128;
            let l = *limb as i128 + carry + b * f;
            *limb = l.rem_euclid(base) as u32;
            carry = l.div_euclid(base);
        }
        if carry < 0 {
            return Err(Underflow);
        }
        while carry > 0 {
            out.push((carry % base) as u32);
            carry /= base;
        }
        self.limbs = out;
        self.trim();
        Ok(())
    }

    pub fn sub(&mut self, other: &BigCount) -> Result<(), Underflow> {
        self.add_mul(other, -1)
    }

    pub fn incr(&mut self) {
        for limb in self.limbs.iter_mut() {
            if *limb == LIMB_BASE - 1 {
                *limb = 0;
            } else {
                *limb += 1;
                return;
            }
        }
        self.limbs.push(1);
    }

    pub fn decr(&mut self) -> Result<(), Underflow> {
        if self.is_zero() {
            return Err(Underflow);
        }
        for limb in self.limbs.iter_mut() {
            if *limb == 0 {
                *limb = LIMB_BASE - 1;
            } else {
                *limb -= 1;
                break;
            }
        }
        self.trim();
        Ok(())
    }

    /// Top limb plus the next one as a fraction.
    pub fn leading(&self) -> f64 {
        match self.limbs.as_slice() {
            [] => 0.0,
            [x] => *x as f64,
            [.., y, x] => *x as f64 + *y as f64 / LIMB_BASE as f64,
        }
    }

    pub fn approx(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        self.leading() * (LIMB_BASE as f64).powi(self.limbs.len() as i32 - 1)
    }

    /// Natural logarithm, usable past the range of `f64`.
    pub fn log_approx(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        self.leading().ln() + (LIMB_BASE as f64).ln() * (self.limbs.len() - 1) as f64
    }

    /// Limb groups separated by spaces; once the text is longer than
    /// `max_len` the rest is summarized as `" (N more digits)"`.
    pub fn to_string_limited(&self, max_len: usize) -> String {
        let Some((top, rest)) = self.limbs.split_last() else {
            return "0".to_string();
        };
        let mut out = top.to_string();
        for (i, limb) in rest.iter().enumerate().rev() {
            if out.len() > max_len && i > 0 {
                out.push_str(&format!(" ({} more digits)", LIMB_DIGITS * (i + 1)));
                return out;
            }
            out.push_str(&format!(" {:0width$}", limb, width = LIMB_DIGITS));
        }
        out
    }
}

impl From<u64> for BigCount {
    fn from(mut v: u64) -> Self {
        let mut limbs = Vec::new();
        while v > 0 {
            limbs.push((v % LIMB_BASE as u64) as u32);
            v /= LIMB_BASE as u64;
        }
        Self { limbs }
    }
}

impl AddAssign<&BigCount> for BigCount {
    fn add_assign(&mut self, other: &BigCount) {
        if self.limbs.len() < other.limbs.len() {
            self.limbs.resize(other.limbs.len(), 0);
        }
        let mut carry = 0u32;
        for (i, limb) in self.limbs.iter_mut().enumerate() {
            let b = other.limbs.get(i).copied().unwrap_or(0);
            if carry == 0 && i >= other.limbs.len() {
                break;
            }
            // Both terms stay below 1e9, so the sum fits in u32.
            let s = *limb + b + carry;
            if s >= LIMB_BASE {
                *limb = s - LIMB_BASE;
                carry = 1;
            } else {
                *limb = s;
                carry = 0;
            }
        }
        if carry > 0 {
            self.limbs.push(carry);
        }
    }
}

impl Ord for BigCount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for BigCount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((top, rest)) = self.limbs.split_last() else {
            return write!(f, "0");
        };
        write!(f, "{top}")?;
        for limb in rest.iter().rev() {
            write!(f, "{:0width$}", limb, width = LIMB_DIGITS)?;
        }
        Ok(())
    }
}
