//! Bit-align tuner (component I, spec §4.6): picks the bit-align `k` that
//! minimizes total encoded size for [`super::NaturalCode`] or
//! [`super::IntegerCode`] against an observed frequency distribution.

use log::debug;

use super::{IntegerCode, NaturalCode};
use crate::error::{BitpackError, Result};

/// Searches `k` in `[2, k_max]` for the bit-aligned natural/integer codes.
#[derive(Debug, Clone, Copy)]
pub struct BitAlignTuner;

impl BitAlignTuner {
    /// `k_max = ceil(log2(max(1, bound))) + 1`, per spec §4.6.
    fn k_max_for_bound(bound: u64) -> u32 {
        let bound = bound.max(1);
        let bits = 64 - bound.leading_zeros();
        bits + 1
    }

    /// Pick the `k` minimizing total bit cost of [`NaturalCode`] over
    /// `freqs`, an iterator of `(value, count)` pairs. Ties favor the
    /// smaller `k`.
    pub fn tune_natural(freqs: impl IntoIterator<Item = (u64, u64)>) -> Result<u32> {
        let freqs: Vec<(u64, u64)> = freqs.into_iter().collect();
        if freqs.is_empty() {
            return Err(BitpackError::invalid_argument(
                "cannot tune bit-align over an empty frequency map",
            ));
        }
        let max_value = freqs.iter().map(|&(v, _)| v).max().unwrap();
        let k_max = Self::k_max_for_bound(max_value).max(2);

        let mut best_k = 2;
        let mut best_cost: u128 = u128::MAX;
        for k in 2..=k_max {
            let code = NaturalCode::new(k)?;
            let mut cost: u128 = 0;
            for &(v, c) in &freqs {
                cost += code.len(v)? as u128 * c as u128;
            }
            debug!("k={k} total bits={cost}");
            if cost < best_cost {
                best_cost = cost;
                best_k = k;
            }
        }
        Ok(best_k)
    }

    /// Pick the `k` minimizing total bit cost of [`IntegerCode`] over
    /// `freqs`, an iterator of `(value, count)` pairs. Ties favor the
    /// smaller `k`.
    pub fn tune_integer(freqs: impl IntoIterator<Item = (i64, u64)>) -> Result<u32> {
        let freqs: Vec<(i64, u64)> = freqs.into_iter().collect();
        if freqs.is_empty() {
            return Err(BitpackError::invalid_argument(
                "cannot tune bit-align over an empty frequency map",
            ));
        }
        let max_abs = freqs.iter().map(|&(v, _)| v.unsigned_abs()).max().unwrap();
        let k_max = Self::k_max_for_bound(max_abs).max(2);

        let mut best_k = 2;
        let mut best_cost: u128 = u128::MAX;
        for k in 2..=k_max {
            let code = IntegerCode::new(k)?;
            let mut cost: u128 = 0;
            for &(v, c) in &freqs {
                cost += code.len(v)? as u128 * c as u128;
            }
            debug!("k={k} total bits={cost}");
            if cost < best_cost {
                best_cost = cost;
                best_k = k;
            }
        }
        Ok(best_k)
    }
}
