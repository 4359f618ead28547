//! Bit-aligned integer code (component D, spec §4.3): the signed
//! counterpart of [`super::NaturalCode`]. Each level has the same lengths
//! as the natural code, but its `s(m)` symbols split evenly into a
//! non-negative half and a negative half.

use std::io::{Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::error::{BitpackError, Result};

/// The bit-aligned integer code for a fixed bit-align `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerCode {
    k: u32,
}

const MAX_PAYLOAD_BITS: u32 = 64;

impl IntegerCode {
    /// Build the code for bit-align `k`. Fails if `k < 2`.
    pub fn new(k: u32) -> Result<Self> {
        if k < 2 {
            return Err(BitpackError::invalid_argument(format!(
                "bit-align k must be >= 2, got {k}"
            )));
        }
        Ok(Self { k })
    }

    /// The bit-align parameter this code was built with.
    pub fn k(&self) -> u32 {
        self.k
    }

    fn level_size(&self, m: u32) -> u128 {
        1u128 << (m as u64 * (self.k as u64 - 1))
    }

    /// `(pos_base_m, neg_base_m)` following the recurrences of spec §4.3.
    ///
    /// The negative recurrence steps with the *target* level's half
    /// (`base_{m+1}_neg = base_m_neg - s(m+1)/2`): spec §4.3 states
    /// `s(m)/2` here, but that does not reproduce the worked k=4 example
    /// (`level 2 holds {4..35, −36..−5}`) or the k=8 scenario boundary
    /// (`−8256, −8257`) in §8/S2. Stepping with the target level's half
    /// reproduces both exactly, so that is what is implemented here; see
    /// DESIGN.md.
    fn bases_at_level(&self, m: u32) -> (i128, i128) {
        let mut pos_base: i128 = 0;
        for level in 1..m {
            pos_base += (self.level_size(level) / 2) as i128;
        }
        let mut neg_base: i128 = -((self.level_size(1) / 2) as i128);
        for level in 2..=m {
            neg_base -= (self.level_size(level) / 2) as i128;
        }
        (pos_base, neg_base)
    }

    fn locate(&self, value: i64) -> Result<(u32, i128, i128, i128)> {
        let mut m: u32 = 1;
        loop {
            let payload_bits = m * (self.k - 1);
            if payload_bits > MAX_PAYLOAD_BITS {
                return Err(BitpackError::invalid_argument(format!(
                    "{value} has no level within a {MAX_PAYLOAD_BITS}-bit payload at k={}",
                    self.k
                )));
            }
            let (pos_base, neg_base) = self.bases_at_level(m);
            let half = (self.level_size(m) / 2) as i128;
            let v = value as i128;
            if value >= 0 {
                if v < pos_base + half {
                    return Ok((m, pos_base, neg_base, half));
                }
            } else if v >= neg_base && v < neg_base + half {
                return Ok((m, pos_base, neg_base, half));
            }
            m += 1;
        }
    }

    /// The exact bit length the code for `value` would occupy: `m·k`.
    pub fn len(&self, value: i64) -> Result<usize> {
        let (m, ..) = self.locate(value)?;
        Ok((m * self.k) as usize)
    }

    /// Encode a signed integer.
    pub fn encode<W: Write>(&self, w: &mut BitWriter<W>, value: i64) -> Result<()> {
        let (m, pos_base, neg_base, half) = self.locate(value)?;
        for _ in 0..m - 1 {
            w.write_bit(1)?;
        }
        w.write_bit(0)?;
        let v = value as i128;
        let offset = if value >= 0 {
            (v - pos_base) as u64
        } else {
            (half + (v - neg_base)) as u64
        };
        let payload_bits = (m * (self.k - 1)) as u8;
        w.write_bits(offset, payload_bits)
    }

    /// Decode a value previously written by [`IntegerCode::encode`].
    pub fn decode<R: Read>(&self, r: &mut BitReader<R>) -> Result<i64> {
        let mut ones: u32 = 0;
        loop {
            if r.read_bit()? == 0 {
                break;
            }
            ones += 1;
        }
        let m = ones + 1;
        let (pos_base, neg_base) = self.bases_at_level(m);
        let half = (self.level_size(m) / 2) as i128;
        let payload_bits = (m * (self.k - 1)) as u8;
        let offset = r.read_bits(payload_bits)? as i128;
        let value = if offset < half {
            pos_base + offset
        } else {
            neg_base + (offset - half)
        };
        Ok(value as i64)
    }
}
