//! Ranged-integer set codec (component H, spec §4.7): a sorted set of
//! distinct integers in `[min, max]`, each element's range tightened by
//! how many elements came before it and how many remain.

use std::io::{Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::error::{BitpackError, Result};
use crate::tables::RangedCode;

/// Write `elements` (distinct, strictly ascending, each in `[min, max]`)
/// as a length prefix followed by one ranged code per element.
pub fn write_ranged_set<W: Write>(
    w: &mut BitWriter<W>,
    min: i64,
    max: i64,
    mut write_len: impl FnMut(&mut BitWriter<W>, usize) -> Result<()>,
    elements: &[i64],
) -> Result<()> {
    let n = elements.len();
    write_len(w, n)?;

    let mut prev: i128 = min as i128 - 1;
    for (i, &v) in elements.iter().enumerate() {
        if i > 0 && v <= elements[i - 1] {
            return Err(BitpackError::invalid_argument(
                "ranged set elements must be strictly ascending and distinct",
            ));
        }
        let lo = if i == 0 { min as i128 } else { prev + 1 };
        let hi = max as i128 - (n - 1 - i) as i128;
        let code = RangedCode::new(lo as i64, hi as i64)?;
        code.encode(w, v)?;
        prev = v as i128;
    }
    Ok(())
}

/// Mirror of [`write_ranged_set`].
pub fn read_ranged_set<R: Read>(
    r: &mut BitReader<R>,
    min: i64,
    max: i64,
    mut read_len: impl FnMut(&mut BitReader<R>) -> Result<usize>,
) -> Result<Vec<i64>> {
    let n = read_len(r)?;
    let mut out = Vec::with_capacity(n);
    let mut prev: i128 = min as i128 - 1;
    for i in 0..n {
        let lo = if i == 0 { min as i128 } else { prev + 1 };
        let hi = max as i128 - (n - 1 - i) as i128;
        let code = RangedCode::new(lo as i64, hi as i64)?;
        let v = code.decode(r)?;
        out.push(v);
        prev = v as i128;
    }
    Ok(out)
}
