//! Collection codecs (component G, spec §4.6): length-prefixed list, map,
//! and set, each parametric over its element/key/value type through plain
//! closures rather than an object hierarchy (spec §9, "Length encoders as
//! strategy objects").

pub mod ranged_set;

use std::cmp::Ordering;
use std::io::{Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::error::Result;

pub use ranged_set::{read_ranged_set, write_ranged_set};

/// Write `list.len()` via `write_len`, then every element in order via
/// `write_elem`.
pub fn write_list<W: Write, T>(
    w: &mut BitWriter<W>,
    mut write_len: impl FnMut(&mut BitWriter<W>, usize) -> Result<()>,
    mut write_elem: impl FnMut(&mut BitWriter<W>, &T) -> Result<()>,
    list: &[T],
) -> Result<()> {
    write_len(w, list.len())?;
    for item in list {
        write_elem(w, item)?;
    }
    Ok(())
}

/// Read a length via `read_len`, then that many elements via `read_elem`.
pub fn read_list<R: Read, T>(
    r: &mut BitReader<R>,
    mut read_len: impl FnMut(&mut BitReader<R>) -> Result<usize>,
    mut read_elem: impl FnMut(&mut BitReader<R>) -> Result<T>,
) -> Result<Vec<T>> {
    let n = read_len(r)?;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(read_elem(r)?);
    }
    Ok(out)
}

/// Copy `map`'s entries into a buffer, sort by `key_order`, write the
/// length, then each entry: the first key via `write_key`, every later key
/// via `diff_key_write(prev, cur)` when supplied (else `write_key` again),
/// followed by the value via `write_val`.
///
/// Entries are always copied out of `map` before sorting; the caller's
/// source map's own iteration order never leaks into the wire format
/// (spec §9, "Open questions / source ambiguities").
#[allow(clippy::too_many_arguments)]
pub fn write_map<W: Write, K, V>(
    w: &mut BitWriter<W>,
    mut write_len: impl FnMut(&mut BitWriter<W>, usize) -> Result<()>,
    mut write_key: impl FnMut(&mut BitWriter<W>, &K) -> Result<()>,
    mut diff_key_write: Option<impl FnMut(&mut BitWriter<W>, &K, &K) -> Result<()>>,
    mut key_order: impl FnMut(&K, &K) -> Ordering,
    mut write_val: impl FnMut(&mut BitWriter<W>, &V) -> Result<()>,
    map: impl IntoIterator<Item = (K, V)>,
) -> Result<()> {
    let mut entries: Vec<(K, V)> = map.into_iter().collect();
    entries.sort_by(|a, b| key_order(&a.0, &b.0));

    write_len(w, entries.len())?;
    let mut prev: Option<&K> = None;
    for (k, v) in &entries {
        match (diff_key_write.as_mut(), prev) {
            (Some(diff_fn), Some(p)) => diff_fn(w, p, k)?,
            _ => write_key(w, k)?,
        }
        write_val(w, v)?;
        prev = Some(k);
    }
    Ok(())
}

/// Mirror of [`write_map`]: the first key via `read_key`, each later key
/// via `diff_key_read(prev)` when supplied, each value via `read_val`.
pub fn read_map<R: Read, K, V>(
    r: &mut BitReader<R>,
    mut read_len: impl FnMut(&mut BitReader<R>) -> Result<usize>,
    mut read_key: impl FnMut(&mut BitReader<R>) -> Result<K>,
    mut diff_key_read: Option<impl FnMut(&mut BitReader<R>, &K) -> Result<K>>,
    mut read_val: impl FnMut(&mut BitReader<R>) -> Result<V>,
) -> Result<Vec<(K, V)>> {
    let n = read_len(r)?;
    let mut out: Vec<(K, V)> = Vec::with_capacity(n);
    for i in 0..n {
        let key = match (diff_key_read.as_mut(), i) {
            (Some(diff_fn), i) if i > 0 => diff_fn(r, &out[i - 1].0)?,
            _ => read_key(r)?,
        };
        let val = read_val(r)?;
        out.push((key, val));
    }
    Ok(out)
}

/// A set, defined in terms of [`write_map`] with a unit value (spec §4.6,
/// "Definable in terms of map with a unit value type").
pub fn write_set<W: Write, K>(
    w: &mut BitWriter<W>,
    write_len: impl FnMut(&mut BitWriter<W>, usize) -> Result<()>,
    write_key: impl FnMut(&mut BitWriter<W>, &K) -> Result<()>,
    diff_key_write: Option<impl FnMut(&mut BitWriter<W>, &K, &K) -> Result<()>>,
    key_order: impl FnMut(&K, &K) -> Ordering,
    set: impl IntoIterator<Item = K>,
) -> Result<()> {
    write_map(
        w,
        write_len,
        write_key,
        diff_key_write,
        key_order,
        |_w: &mut BitWriter<W>, _: &()| Ok(()),
        set.into_iter().map(|k| (k, ())),
    )
}

/// Mirror of [`write_set`]; returns the decoded keys in wire order.
pub fn read_set<R: Read, K>(
    r: &mut BitReader<R>,
    read_len: impl FnMut(&mut BitReader<R>) -> Result<usize>,
    read_key: impl FnMut(&mut BitReader<R>) -> Result<K>,
    diff_key_read: Option<impl FnMut(&mut BitReader<R>, &K) -> Result<K>>,
) -> Result<Vec<K>> {
    let entries = read_map(r, read_len, read_key, diff_key_read, |_r: &mut BitReader<R>| Ok(()))?;
    Ok(entries.into_iter().map(|(k, _)| k).collect())
}
