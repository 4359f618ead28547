//! Defined Huffman table (component E, spec §4.4): a finite, exhaustive
//! prefix-code table built from symbol frequencies, laid out so that
//! encoding and decoding walk the same canonical structure the table
//! self-describes on the wire.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;
use std::io::{Read, Write};

use dary_heap::BinaryHeap;
use log::trace;

use super::ranged::RangedCode;
use super::LevelTable;
use crate::bits::{BitReader, BitWriter};
use crate::error::{BitpackError, Result};

/// A finite prefix-code table over a symbol alphabet `S`, built once from
/// frequencies (or reconstructed from a self-described wire form) and
/// reused for every subsequent encode/decode call.
///
/// `S` must be `Clone + Eq + Hash` so that encoding can look a symbol up
/// in a precomputed `(length, code)` index instead of re-walking the
/// table's canonical order on every call.
#[derive(Debug, Clone)]
pub struct HuffmanTable<S> {
    /// Symbols concatenated in order of increasing code length; within a
    /// length, in the caller's canonical order.
    symbols: Vec<S>,
    /// `offsets[b]` is the index into `symbols` where length-`b` symbols
    /// begin; `offsets[max_len + 1]` is `symbols.len()`.
    offsets: Vec<u64>,
    /// `symbol -> (code length, code value)`, precomputed once.
    index: HashMap<S, (u32, u64)>,
}

enum Node {
    Leaf(usize),
    Internal(usize, usize),
}

impl<S: Clone + Eq + Hash> HuffmanTable<S> {
    /// Build a canonical Huffman table from symbol frequencies.
    ///
    /// `order` is the caller-supplied total order used to break ties
    /// between equal-length symbols in the canonical layout (spec §3,
    /// "Canonical ordering within a level"). Frequencies are consumed
    /// through an iterator and immediately sorted by `order`, so the
    /// resulting table does not depend on the iteration order of whatever
    /// map the caller built the frequencies in (spec §8, invariant 6).
    pub fn build(
        freqs: impl IntoIterator<Item = (S, u64)>,
        mut order: impl FnMut(&S, &S) -> std::cmp::Ordering,
    ) -> Result<Self> {
        let mut items: Vec<(S, u64)> = freqs.into_iter().collect();
        if items.is_empty() {
            return Err(BitpackError::invalid_argument(
                "cannot build a Huffman table from zero symbols",
            ));
        }
        items.sort_by(|a, b| order(&a.0, &b.0));

        if items.len() == 1 {
            trace!("single-symbol Huffman table, zero-length code");
            return Self::from_counts_and_symbols(vec![1], vec![items.into_iter().next().unwrap().0]);
        }

        let mut arena: Vec<Node> = (0..items.len()).map(Node::Leaf).collect();
        let mut heap: BinaryHeap<Reverse<(u64, u64, usize)>> = BinaryHeap::with_capacity(items.len());
        for (idx, (_, freq)) in items.iter().enumerate() {
            heap.push(Reverse((*freq, idx as u64, idx)));
        }

        let mut next_seq = items.len() as u64;
        while heap.len() > 1 {
            let Reverse((f1, _, n1)) = heap.pop().unwrap();
            let Reverse((f2, _, n2)) = heap.pop().unwrap();
            let new_idx = arena.len();
            arena.push(Node::Internal(n1, n2));
            heap.push(Reverse((f1 + f2, next_seq, new_idx)));
            next_seq += 1;
        }
        let Reverse((_, _, root)) = heap.pop().unwrap();

        let mut lengths = vec![0u32; items.len()];
        let mut stack = vec![(root, 0u32)];
        while let Some((node, depth)) = stack.pop() {
            match arena[node] {
                Node::Leaf(i) => lengths[i] = depth,
                Node::Internal(l, r) => {
                    stack.push((l, depth + 1));
                    stack.push((r, depth + 1));
                }
            }
        }

        let mut order_by_length: Vec<usize> = (0..items.len()).collect();
        order_by_length.sort_by_key(|&i| lengths[i]);

        let max_len = *lengths.iter().max().unwrap();
        let mut counts = vec![0u64; max_len as usize + 1];
        for &i in &order_by_length {
            counts[lengths[i] as usize] += 1;
        }
        let symbols: Vec<S> = order_by_length
            .into_iter()
            .map(|i| items[i].0.clone())
            .collect();

        trace!(
            "built Huffman table: {} symbols, max length {}",
            symbols.len(),
            max_len
        );
        Self::from_counts_and_symbols(counts, symbols)
    }

    /// Reconstruct a table from an explicit per-length symbol count and a
    /// flat symbol vector already in canonical order. Used both by
    /// [`HuffmanTable::build`] and by [`HuffmanTable::read_self`], and
    /// validated the same way regardless of where the counts came from.
    pub fn from_counts_and_symbols(counts: Vec<u64>, symbols: Vec<S>) -> Result<Self> {
        let total: u64 = counts.iter().sum();
        if total != symbols.len() as u64 {
            return Err(BitpackError::invalid_argument(format!(
                "counts sum to {total} but {} symbols were given",
                symbols.len()
            )));
        }
        let zero_len = counts.first().copied().unwrap_or(0);
        if zero_len > 1 {
            return Err(BitpackError::OverSpecifiedTable {
                count: zero_len as usize,
            });
        }
        if zero_len == 1 && symbols.len() > 1 {
            return Err(BitpackError::OverSpecifiedTable {
                count: symbols.len(),
            });
        }

        let mut offsets = vec![0u64; counts.len() + 1];
        for (b, &c) in counts.iter().enumerate() {
            offsets[b + 1] = offsets[b] + c;
        }

        let max_len = counts.len().saturating_sub(1) as u32;
        let table_check = RawLevels { counts: &counts };
        if !table_check.is_exhaustive() {
            let l = max_len;
            let mut actual: u128 = 0;
            for b in 0..=l {
                actual += (table_check.count(b) as u128) << (l - b);
            }
            return Err(BitpackError::NonExhaustiveTable {
                length: l,
                actual: actual as u64,
                expected: 1u64 << l,
            });
        }

        let mut codes = vec![0u64; symbols.len()];
        let mut acc: u64 = 0;
        let mut i = 0usize;
        for &c in &counts {
            for _ in 0..c {
                codes[i] = acc;
                acc += 1;
                i += 1;
            }
            acc <<= 1;
        }

        let mut index = HashMap::with_capacity(symbols.len());
        let mut i = 0usize;
        for (b, &c) in counts.iter().enumerate() {
            for _ in 0..c {
                index.insert(symbols[i].clone(), (b as u32, codes[i]));
                i += 1;
            }
        }

        Ok(Self {
            symbols,
            offsets,
            index,
        })
    }

    /// The number of distinct symbols in the table.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty (never true for a table returned by
    /// [`HuffmanTable::build`], which rejects empty frequency input).
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn sym(&self, b: u32, i: u64) -> &S {
        &self.symbols[(self.offsets[b as usize] + i) as usize]
    }

    /// Encode `symbol` against this table (component F, spec §4.5).
    ///
    /// Fails with [`BitpackError::UnknownSymbol`] if `symbol` does not
    /// appear in the table.
    pub fn encode_symbol<W: Write>(&self, w: &mut BitWriter<W>, symbol: &S) -> Result<()> {
        if self.symbols.len() == 1 {
            return if symbol == &self.symbols[0] {
                Ok(())
            } else {
                Err(BitpackError::UnknownSymbol)
            };
        }
        let (len, code) = self.index.get(symbol).ok_or(BitpackError::UnknownSymbol)?;
        w.write_bits(*code, *len as u8)
    }

    /// Decode one symbol previously written by
    /// [`HuffmanTable::encode_symbol`].
    pub fn decode_symbol<R: Read>(&self, r: &mut BitReader<R>) -> Result<S> {
        if self.symbols.len() == 1 {
            return Ok(self.symbols[0].clone());
        }
        let mut v: u64 = 0;
        let mut base: u64 = 0;
        let mut b: u32 = 0;
        loop {
            let bit = r.read_bit()? as u64;
            v = (v << 1) | bit;
            base <<= 1;
            b += 1;
            if b as usize >= self.offsets.len() {
                return Err(BitpackError::PrematureEnd);
            }
            let cnt = self.count(b);
            if v - base < cnt {
                return Ok(self.sym(b, v - base).clone());
            }
            base += cnt;
        }
    }

    /// Self-encode this table onto the stream (spec §4.4, "Self-encoding
    /// of a table"): first the per-length count sequence as ranged codes,
    /// then the symbols themselves via `write_symbol`, optionally using
    /// `diff_write` for every symbol after the first in each level.
    pub fn write_self<W: Write>(
        &self,
        w: &mut BitWriter<W>,
        mut write_symbol: impl FnMut(&mut BitWriter<W>, &S) -> Result<()>,
        mut diff_write: Option<impl FnMut(&mut BitWriter<W>, &S, &S) -> Result<()>>,
    ) -> Result<()> {
        self.write_counts(w)?;
        match diff_write.as_mut() {
            Some(diff_fn) => {
                let mut i = 0usize;
                for b in 0..self.offsets.len() as u32 {
                    let cnt = self.count(b) as usize;
                    if cnt == 0 {
                        continue;
                    }
                    write_symbol(w, &self.symbols[i])?;
                    for j in 1..cnt {
                        diff_fn(w, &self.symbols[i + j - 1], &self.symbols[i + j])?;
                    }
                    i += cnt;
                }
            }
            None => {
                for s in &self.symbols {
                    write_symbol(w, s)?;
                }
            }
        }
        Ok(())
    }

    fn write_counts<W: Write>(&self, w: &mut BitWriter<W>) -> Result<()> {
        let mut max: u64 = 1;
        let mut b: u32 = 0;
        loop {
            let cnt = self.count(b);
            let code = RangedCode::new(0, max as i64)?;
            code.encode(w, cnt as i64)?;
            max = (max - cnt) << 1;
            if max == 0 {
                return Ok(());
            }
            b += 1;
        }
    }

    /// Read back a table self-encoded by [`HuffmanTable::write_self`].
    pub fn read_self<R: Read>(
        r: &mut BitReader<R>,
        mut read_symbol: impl FnMut(&mut BitReader<R>) -> Result<S>,
        mut diff_read: Option<impl FnMut(&mut BitReader<R>, &S) -> Result<S>>,
    ) -> Result<Self> {
        let mut counts = Vec::new();
        let mut max: u64 = 1;
        loop {
            let code = RangedCode::new(0, max as i64)?;
            let cnt = code.decode(r)? as u64;
            counts.push(cnt);
            max = (max - cnt) << 1;
            if max == 0 {
                break;
            }
        }

        let total: u64 = counts.iter().sum();
        let mut symbols = Vec::with_capacity(total as usize);
        match diff_read.as_mut() {
            Some(diff_fn) => {
                for &cnt in &counts {
                    if cnt == 0 {
                        continue;
                    }
                    let first = read_symbol(r)?;
                    let mut prev = first.clone();
                    symbols.push(first);
                    for _ in 1..cnt {
                        let cur = diff_fn(r, &prev)?;
                        symbols.push(cur.clone());
                        prev = cur;
                    }
                }
            }
            None => {
                for &cnt in &counts {
                    for _ in 0..cnt {
                        symbols.push(read_symbol(r)?);
                    }
                }
            }
        }

        Self::from_counts_and_symbols(counts, symbols)
    }
}

impl<S: PartialEq> PartialEq for HuffmanTable<S> {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols && self.offsets == other.offsets
    }
}
impl<S: Eq> Eq for HuffmanTable<S> {}

impl<S: Hash> Hash for HuffmanTable<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbols.hash(state);
    }
}

impl<S> LevelTable for HuffmanTable<S> {
    fn count(&self, b: u32) -> u64 {
        let b = b as usize;
        if b + 1 >= self.offsets.len() {
            0
        } else {
            self.offsets[b + 1] - self.offsets[b]
        }
    }

    fn max_len(&self) -> u32 {
        self.offsets.len().saturating_sub(2) as u32
    }
}

struct RawLevels<'a> {
    counts: &'a [u64],
}
impl LevelTable for RawLevels<'_> {
    fn count(&self, b: u32) -> u64 {
        self.counts.get(b as usize).copied().unwrap_or(0)
    }
    fn max_len(&self) -> u32 {
        self.counts.len().saturating_sub(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn by_value(a: &char, b: &char) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn single_symbol_table_is_zero_length() {
        let table = HuffmanTable::build([('x', 42u64)], by_value).unwrap();
        assert_eq!(table.max_len(), 0);
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            table.encode_symbol(&mut w, &'x').unwrap();
            w.close().unwrap();
        }
        assert!(buf.is_empty() || buf == vec![0]);
    }

    #[test]
    fn two_symbol_table_round_trips() {
        let table = HuffmanTable::build([('a', 3u64), ('b', 1)], by_value).unwrap();
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            table.encode_symbol(&mut w, &'a').unwrap();
            table.encode_symbol(&mut w, &'b').unwrap();
            table.encode_symbol(&mut w, &'a').unwrap();
            w.close().unwrap();
        }
        let mut r = BitReader::new(&buf[..]);
        assert_eq!(table.decode_symbol(&mut r).unwrap(), 'a');
        assert_eq!(table.decode_symbol(&mut r).unwrap(), 'b');
        assert_eq!(table.decode_symbol(&mut r).unwrap(), 'a');
    }

    #[test]
    fn determinism_across_iteration_orders() {
        let freqs_a = vec![('a', 5u64), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)];
        let mut freqs_b = freqs_a.clone();
        freqs_b.reverse();

        let t1 = HuffmanTable::build(freqs_a, by_value).unwrap();
        let t2 = HuffmanTable::build(freqs_b, by_value).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn unknown_symbol_fails_to_encode() {
        let table = HuffmanTable::build([('a', 1u64), ('b', 1)], by_value).unwrap();
        let mut buf = Vec::new();
        let mut w = BitWriter::new(&mut buf);
        assert!(matches!(
            table.encode_symbol(&mut w, &'z'),
            Err(BitpackError::UnknownSymbol)
        ));
    }

    #[test]
    fn self_description_round_trips_without_diff() {
        let table = HuffmanTable::build(
            [('a', 5u64), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)],
            by_value,
        )
        .unwrap();

        let write_symbol = |w: &mut BitWriter<&mut Vec<u8>>, s: &char| {
            crate::tables::RangedCode::new(0, 0x10FFFF)
                .unwrap()
                .encode(w, *s as i64)
        };
        let read_symbol = |r: &mut BitReader<&[u8]>| -> Result<char> {
            let v = crate::tables::RangedCode::new(0, 0x10FFFF)
                .unwrap()
                .decode(r)?;
            Ok(char::from_u32(v as u32).unwrap())
        };

        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            table
                .write_self(&mut w, write_symbol, None::<fn(&mut BitWriter<&mut Vec<u8>>, &char, &char) -> Result<()>>)
                .unwrap();
            w.close().unwrap();
        }
        let mut r = BitReader::new(&buf[..]);
        let rebuilt = HuffmanTable::read_self(
            &mut r,
            read_symbol,
            None::<fn(&mut BitReader<&[u8]>, &char) -> Result<char>>,
        )
        .unwrap();
        assert_eq!(table, rebuilt);
    }

    #[test]
    fn over_specified_table_is_rejected() {
        let err = HuffmanTable::from_counts_and_symbols(vec![2], vec!['a', 'b']).unwrap_err();
        assert!(matches!(err, BitpackError::OverSpecifiedTable { .. }));
    }

    #[test]
    fn non_exhaustive_table_is_rejected() {
        // one symbol of length 1 cannot be exhaustive: 2^(1-1) = 1 != 2^1 = 2
        let err = HuffmanTable::from_counts_and_symbols(vec![0, 1], vec!['a']).unwrap_err();
        assert!(matches!(err, BitpackError::NonExhaustiveTable { .. }));
    }
}
