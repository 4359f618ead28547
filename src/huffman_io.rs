//! Huffman I/O (component F, spec §4.5): the thin layer that binds a
//! [`HuffmanTable`] to a bit stream.
//!
//! The table types of component B/C/D (`RangedCode`, `NaturalCode`,
//! `IntegerCode`) already carry their own `encode`/`decode` methods derived
//! directly from their closed-form level structure (spec §4.2, §4.3); only
//! the Huffman table needs a tree walk to encode or decode a symbol, so this
//! module exists solely to name that operation at the crate's top level
//! rather than to dispatch generically across all four table kinds.

use std::hash::Hash;
use std::io::{Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::error::Result;
use crate::tables::HuffmanTable;

/// Write one symbol using `table`. Equivalent to
/// [`HuffmanTable::encode_symbol`]; kept as a free function so call sites
/// that already import `write_bool`/`write_symbol` side by side from
/// [`crate::bits`] read uniformly.
pub fn write_symbol<S, W>(w: &mut BitWriter<W>, table: &HuffmanTable<S>, symbol: &S) -> Result<()>
where
    S: Clone + Eq + Hash,
    W: Write,
{
    table.encode_symbol(w, symbol)
}

/// Read one symbol using `table`. Equivalent to
/// [`HuffmanTable::decode_symbol`].
pub fn read_symbol<S, R>(r: &mut BitReader<R>, table: &HuffmanTable<S>) -> Result<S>
where
    S: Clone + Eq + Hash,
    R: Read,
{
    table.decode_symbol(r)
}
