//! Bit transport (component A).
//!
//! Packs and unpacks individual bits over an underlying byte stream,
//! little-endian within each byte: the first bit written to a byte becomes
//! its least-significant bit, the eighth becomes its most-significant one.
//! No unit of this crate's wire format is ever rounded up to a byte
//! boundary except the stream's own final padding (see [`BitWriter::close`]).

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

use crate::error::Result;

/// Write a single boolean as one bit (`1` for `true`).
///
/// This is the element format named "Boolean" in the wire format table;
/// it needs nothing beyond [`BitWriter::write_bit`].
#[inline]
pub fn write_bool<W: std::io::Write>(w: &mut BitWriter<W>, value: bool) -> Result<()> {
    w.write_bit(value as u8)
}

/// Read a single bit back as a boolean.
#[inline]
pub fn read_bool<R: std::io::Read>(r: &mut BitReader<R>) -> Result<bool> {
    Ok(r.read_bit()? != 0)
}
