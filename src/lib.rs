#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

pub mod bits;
pub mod collections;
pub mod error;
pub mod huffman_io;
pub mod tables;

/// Re-exports covering the common path: bit transport, all four
/// prefix-code table kinds, Huffman I/O, and the collection codecs.
pub mod prelude {
    pub use crate::bits::{read_bool, write_bool, BitReader, BitWriter};
    pub use crate::collections::{
        read_list, read_map, read_ranged_set, read_set, write_list, write_map, write_ranged_set,
        write_set,
    };
    pub use crate::error::{BitpackError, Result};
    pub use crate::huffman_io::{read_symbol, write_symbol};
    pub use crate::tables::{BitAlignTuner, HuffmanTable, IntegerCode, LevelTable, NaturalCode, RangedCode};
}
