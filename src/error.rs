//! Error kinds shared by every component of the crate.

use thiserror::Error;

/// The error type returned by every fallible operation in this crate.
///
/// Decoders and encoders never retry internally and never roll back a
/// partially written stream; the caller observes exactly one of these kinds.
#[derive(Debug, Error)]
pub enum BitpackError {
    /// A value, parameter, or table definition was outside its required
    /// domain: `min > max`, `k < 2`, a value outside `[min, max]`, a
    /// negative value where a natural number was required, a length
    /// prefix that does not match the collection it introduces, ...
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was attempted on a stream after it was closed.
    #[error("stream closed")]
    StreamClosed,

    /// A decoder needed another bit but the underlying byte source was
    /// exhausted. The stream is left unusable for further reads.
    #[error("premature end of stream")]
    PrematureEnd,

    /// The underlying byte source or sink reported an I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A Huffman encoder was asked to emit a symbol that does not appear
    /// in the table it was given.
    #[error("unknown symbol")]
    UnknownSymbol,

    /// A defined Huffman table failed the Kraft-equality exhaustiveness
    /// check at construction time.
    #[error("non-exhaustive table: length {length} accounts for {actual} of {expected} leaves")]
    NonExhaustiveTable {
        /// The maximum code length considered.
        length: u32,
        /// The Kraft sum actually achieved, scaled to `2^length`.
        actual: u64,
        /// `2^length`, the value the Kraft sum must equal.
        expected: u64,
    },

    /// A table reported more than one symbol at code length zero.
    #[error("over-specified table: {count} symbols claim the zero-length code")]
    OverSpecifiedTable {
        /// The number of symbols found at length zero.
        count: usize,
    },
}

impl BitpackError {
    /// Build an [`BitpackError::InvalidArgument`] from a message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BitpackError>;
