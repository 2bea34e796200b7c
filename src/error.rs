use thiserror::Error;

use crate::counter::CounterWidth;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HkdfError {
    /// The requested output needs more blocks than the counter can index.
    #[error("Cannot expand to {length} bytes: {counter} counter allows at most {max_length} bytes")]
    LengthTooLong {
        length: usize,
        max_length: u128,
        counter: CounterWidth,
    },

    #[error("Hash reports a zero-length digest")]
    ZeroDigestSize,

    #[error("Unknown hash algorithm: {0}")]
    UnknownHash(String),

    #[error("Unknown counter width: {0}")]
    UnknownCounter(String),
}
