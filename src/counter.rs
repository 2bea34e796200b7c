/* counter.rs

   Block index encodings for HKDF-Expand. RFC 5869 uses a single octet,
   which caps the output at 255 blocks. Wider big-endian counters lift the
   cap for callers that need longer streams.
*/

use std::fmt;
use std::str::FromStr;

use crate::error::HkdfError;

const MAX_COUNTER_BYTES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CounterWidth {
    #[default]
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl CounterWidth {
    /// Number of bytes appended to every block message.
    pub const fn width_bytes(self) -> usize {
        match self {
            CounterWidth::U8 => 1,
            CounterWidth::U16 => 2,
            CounterWidth::U32 => 4,
            CounterWidth::U64 => 8,
            CounterWidth::U128 => 16,
        }
    }

    pub const fn bits(self) -> u32 {
        self.width_bytes() as u32 * 8
    }

    /// Highest block index the encoding can represent. Index 0 is never
    /// used, so this is also the number of addressable blocks.
    pub const fn max_blocks(self) -> u128 {
        match self {
            CounterWidth::U8 => u8::MAX as u128,
            CounterWidth::U16 => u16::MAX as u128,
            CounterWidth::U32 => u32::MAX as u128,
            CounterWidth::U64 => u64::MAX as u128,
            CounterWidth::U128 => u128::MAX,
        }
    }

    /// Big-endian encoding of a 1-based block index, or `None` when the
    /// index is zero or does not fit.
    pub fn encode(self, index: u128) -> Option<EncodedCounter> {
        if index == 0 || index > self.max_blocks() {
            return None;
        }

        let len = self.width_bytes();
        let mut bytes = [0u8; MAX_COUNTER_BYTES];
        bytes[..len].copy_from_slice(&index.to_be_bytes()[MAX_COUNTER_BYTES - len..]);

        Some(EncodedCounter { bytes, len })
    }
}

impl fmt::Display for CounterWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

impl FromStr for CounterWidth {
    type Err = HkdfError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8" | "u8" => Ok(CounterWidth::U8),
            "16" | "u16" => Ok(CounterWidth::U16),
            "32" | "u32" => Ok(CounterWidth::U32),
            "64" | "u64" => Ok(CounterWidth::U64),
            "128" | "u128" => Ok(CounterWidth::U128),
            _ => Err(HkdfError::UnknownCounter(s.to_string())),
        }
    }
}

/// A block index in its wire form, kept on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedCounter {
    bytes: [u8; MAX_COUNTER_BYTES],
    len: usize,
}

impl AsRef<[u8]> for EncodedCounter {
    fn as_ref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}
