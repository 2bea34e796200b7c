use std::fmt;

use ring::constant_time;
use zeroize::Zeroize;

/// Pseudorandom key produced by HKDF-Extract. Wiped when dropped and
/// compared in constant time.
#[derive(Clone)]
pub struct Prk(Vec<u8>);

impl Prk {
    /// Wrap key material that was extracted elsewhere.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Prk(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Prk {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Prk {
    fn from(bytes: &[u8]) -> Self {
        Prk(bytes.to_vec())
    }
}

impl PartialEq for Prk {
    fn eq(&self, other: &Self) -> bool {
        constant_time::verify_slices_are_equal(&self.0, &other.0).is_ok()
    }
}

impl Eq for Prk {}

impl fmt::Debug for Prk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prk {{ len: {}, .. }}", self.0.len())
    }
}

impl Drop for Prk {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
