use crate::counter::CounterWidth;
use crate::error::HkdfError;
use crate::expand::{expand, expand_into, OutputBlocks};
use crate::extract::extract;
use crate::hash::HashSpec;
use crate::prk::Prk;

/// An extracted PRK bound to its hash, ready for any number of expansions.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Hkdf<H: HashSpec> {
    hash: H,
    prk: Prk,
    counter: CounterWidth,
}

impl<H: HashSpec> Hkdf<H> {
    /// Run HKDF-Extract once over `salt` and `ikm`.
    pub fn new(salt: Option<&[u8]>, ikm: &[u8], hash: H) -> Self {
        let prk = extract(salt, ikm, &hash);
        Hkdf {
            hash,
            prk,
            counter: CounterWidth::default(),
        }
    }

    /// Skip Extract for a key that is already uniformly random.
    pub fn from_prk(prk: Prk, hash: H) -> Self {
        Hkdf {
            hash,
            prk,
            counter: CounterWidth::default(),
        }
    }

    /// Use a wider block counter than the RFC's single octet.
    pub fn with_counter(mut self, counter: CounterWidth) -> Self {
        self.counter = counter;
        self
    }

    pub fn prk(&self) -> &Prk {
        &self.prk
    }

    pub fn hash(&self) -> &H {
        &self.hash
    }

    pub fn counter(&self) -> CounterWidth {
        self.counter
    }

    pub fn expand(&self, info: &[u8], length: usize) -> Result<Vec<u8>, HkdfError> {
        expand(self.prk.as_bytes(), info, length, &self.hash, self.counter)
    }

    pub fn expand_into(&self, info: &[u8], okm: &mut [u8]) -> Result<(), HkdfError> {
        expand_into(self.prk.as_bytes(), info, okm, &self.hash, self.counter)
    }

    pub fn blocks<'a>(&'a self, info: &'a [u8]) -> OutputBlocks<'a, H> {
        OutputBlocks::new(self.prk.as_bytes(), info, &self.hash, self.counter)
    }
}
