//! HKDF, the HMAC-based Extract-and-Expand Key Derivation Function (RFC 5869).
//!
//! Two entry points mirror the RFC: [`extract`] condenses input keying
//! material into a pseudorandom key and [`expand`] stretches that key into
//! output keying material. [`Hkdf`] extracts once and expands many times.
//!
//! ```
//! use hkdf_kit::{CounterWidth, Hkdf, Sha256, expand, extract};
//!
//! let prk = extract(Some(&b"site-salt"[..]), b"secret", &Sha256);
//! let key = expand(prk.as_bytes(), b"context1", 16, &Sha256, CounterWidth::U8).unwrap();
//!
//! let kdf = Hkdf::new(Some(&b"site-salt"[..]), b"secret", Sha256);
//! assert_eq!(kdf.expand(b"context1", 16).unwrap(), key);
//! ```

pub mod counter;
pub mod error;
pub mod expand;
pub mod extract;
pub mod hash;
pub mod hkdf;
pub mod prk;
pub mod sha3;

pub use counter::{CounterWidth, EncodedCounter};
pub use error::HkdfError;
pub use expand::{expand, expand_into, max_output_length, OutputBlocks, DEFAULT_LENGTH};
pub use extract::extract;
pub use hash::{HashAlgorithm, HashSpec, Sha1, Sha256, Sha384, Sha512};
pub use hkdf::Hkdf;
pub use prk::Prk;
pub use crate::sha3::Sha3_256;
