//! Hash specifications: an HMAC function plus a fixed digest length.

use std::fmt;
use std::str::FromStr;

use ring::hmac;

use crate::error::HkdfError;
use crate::sha3::Sha3_256;

/// The capability HKDF needs from a hash function.
pub trait HashSpec {
    /// Digest length in bytes (`HashLen`). Must be non-zero; expansion
    /// rejects a zero-length digest with `HkdfError::ZeroDigestSize`.
    fn digest_size(&self) -> usize;

    /// HMAC over the concatenation of `parts`, keyed with `key`.
    fn hmac_parts(&self, key: &[u8], parts: &[&[u8]]) -> Vec<u8>;

    /// HMAC of a single `message`, keyed with `key`.
    fn hmac(&self, key: &[u8], message: &[u8]) -> Vec<u8> {
        self.hmac_parts(key, &[message])
    }
}

fn ring_hmac(algorithm: hmac::Algorithm, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let key = hmac::Key::new(algorithm, key);
    let mut h = hmac::Context::with_key(&key);
    for part in parts {
        h.update(part);
    }
    h.sign().as_ref().to_vec()
}

macro_rules! ring_hash {
    ($(#[$doc:meta])* $name:ident, $algorithm:expr, $len:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl HashSpec for $name {
            fn digest_size(&self) -> usize {
                $len
            }

            fn hmac_parts(&self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
                ring_hmac($algorithm, key, parts)
            }
        }
    };
}

ring_hash!(
    /// SHA-1. Only for interoperating with existing derivations.
    Sha1,
    hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
    20
);
ring_hash!(Sha256, hmac::HMAC_SHA256, 32);
ring_hash!(Sha384, hmac::HMAC_SHA384, 48);
ring_hash!(Sha512, hmac::HMAC_SHA512, 64);

/// A hash chosen at runtime, e.g. from a command line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
}

impl HashSpec for HashAlgorithm {
    fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => Sha1.digest_size(),
            HashAlgorithm::Sha256 => Sha256.digest_size(),
            HashAlgorithm::Sha384 => Sha384.digest_size(),
            HashAlgorithm::Sha512 => Sha512.digest_size(),
            HashAlgorithm::Sha3_256 => Sha3_256.digest_size(),
        }
    }

    fn hmac_parts(&self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => Sha1.hmac_parts(key, parts),
            HashAlgorithm::Sha256 => Sha256.hmac_parts(key, parts),
            HashAlgorithm::Sha384 => Sha384.hmac_parts(key, parts),
            HashAlgorithm::Sha512 => Sha512.hmac_parts(key, parts),
            HashAlgorithm::Sha3_256 => Sha3_256.hmac_parts(key, parts),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Sha384 => write!(f, "sha384"),
            HashAlgorithm::Sha512 => write!(f, "sha512"),
            HashAlgorithm::Sha3_256 => write!(f, "sha3-256"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = HkdfError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "sha3-256" => Ok(HashAlgorithm::Sha3_256),
            _ => Err(HkdfError::UnknownHash(s.to_string())),
        }
    }
}
