use crate::hash::HashSpec;
use crate::prk::Prk;

/// HKDF-Extract (RFC 5869 §2.2): `PRK = HMAC(salt, IKM)`.
///
/// A missing or empty salt is replaced by `HashLen` zero bytes, so both
/// derive the same key.
pub fn extract<H: HashSpec>(salt: Option<&[u8]>, ikm: &[u8], hash: &H) -> Prk {
    let prk = match salt {
        Some(salt) if !salt.is_empty() => hash.hmac(salt, ikm),
        _ => {
            let zeros = vec![0u8; hash.digest_size()];
            hash.hmac(&zeros, ikm)
        }
    };
    Prk::from_bytes(prk)
}
