//! HMAC-SHA3-256. ring does not ship SHA-3, so this one goes through the
//! RustCrypto `hmac` and `sha3` crates.

use hmac::{Hmac, Mac};

use crate::hash::HashSpec;

const DIGEST_LEN: usize = 32;

type HmacSha3 = Hmac<::sha3::Sha3_256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sha3_256;

impl HashSpec for Sha3_256 {
    fn digest_size(&self) -> usize {
        DIGEST_LEN
    }

    fn hmac_parts(&self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
        let mut mac = HmacSha3::new_from_slice(key).expect("HMAC accepts keys of any length");
        for part in parts {
            mac.update(part);
        }
        mac.finalize().into_bytes().to_vec()
    }
}
