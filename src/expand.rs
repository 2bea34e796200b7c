/* expand.rs

   HKDF-Expand (RFC 5869 §2.3).

       T(0) = empty
       T(i) = HMAC(PRK, T(i-1) | info | counter(i))
       OKM  = first L bytes of T(1) | T(2) | ... | T(N),  N = ceil(L / HashLen)

   The block chain is exposed as an iterator that ends once the counter can
   no longer encode the next index. The materializing functions check the
   requested length against that limit before any HMAC is computed.
*/

use std::iter::FusedIterator;

use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::counter::CounterWidth;
use crate::error::HkdfError;
use crate::hash::HashSpec;

/// Default number of output bytes when a caller has no preference.
pub const DEFAULT_LENGTH: usize = 32;

/// Lazy sequence of Expand output blocks, each `HashLen` bytes.
///
/// Yields `T(1)`, `T(2)`, ... and returns `None` for good once the index
/// is past what `counter` can represent.
pub struct OutputBlocks<'a, H: HashSpec> {
    prk: &'a [u8],
    info: &'a [u8],
    hash: &'a H,
    counter: CounterWidth,
    previous: Vec<u8>,
    next_index: Option<u128>,
}

impl<'a, H: HashSpec> OutputBlocks<'a, H> {
    pub fn new(prk: &'a [u8], info: &'a [u8], hash: &'a H, counter: CounterWidth) -> Self {
        OutputBlocks {
            prk,
            info,
            hash,
            counter,
            previous: Vec::new(),
            next_index: Some(1),
        }
    }
}

impl<H: HashSpec> Iterator for OutputBlocks<'_, H> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index?;
        let encoded = match self.counter.encode(index) {
            Some(encoded) => encoded,
            None => {
                self.next_index = None;
                return None;
            }
        };

        let block = self
            .hash
            .hmac_parts(self.prk, &[self.previous.as_slice(), self.info, encoded.as_ref()]);

        self.previous.zeroize();
        self.previous.extend_from_slice(&block);
        self.next_index = index.checked_add(1);

        Some(block)
    }
}

impl<H: HashSpec> FusedIterator for OutputBlocks<'_, H> {}

impl<H: HashSpec> Drop for OutputBlocks<'_, H> {
    fn drop(&mut self) {
        self.previous.zeroize();
    }
}

/// Largest output, in bytes, that one expansion can produce: the counter
/// ceiling, capped at the largest buffer a `Vec` can hold.
pub fn max_output_length(hash_len: usize, counter: CounterWidth) -> u128 {
    counter
        .max_blocks()
        .saturating_mul(hash_len as u128)
        .min(isize::MAX as u128)
}

/// Number of blocks needed for `length` bytes, or an error if the counter
/// cannot index that many.
fn blocks_needed(length: usize, hash_len: usize, counter: CounterWidth) -> Result<usize, HkdfError> {
    if hash_len == 0 {
        return Err(HkdfError::ZeroDigestSize);
    }

    let max_length = max_output_length(hash_len, counter);
    if length as u128 > max_length {
        warn!(length, max_length = %max_length, counter = %counter, "rejecting HKDF expansion");
        return Err(HkdfError::LengthTooLong {
            length,
            max_length,
            counter,
        });
    }

    Ok(length / hash_len + usize::from(length % hash_len != 0))
}

/// HKDF-Expand into `okm`, filling it completely.
///
/// Fails without touching `okm` when its length needs more blocks than
/// `counter` can index (255 blocks for the RFC's single octet).
pub fn expand_into<H: HashSpec>(
    prk: &[u8],
    info: &[u8],
    okm: &mut [u8],
    hash: &H,
    counter: CounterWidth,
) -> Result<(), HkdfError> {
    let hash_len = hash.digest_size();
    let blocks = blocks_needed(okm.len(), hash_len, counter)?;

    debug!(length = okm.len(), blocks, hash_len, counter = %counter, "expanding output keying material");

    if blocks == 0 {
        return Ok(());
    }

    let chain = OutputBlocks::new(prk, info, hash, counter);
    for (chunk, mut block) in okm.chunks_mut(hash_len).zip(chain) {
        chunk.copy_from_slice(&block[..chunk.len()]);
        block.zeroize();
    }

    Ok(())
}

/// HKDF-Expand returning `length` bytes of output keying material.
pub fn expand<H: HashSpec>(
    prk: &[u8],
    info: &[u8],
    length: usize,
    hash: &H,
    counter: CounterWidth,
) -> Result<Vec<u8>, HkdfError> {
    // Validate before allocating the output buffer
    blocks_needed(length, hash.digest_size(), counter)?;

    let mut okm = vec![0u8; length];
    expand_into(prk, info, &mut okm, hash, counter)?;
    Ok(okm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Sha1, Sha256, Sha512};
    use std::cell::Cell;

    /// Counts HMAC invocations made through it.
    struct Counting<H> {
        inner: H,
        calls: Cell<usize>,
    }

    impl<H> Counting<H> {
        fn new(inner: H) -> Self {
            Counting {
                inner,
                calls: Cell::new(0),
            }
        }
    }

    impl<H: HashSpec> HashSpec for Counting<H> {
        fn digest_size(&self) -> usize {
            self.inner.digest_size()
        }

        fn hmac_parts(&self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
            self.calls.set(self.calls.get() + 1);
            self.inner.hmac_parts(key, parts)
        }
    }

    const PRK: [u8; 32] = [0x5a; 32];

    #[test]
    fn zero_length_draws_no_blocks() {
        let hash = Counting::new(Sha256);
        let okm = expand(&PRK, b"info", 0, &hash, CounterWidth::U8).unwrap();
        assert!(okm.is_empty());
        assert_eq!(hash.calls.get(), 0);
    }

    #[test]
    fn exact_multiple_draws_exact_blocks() {
        let hash = Counting::new(Sha256);
        let okm = expand(&PRK, b"info", 3 * 32, &hash, CounterWidth::U8).unwrap();
        assert_eq!(okm.len(), 96);
        assert_eq!(hash.calls.get(), 3);

        let blocks: Vec<Vec<u8>> = OutputBlocks::new(&PRK, b"info", &Sha256, CounterWidth::U8)
            .take(3)
            .collect();
        assert_eq!(okm, blocks.concat());
    }

    #[test]
    fn partial_block_truncates_last_block() {
        let hash = Counting::new(Sha1);
        let okm = expand(&PRK, b"", 41, &hash, CounterWidth::U8).unwrap();
        assert_eq!(hash.calls.get(), 3);

        let blocks: Vec<Vec<u8>> = OutputBlocks::new(&PRK, b"", &Sha1, CounterWidth::U8)
            .take(3)
            .collect();
        assert_eq!(&okm[..40], &blocks.concat()[..40]);
        assert_eq!(okm[40], blocks[2][0]);
    }

    #[test]
    fn blocks_chain_on_previous_output() {
        let mut chain = OutputBlocks::new(&PRK, b"ctx", &Sha256, CounterWidth::U8);
        let t1 = chain.next().unwrap();
        let t2 = chain.next().unwrap();

        assert_eq!(t1, Sha256.hmac_parts(&PRK, &[&b"ctx"[..], &[0x01u8][..]]));
        assert_eq!(t2, Sha256.hmac_parts(&PRK, &[t1.as_slice(), &b"ctx"[..], &[0x02u8][..]]));
    }

    #[test]
    fn wide_counter_changes_block_message() {
        let mut chain = OutputBlocks::new(&PRK, b"ctx", &Sha256, CounterWidth::U16);
        let t1 = chain.next().unwrap();
        assert_eq!(t1, Sha256.hmac_parts(&PRK, &[&b"ctx"[..], &[0x00u8, 0x01][..]]));
    }

    #[test]
    fn generator_stops_at_counter_limit() {
        let chain = OutputBlocks::new(&PRK, b"", &Sha1, CounterWidth::U8);
        let mut chain = chain.skip(254);
        assert!(chain.next().is_some());
        assert!(chain.next().is_none());
        assert!(chain.next().is_none());
    }

    #[test]
    fn rfc_ceiling_is_accepted() {
        let okm = expand(&PRK, b"", 255 * 64, &Sha512, CounterWidth::U8).unwrap();
        assert_eq!(okm.len(), 255 * 64);
    }

    #[test]
    fn overflow_fails_before_any_hmac() {
        let hash = Counting::new(Sha256);
        let err = expand(&PRK, b"info", 255 * 32 + 1, &hash, CounterWidth::U8).unwrap_err();
        assert_eq!(
            err,
            HkdfError::LengthTooLong {
                length: 255 * 32 + 1,
                max_length: 255 * 32,
                counter: CounterWidth::U8,
            }
        );
        assert_eq!(hash.calls.get(), 0);

        let okm = expand(&PRK, b"info", 255 * 32 + 1, &Sha256, CounterWidth::U16).unwrap();
        assert_eq!(okm.len(), 255 * 32 + 1);
    }

    #[test]
    fn overflow_leaves_buffer_untouched() {
        let mut okm = vec![0xeeu8; 256 * 20];
        let err = expand_into(&PRK, b"", &mut okm, &Sha1, CounterWidth::U8);
        assert!(err.is_err());
        assert!(okm.iter().all(|b| *b == 0xee));
    }

    #[test]
    fn huge_request_is_rejected_without_allocating() {
        let err = expand(&PRK, b"", usize::MAX, &Sha256, CounterWidth::U16);
        assert!(matches!(err, Err(HkdfError::LengthTooLong { .. })));
    }

    #[test]
    fn output_is_prefix_of_longer_output() {
        let long = expand(&PRK, b"prefix", 200, &Sha256, CounterWidth::U8).unwrap();
        for len in [1, 31, 32, 33, 64, 100, 199] {
            let short = expand(&PRK, b"prefix", len, &Sha256, CounterWidth::U8).unwrap();
            assert_eq!(&long[..len], &short[..]);
        }
    }

    #[test]
    fn max_output_length_saturates() {
        assert_eq!(max_output_length(32, CounterWidth::U8), 255 * 32);
        assert_eq!(max_output_length(20, CounterWidth::U16), 65535 * 20);
        assert_eq!(max_output_length(64, CounterWidth::U128), isize::MAX as u128);
    }

    #[test]
    fn wide_counter_huge_request_is_an_error() {
        for counter in [CounterWidth::U64, CounterWidth::U128] {
            let err = expand(&PRK, b"", usize::MAX, &Sha256, counter).unwrap_err();
            assert_eq!(
                err,
                HkdfError::LengthTooLong {
                    length: usize::MAX,
                    max_length: isize::MAX as u128,
                    counter,
                }
            );
        }
    }

    struct NoDigest;

    impl HashSpec for NoDigest {
        fn digest_size(&self) -> usize {
            0
        }

        fn hmac_parts(&self, _key: &[u8], _parts: &[&[u8]]) -> Vec<u8> {
            Vec::new()
        }
    }

    #[test]
    fn zero_digest_size_is_rejected() {
        let err = expand(b"k", b"", 1, &NoDigest, CounterWidth::U8).unwrap_err();
        assert_eq!(err, HkdfError::ZeroDigestSize);

        let mut okm = [0u8; 4];
        let err = expand_into(b"k", b"", &mut okm, &NoDigest, CounterWidth::U8).unwrap_err();
        assert_eq!(err, HkdfError::ZeroDigestSize);
    }
}
