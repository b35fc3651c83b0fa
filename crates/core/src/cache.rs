//! Memory-hard cache construction.
//!
//! The cache is the compact structure a verifier holds: cheap to keep in
//! memory, expensive to regenerate. Construction has two phases. Phase 1
//! is a strict sequential digest chain seeded from the caller's seed.
//! Phase 2 runs [`CACHE_ROUNDS`] full passes of randomized XOR-and-digest
//! over the rows, in strictly increasing row order within each pass.
//!
//! Rows are read back as integers through the accessors below, which pin
//! the byte order to little-endian in one place.

use crate::error::DaggerError;
use crate::params::{CACHE_ROUNDS, HASH_BYTES, WIDE_WORDS_PER_HASH, WORDS_PER_HASH};
use crate::primitives::{digest512, hash_to_words};

/// Seed-derived cache of 64-byte rows; immutable once generated, safe to
/// share read-only across any number of concurrent derivations.
pub struct Cache {
    rows: usize,
    data: Vec<u8>,
}

impl Cache {
    /// Build the cache for `seed` with `size` bytes.
    ///
    /// `size` must be a positive multiple of 64 or the call fails with
    /// [`DaggerError::InvalidParameters`]. An unobtainable buffer fails
    /// with [`DaggerError::AllocationFailure`]; no partial cache is ever
    /// returned.
    pub fn generate(size: usize, seed: &[u8]) -> Result<Self, DaggerError> {
        if size == 0 || size % HASH_BYTES != 0 {
            return Err(DaggerError::InvalidParameters(
                "cache size must be a positive multiple of 64",
            ));
        }
        let rows = size / HASH_BYTES;

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| DaggerError::AllocationFailure(size))?;

        expand_chain(&mut data, rows, seed);
        mix_rounds(&mut data, rows);

        Ok(Self { rows, data })
    }

    /// Number of 64-byte rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Raw bytes of the whole cache.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// One 64-byte row.
    #[inline]
    pub fn row(&self, index: usize) -> &[u8; HASH_BYTES] {
        let off = index * HASH_BYTES;
        self.data[off..off + HASH_BYTES].try_into().unwrap()
    }

    /// One row as 16 little-endian 32-bit words. This accessor and its
    /// wide twin are the only places raw cache bytes become integers.
    #[inline]
    pub fn row_words(&self, index: usize) -> [u32; WORDS_PER_HASH] {
        hash_to_words(self.row(index))
    }

    /// One row as 8 little-endian 64-bit words (wide variant).
    #[inline]
    pub fn row_words_wide(&self, index: usize) -> [u64; WIDE_WORDS_PER_HASH] {
        let row = self.row(index);
        let mut words = [0u64; WIDE_WORDS_PER_HASH];
        for (word, chunk) in words.iter_mut().zip(row.chunks_exact(8)) {
            *word = u64::from_le_bytes(chunk.try_into().unwrap());
        }
        words
    }
}

/// Phase 1: strict sequential digest chain. Computing row `i` always
/// costs one more digest than row `i - 1`, so the base chain cannot be
/// regenerated in parallel.
fn expand_chain(data: &mut Vec<u8>, rows: usize, seed: &[u8]) {
    data.extend_from_slice(&digest512(seed));
    for i in 1..rows {
        let next = digest512(&data[(i - 1) * HASH_BYTES..i * HASH_BYTES]);
        data.extend_from_slice(&next);
    }
}

/// Phase 2: randomized XOR-and-digest passes. Later rows in a pass read
/// rows already rewritten earlier in the same pass, so iteration order
/// within a pass is load-bearing; only whole passes form a parallelism
/// boundary.
fn mix_rounds(data: &mut [u8], rows: usize) {
    let mut temp = [0u8; HASH_BYTES];
    for _ in 0..CACHE_ROUNDS {
        for i in 0..rows {
            let off = i * HASH_BYTES;
            let v = u32::from_le_bytes(data[off..off + 4].try_into().unwrap()) as usize % rows;
            let prev = (i + rows - 1) % rows;
            for k in 0..HASH_BYTES {
                temp[k] = data[v * HASH_BYTES + k] ^ data[prev * HASH_BYTES + k];
            }
            data[off..off + HASH_BYTES].copy_from_slice(&digest512(&temp));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_phase_is_a_digest_chain() {
        let mut data = Vec::new();
        expand_chain(&mut data, 16, b"123");
        assert_eq!(data.len(), 16 * HASH_BYTES);
        assert_eq!(&data[0..64], &digest512(b"123"));
        let row0: [u8; HASH_BYTES] = data[0..64].try_into().unwrap();
        assert_eq!(&data[64..128], &digest512(&row0));
    }

    #[test]
    fn rejects_zero_and_unaligned_sizes() {
        for size in [0, 1, 63, 100, 1000] {
            assert!(
                matches!(
                    Cache::generate(size, b"123"),
                    Err(DaggerError::InvalidParameters(_))
                ),
                "size {size} should be rejected"
            );
        }
    }

    #[test]
    fn absurd_size_is_allocation_failure() {
        // usize::MAX - 63 is a multiple of 64 but can never be reserved
        let size = usize::MAX - 63;
        assert_eq!(
            Cache::generate(size, b"123").map(|_| ()).unwrap_err(),
            DaggerError::AllocationFailure(size)
        );
    }

    #[test]
    fn row_words_are_little_endian() {
        let cache = Cache::generate(1024, b"123").unwrap();
        let row = cache.row(0);
        let words = cache.row_words(0);
        assert_eq!(words[0], u32::from_le_bytes([row[0], row[1], row[2], row[3]]));
        let wide = cache.row_words_wide(0);
        assert_eq!(wide[0], u64::from_le_bytes(row[0..8].try_into().unwrap()));
    }

    #[test]
    fn seed_changes_every_row() {
        let a = Cache::generate(1024, b"123").unwrap();
        let b = Cache::generate(1024, b"124").unwrap();
        for i in 0..a.rows() {
            assert_ne!(a.row(i), b.row(i), "row {i} unchanged across seeds");
        }
    }
}
