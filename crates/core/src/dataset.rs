//! Dataset item derivation and materialization.
//!
//! A dataset item is a pure function of `(cache, index)`: no hidden
//! state, so items can be derived independently and in parallel. The
//! miner materializes a prefix of the dataset; the verifier never needs
//! to, because any item can be recomputed from the cache on demand.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cache::Cache;
use crate::error::DaggerError;
use crate::params::{DATASET_PARENTS, HASH_BYTES, MIX_BYTES, MIX_WORDS, WORDS_PER_HASH};
use crate::primitives::{digest512, fnv32, hash_to_words, words_to_hash};
use crate::simd;

/// Derive one 64-byte dataset item from the cache (reference path).
///
/// Indices wrap modulo the cache row count; any `u64` index is valid.
pub fn dataset_item(cache: &Cache, index: u64) -> [u8; HASH_BYTES] {
    let rows = cache.rows() as u64;

    let mut init = cache.row_words((index % rows) as usize);
    init[0] ^= index as u32;
    let mut mix = hash_to_words(&digest512(&words_to_hash(&init)));

    for j in 0..DATASET_PARENTS as u64 {
        let parent = parent_index(index, j, mix[j as usize % WORDS_PER_HASH], rows);
        let row = cache.row_words(parent);
        for k in 0..WORDS_PER_HASH {
            mix[k] = fnv32(mix[k], row[k]);
        }
    }

    digest512(&words_to_hash(&mix))
}

/// Optimized dataset item derivation: same contract as [`dataset_item`],
/// with the 16-lane FNV update routed through the vector kernel. Output
/// is bit-identical for every input; [`crate::verify`] enforces this.
pub fn dataset_item_opt(cache: &Cache, index: u64) -> [u8; HASH_BYTES] {
    let rows = cache.rows() as u64;

    let mut init = cache.row_words((index % rows) as usize);
    init[0] ^= index as u32;
    let mut mix = hash_to_words(&digest512(&words_to_hash(&init)));

    for j in 0..DATASET_PARENTS as u64 {
        let parent = parent_index(index, j, mix[j as usize % WORDS_PER_HASH], rows);
        let row = cache.row_words(parent);
        simd::fnv_lanes(&mut mix, &row);
    }

    digest512(&words_to_hash(&mix))
}

/// Parent row selector: one FNV of the item index and the current mix
/// lane, reduced modulo the row count.
#[inline(always)]
fn parent_index(index: u64, j: u64, lane: u32, rows: u64) -> usize {
    (fnv32(index as u32 ^ j as u32, lane) as u64 % rows) as usize
}

/// Materialized prefix of the dataset: `size / 128` rows of two
/// consecutive 64-byte items each. Immutable once built.
pub struct Dataset {
    data: Vec<u8>,
}

impl Dataset {
    /// Materialize the first `size` bytes of the dataset for `cache`.
    ///
    /// `size` must be a positive multiple of 128. Items are derived in
    /// parallel across disjoint output chunks.
    #[cfg(feature = "parallel")]
    pub fn materialize(cache: &Cache, size: usize) -> Result<Self, DaggerError> {
        let mut data = Self::alloc(size)?;
        data.par_chunks_exact_mut(HASH_BYTES)
            .enumerate()
            .for_each(|(i, chunk)| {
                chunk.copy_from_slice(&dataset_item_opt(cache, i as u64));
            });
        Ok(Self { data })
    }

    /// Materialize the first `size` bytes of the dataset for `cache`
    /// (sequential fallback).
    #[cfg(not(feature = "parallel"))]
    pub fn materialize(cache: &Cache, size: usize) -> Result<Self, DaggerError> {
        let mut data = Self::alloc(size)?;
        for (i, chunk) in data.chunks_exact_mut(HASH_BYTES).enumerate() {
            chunk.copy_from_slice(&dataset_item_opt(cache, i as u64));
        }
        Ok(Self { data })
    }

    /// Validate `size` and obtain a zeroed buffer for it.
    pub(crate) fn alloc(size: usize) -> Result<Vec<u8>, DaggerError> {
        if size == 0 || size % MIX_BYTES != 0 {
            return Err(DaggerError::InvalidParameters(
                "dataset size must be a positive multiple of 128",
            ));
        }
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| DaggerError::AllocationFailure(size))?;
        data.resize(size, 0);
        Ok(data)
    }

    /// Build a dataset from an already-filled buffer (variant modules).
    pub(crate) fn from_raw(data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len() % MIX_BYTES, 0);
        Self { data }
    }

    /// Total size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Number of 128-byte rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.len() / MIX_BYTES
    }

    /// One 128-byte row.
    #[inline]
    pub fn row(&self, index: usize) -> &[u8; MIX_BYTES] {
        let off = index * MIX_BYTES;
        self.data[off..off + MIX_BYTES].try_into().unwrap()
    }

    /// One row as 32 little-endian 32-bit words.
    #[inline]
    pub fn row_words(&self, index: usize) -> [u32; MIX_WORDS] {
        let mut words = [0u32; MIX_WORDS];
        for (word, chunk) in words.iter_mut().zip(self.row(index).chunks_exact(4)) {
            *word = u32::from_le_bytes(chunk.try_into().unwrap());
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_hold_consecutive_items() {
        let cache = Cache::generate(1024, b"123").unwrap();
        let dataset = Dataset::materialize(&cache, 1024).unwrap();
        assert_eq!(dataset.rows(), 8);

        let row3 = dataset.row(3);
        assert_eq!(&row3[..HASH_BYTES], &dataset_item(&cache, 6));
        assert_eq!(&row3[HASH_BYTES..], &dataset_item(&cache, 7));
    }

    #[test]
    fn rejects_unaligned_dataset_sizes() {
        let cache = Cache::generate(1024, b"123").unwrap();
        for size in [0, 64, 100, 1000] {
            assert!(matches!(
                Dataset::materialize(&cache, size).map(|_| ()),
                Err(DaggerError::InvalidParameters(_))
            ));
        }
    }
}
