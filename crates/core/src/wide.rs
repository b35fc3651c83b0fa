//! The 64-bit-lane protocol variant.
//!
//! Lane width is a protocol parameter, not an implementation detail: the
//! two widths route index bytes into different FNV lanes and produce
//! different outputs for identical `(cache, index)`. This module is the
//! 8-byte-lane rendition of dataset item derivation and hashimoto,
//! deliberately kept scalar; the 4-byte-lane functions in
//! [`crate::dataset`] and [`crate::hashimoto`] are the canonical
//! variant. A cache is width-neutral and shared by both.

use crate::cache::Cache;
use crate::dataset::Dataset;
use crate::error::DaggerError;
use crate::hashimoto::HASHIMOTO_BYTES;
use crate::params::{
    DATASET_PARENTS, HASH_BYTES, LOOP_ACCESSES, MIX_BYTES, WIDE_MIX_WORDS, WIDE_WORDS_PER_HASH,
};
use crate::primitives::{digest512, fnv64};

/// Derive one 64-byte dataset item with 64-bit lanes.
pub fn dataset_item_wide(cache: &Cache, index: u64) -> [u8; HASH_BYTES] {
    let rows = cache.rows() as u64;

    let mut init = cache.row_words_wide((index % rows) as usize);
    init[0] ^= index;
    let mut mix = hash_to_words_wide(&digest512(&words_to_hash_wide(&init)));

    for j in 0..DATASET_PARENTS as u64 {
        let lane = mix[j as usize % WIDE_WORDS_PER_HASH];
        let parent = (fnv64(index ^ j, lane) % rows) as usize;
        let row = cache.row_words_wide(parent);
        for k in 0..WIDE_WORDS_PER_HASH {
            mix[k] = fnv64(mix[k], row[k]);
        }
    }

    digest512(&words_to_hash_wide(&mix))
}

/// Materialize the first `size` bytes of the wide-variant dataset.
///
/// Wide items and canonical items are incompatible; a dataset built here
/// is only meaningful to the wide hashimoto below.
pub fn materialize(cache: &Cache, size: usize) -> Result<Dataset, DaggerError> {
    let mut data = Dataset::alloc(size)?;
    for (i, chunk) in data.chunks_exact_mut(HASH_BYTES).enumerate() {
        chunk.copy_from_slice(&dataset_item_wide(cache, i as u64));
    }
    Ok(Dataset::from_raw(data))
}

/// Scalar wide hashimoto over a materialized wide dataset.
pub fn hashimoto_full_wide(hash: &[u8; HASH_BYTES], dataset: &Dataset) -> [u8; HASHIMOTO_BYTES] {
    hashimoto_rows_wide(hash, dataset.rows(), |i| row_to_words(dataset.row(i)))
}

/// Wide hashimoto from the cache alone, deriving each accessed row's two
/// items on demand.
pub fn hashimoto_light_wide(
    hash: &[u8; HASH_BYTES],
    cache: &Cache,
    dataset_size: usize,
) -> Result<[u8; HASHIMOTO_BYTES], DaggerError> {
    if dataset_size == 0 || dataset_size % MIX_BYTES != 0 {
        return Err(DaggerError::InvalidParameters(
            "dataset size must be a positive multiple of 128",
        ));
    }
    let rows = dataset_size / MIX_BYTES;
    Ok(hashimoto_rows_wide(hash, rows, |i| {
        let a = dataset_item_wide(cache, 2 * i as u64);
        let b = dataset_item_wide(cache, 2 * i as u64 + 1);
        let mut row = [0u64; WIDE_MIX_WORDS];
        row[..WIDE_WORDS_PER_HASH].copy_from_slice(&hash_to_words_wide(&a));
        row[WIDE_WORDS_PER_HASH..].copy_from_slice(&hash_to_words_wide(&b));
        row
    }))
}

fn hashimoto_rows_wide<F>(hash: &[u8; HASH_BYTES], rows: usize, lookup: F) -> [u8; HASHIMOTO_BYTES]
where
    F: Fn(usize) -> [u64; WIDE_MIX_WORDS],
{
    let words = hash_to_words_wide(hash);
    let mut mix = [0u64; WIDE_MIX_WORDS];
    mix[..WIDE_WORDS_PER_HASH].copy_from_slice(&words);
    mix[WIDE_WORDS_PER_HASH..].copy_from_slice(&words);
    let seed_head = mix[0];

    for i in 0..LOOP_ACCESSES {
        let parent = (fnv64(i as u64 ^ seed_head, mix[i % WIDE_MIX_WORDS]) % rows as u64) as usize;
        let row = lookup(parent);
        for j in 0..WIDE_MIX_WORDS {
            mix[j] = fnv64(mix[j], row[j]);
        }
    }

    let mut out = [0u8; HASHIMOTO_BYTES];
    for (chunk, group) in out.chunks_exact_mut(8).zip(mix.chunks_exact(4)) {
        let folded = fnv64(fnv64(fnv64(group[0], group[1]), group[2]), group[3]);
        chunk.copy_from_slice(&folded.to_le_bytes());
    }
    out
}

#[inline]
fn hash_to_words_wide(hash: &[u8; HASH_BYTES]) -> [u64; WIDE_WORDS_PER_HASH] {
    let mut words = [0u64; WIDE_WORDS_PER_HASH];
    for (word, chunk) in words.iter_mut().zip(hash.chunks_exact(8)) {
        *word = u64::from_le_bytes(chunk.try_into().unwrap());
    }
    words
}

#[inline]
fn words_to_hash_wide(words: &[u64; WIDE_WORDS_PER_HASH]) -> [u8; HASH_BYTES] {
    let mut hash = [0u8; HASH_BYTES];
    for (chunk, word) in hash.chunks_exact_mut(8).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    hash
}

#[inline]
fn row_to_words(row: &[u8; MIX_BYTES]) -> [u64; WIDE_MIX_WORDS] {
    let mut words = [0u64; WIDE_MIX_WORDS];
    for (word, chunk) in words.iter_mut().zip(row.chunks_exact(8)) {
        *word = u64::from_le_bytes(chunk.try_into().unwrap());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::dataset_item;

    #[test]
    fn wide_and_canonical_items_diverge() {
        let cache = Cache::generate(1024, b"123").unwrap();
        assert_ne!(dataset_item_wide(&cache, 123), dataset_item(&cache, 123));
    }

    #[test]
    fn wide_items_are_deterministic() {
        let cache = Cache::generate(1024, b"123").unwrap();
        assert_eq!(dataset_item_wide(&cache, 7), dataset_item_wide(&cache, 7));
    }
}
