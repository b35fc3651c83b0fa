//! Hashimoto mixing: fold a candidate hash with dataset reads into a
//! short verifiable digest.
//!
//! The 64-access loop, each touching one 128-byte dataset row, is the
//! performance-critical path; [`hashimoto_full_vec`] routes its inner
//! update through the vector kernel while [`hashimoto_full`] stays
//! plainly scalar. The two are bit-identical for every input, as is
//! [`hashimoto_light`], which answers from the cache alone by deriving
//! the two items of each accessed row on demand. That last path is the
//! verifier's side of the memory-hardness asymmetry.

use crate::cache::Cache;
use crate::dataset::{Dataset, dataset_item_opt};
use crate::error::DaggerError;
use crate::params::{HASH_BYTES, LOOP_ACCESSES, MIX_BYTES, MIX_WORDS, WORDS_PER_HASH};
use crate::primitives::{fnv32, hash_to_words};
use crate::simd;

/// Bytes in a folded hashimoto digest.
pub const HASHIMOTO_BYTES: usize = MIX_BYTES / 4;

/// Scalar hashimoto over a materialized dataset.
pub fn hashimoto_full(hash: &[u8; HASH_BYTES], dataset: &Dataset) -> [u8; HASHIMOTO_BYTES] {
    hashimoto_rows(hash, dataset.rows(), |i| dataset.row_words(i))
}

/// Vectorized hashimoto over a materialized dataset. Bit-identical to
/// [`hashimoto_full`]; the final fold stays scalar and sequential.
pub fn hashimoto_full_vec(hash: &[u8; HASH_BYTES], dataset: &Dataset) -> [u8; HASHIMOTO_BYTES] {
    hashimoto_rows_vec(hash, dataset.rows(), |i| dataset.row_words(i))
}

/// Hashimoto from the cache alone: each accessed 128-byte row is
/// assembled from its two 64-byte items on the fly. `dataset_size` must
/// be a positive multiple of 128.
pub fn hashimoto_light(
    hash: &[u8; HASH_BYTES],
    cache: &Cache,
    dataset_size: usize,
) -> Result<[u8; HASHIMOTO_BYTES], DaggerError> {
    let rows = mix_rows(dataset_size)?;
    Ok(hashimoto_rows(hash, rows, |i| {
        let a = dataset_item_opt(cache, 2 * i as u64);
        let b = dataset_item_opt(cache, 2 * i as u64 + 1);
        let mut row = [0u32; MIX_WORDS];
        row[..WORDS_PER_HASH].copy_from_slice(&hash_to_words(&a));
        row[WORDS_PER_HASH..].copy_from_slice(&hash_to_words(&b));
        row
    }))
}

fn mix_rows(dataset_size: usize) -> Result<usize, DaggerError> {
    if dataset_size == 0 || dataset_size % MIX_BYTES != 0 {
        return Err(DaggerError::InvalidParameters(
            "dataset size must be a positive multiple of 128",
        ));
    }
    Ok(dataset_size / MIX_BYTES)
}

fn hashimoto_rows<F>(hash: &[u8; HASH_BYTES], rows: usize, lookup: F) -> [u8; HASHIMOTO_BYTES]
where
    F: Fn(usize) -> [u32; MIX_WORDS],
{
    let mut mix = init_mix(hash);
    // captured once; never refreshed while the loop rewrites mix[0]
    let seed_head = mix[0];

    for i in 0..LOOP_ACCESSES {
        let parent = fnv32(i as u32 ^ seed_head, mix[i % MIX_WORDS]) as usize % rows;
        let row = lookup(parent);
        for j in 0..MIX_WORDS {
            mix[j] = fnv32(mix[j], row[j]);
        }
    }

    fold_mix(&mix)
}

fn hashimoto_rows_vec<F>(hash: &[u8; HASH_BYTES], rows: usize, lookup: F) -> [u8; HASHIMOTO_BYTES]
where
    F: Fn(usize) -> [u32; MIX_WORDS],
{
    let mut mix = init_mix(hash);
    let seed_head = mix[0];

    for i in 0..LOOP_ACCESSES {
        let parent = fnv32(i as u32 ^ seed_head, mix[i % MIX_WORDS]) as usize % rows;
        let row = lookup(parent);
        simd::fnv_lanes(&mut mix, &row);
    }

    fold_mix(&mix)
}

/// Duplicate the 16 candidate-hash words into the double-width mix.
#[inline]
fn init_mix(hash: &[u8; HASH_BYTES]) -> [u32; MIX_WORDS] {
    let words = hash_to_words(hash);
    let mut mix = [0u32; MIX_WORDS];
    mix[..WORDS_PER_HASH].copy_from_slice(&words);
    mix[WORDS_PER_HASH..].copy_from_slice(&words);
    mix
}

/// Fold each 4-word group strictly left to right; FNV is not
/// commutative, so the order is load-bearing.
#[inline]
fn fold_mix(mix: &[u32; MIX_WORDS]) -> [u8; HASHIMOTO_BYTES] {
    let mut out = [0u8; HASHIMOTO_BYTES];
    for (chunk, group) in out.chunks_exact_mut(4).zip(mix.chunks_exact(4)) {
        let folded = fnv32(fnv32(fnv32(group[0], group[1]), group[2]), group[3]);
        chunk.copy_from_slice(&folded.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::digest512;

    #[test]
    fn light_rejects_unaligned_dataset_sizes() {
        let cache = Cache::generate(1024, b"123").unwrap();
        let hash = digest512(b"123");
        for size in [0, 64, 127, 129] {
            assert!(matches!(
                hashimoto_light(&hash, &cache, size),
                Err(DaggerError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn fold_is_left_to_right() {
        let mut mix = [0u32; MIX_WORDS];
        mix[..4].copy_from_slice(&[1, 2, 3, 4]);
        let out = fold_mix(&mix);
        let expect = fnv32(fnv32(fnv32(1, 2), 3), 4);
        assert_eq!(&out[..4], &expect.to_le_bytes());
        // swapping operands must change the result
        let swapped = fnv32(fnv32(fnv32(2, 1), 3), 4);
        assert_ne!(expect, swapped);
    }
}
