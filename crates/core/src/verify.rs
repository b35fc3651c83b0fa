//! Cross-implementation consistency verification.
//!
//! Silent divergence between a miner's optimized path and a verifier's
//! reference path would break the scheme outright, so every available
//! implementation pair is byte-compared here and the first divergence is
//! reported with its item index and byte offset. A mismatch is fatal;
//! no path is silently preferred over another.

use crate::cache::Cache;
use crate::dataset::{Dataset, dataset_item, dataset_item_opt};
use crate::error::DaggerError;
use crate::hashimoto::{hashimoto_full, hashimoto_full_vec, hashimoto_light};
use crate::params::HASH_BYTES;
use crate::primitives::digest512;
use crate::wide;

/// Byte-compare `candidate` against `reference`, reporting the first
/// divergence.
fn compare(
    stage: &'static str,
    index: u64,
    reference: &[u8],
    candidate: &[u8],
) -> Result<(), DaggerError> {
    debug_assert_eq!(reference.len(), candidate.len());
    if let Some(byte) = reference
        .iter()
        .zip(candidate.iter())
        .position(|(a, b)| a != b)
    {
        return Err(DaggerError::ConsistencyMismatch {
            stage,
            index,
            byte,
            reference: reference[byte],
            candidate: candidate[byte],
        });
    }
    Ok(())
}

/// Cross-check the reference and optimized dataset item paths over
/// `indices`.
pub fn verify_dataset_items(cache: &Cache, indices: &[u64]) -> Result<(), DaggerError> {
    for &index in indices {
        let reference = dataset_item(cache, index);
        let optimized = dataset_item_opt(cache, index);
        compare("dataset_item_opt", index, &reference, &optimized)?;
    }
    Ok(())
}

/// Cross-check scalar, vectorized, and cache-only hashimoto paths over
/// `hashes`.
pub fn verify_hashimoto(
    cache: &Cache,
    dataset: &Dataset,
    hashes: &[[u8; HASH_BYTES]],
) -> Result<(), DaggerError> {
    for (i, hash) in hashes.iter().enumerate() {
        let index = i as u64;
        let reference = hashimoto_full(hash, dataset);

        let vectorized = hashimoto_full_vec(hash, dataset);
        compare("hashimoto_full_vec", index, &reference, &vectorized)?;

        let light = hashimoto_light(hash, cache, dataset.size())?;
        compare("hashimoto_light", index, &reference, &light)?;
    }
    Ok(())
}

/// Cross-check the wide-variant pair (materialized vs cache-only).
pub fn verify_wide(
    cache: &Cache,
    dataset_size: usize,
    hashes: &[[u8; HASH_BYTES]],
) -> Result<(), DaggerError> {
    let dataset = wide::materialize(cache, dataset_size)?;
    for (i, hash) in hashes.iter().enumerate() {
        let reference = wide::hashimoto_full_wide(hash, &dataset);
        let light = wide::hashimoto_light_wide(hash, cache, dataset_size)?;
        compare("hashimoto_light_wide", i as u64, &reference, &light)?;
    }
    Ok(())
}

/// Full self-check for one `(seed, cache_size, dataset_size)` triple:
/// builds the cache, then cross-checks every implementation pair over a
/// spread of item indices and a chain of derived candidate hashes.
pub fn self_verify(
    seed: &[u8],
    cache_size: usize,
    dataset_size: usize,
) -> Result<(), DaggerError> {
    let cache = Cache::generate(cache_size, seed)?;
    let items = (dataset_size / HASH_BYTES) as u64;

    // edges, interior, and far past the materialized range (index
    // wraparound is defined behavior, never an error)
    let indices = [
        0,
        1,
        items / 2,
        items.saturating_sub(1),
        items,
        items * 7 + 123,
        u64::from(u32::MAX),
    ];
    verify_dataset_items(&cache, &indices)?;

    let mut hashes = Vec::with_capacity(4);
    let mut hash = digest512(seed);
    for _ in 0..4 {
        hash = digest512(&hash);
        hashes.push(hash);
    }

    let dataset = Dataset::materialize(&cache, dataset_size)?;
    verify_hashimoto(&cache, &dataset, &hashes)?;
    verify_wide(&cache, dataset_size, &hashes)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_reports_first_divergence() {
        let reference = [0u8, 1, 2, 3];
        let candidate = [0u8, 1, 9, 9];
        let err = compare("stage", 5, &reference, &candidate).unwrap_err();
        assert_eq!(
            err,
            DaggerError::ConsistencyMismatch {
                stage: "stage",
                index: 5,
                byte: 2,
                reference: 2,
                candidate: 9,
            }
        );
    }

    #[test]
    fn self_verify_passes() {
        self_verify(b"123", 4096, 2048).unwrap();
    }
}
