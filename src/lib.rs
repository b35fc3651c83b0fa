//! Dagger-Hashimoto Harness Library
//!
//! A memory-hard proof-of-work construction: seed → cache → dataset →
//! hashimoto. The cache is cheap to hold but expensive to regenerate;
//! deriving dataset items is memory-hard; verifying a hashimoto digest
//! needs only the cache.
//!
//! # Example
//!
//! ```rust
//! use dagger::algorithm::{Cache, digest512, hashimoto_light};
//!
//! let cache = Cache::generate(1024, b"123")?;
//! let digest = hashimoto_light(&digest512(b"123"), &cache, 1024)?;
//! assert_eq!(digest.len(), 32);
//! # Ok::<(), dagger::algorithm::DaggerError>(())
//! ```

// Re-export the core algorithm
pub use dagger_core as algorithm;

// Convenience re-exports
pub use algorithm::{
    Cache, DaggerError, Dataset, dataset_item, dataset_item_opt, hashimoto_full,
    hashimoto_full_vec, hashimoto_light,
};
