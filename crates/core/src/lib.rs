//! # Dagger-Hashimoto Core
//!
//! A memory-hard proof-of-work construction: a seed expands into a
//! moderately sized cache that is cheap to hold but expensive to
//! regenerate, each 64-byte dataset item requires hundreds of
//! pseudo-random cache reads to derive, and the hashimoto mix folds a
//! candidate hash together with dataset reads into a short verifiable
//! digest.
//!
//! The asymmetry is the whole point: a verifier answers from the cache
//! alone ([`hashimoto_light`]), while a miner searching over candidates
//! pays for the full materialized dataset ([`Dataset::materialize`] +
//! [`hashimoto_full`]).
//!
//! ## Phases
//!
//! 1. **Cache** — sequential digest chain, then 3 randomized
//!    XOR-and-digest passes ([`Cache::generate`])
//! 2. **Dataset** — 256 FNV-selected cache parents per 64-byte item
//!    ([`dataset_item`])
//! 3. **Hashimoto** — 64 dataset-row accesses folded into 32 bytes
//!    ([`hashimoto_full`], [`hashimoto_light`])
//!
//! Optimized and vectorized paths ([`dataset_item_opt`],
//! [`hashimoto_full_vec`]) are bit-identical to the reference paths for
//! every input; [`verify::self_verify`] is the regression gate for that
//! contract.
//!
//! The digest primitive is SHA-512 and all byte/word reinterpretation is
//! little-endian. The canonical mixing lanes are 32-bit; [`wide`] holds
//! the 64-bit-lane protocol variant.
//!
//! ## Example
//!
//! ```rust
//! use dagger_core::{Cache, Dataset, digest512, hashimoto_full, hashimoto_light};
//!
//! let cache = Cache::generate(1024, b"123")?;
//! let dataset = Dataset::materialize(&cache, 1024)?;
//!
//! let candidate = digest512(b"123");
//! let mined = hashimoto_full(&candidate, &dataset);
//! let verified = hashimoto_light(&candidate, &cache, dataset.size())?;
//! assert_eq!(mined, verified);
//! # Ok::<(), dagger_core::DaggerError>(())
//! ```

mod cache;
mod dataset;
mod error;
mod hashimoto;
mod params;
mod primitives;
mod simd;
pub mod verify;
pub mod wide;

pub use cache::Cache;
pub use dataset::{Dataset, dataset_item, dataset_item_opt};
pub use error::DaggerError;
pub use hashimoto::{HASHIMOTO_BYTES, hashimoto_full, hashimoto_full_vec, hashimoto_light};
pub use params::*;
pub use primitives::{digest512, fnv32, fnv64};
