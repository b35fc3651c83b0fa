//! Dagger-Hashimoto algorithm parameters.
//!
//! The canonical lane width is 4 bytes (32-bit FNV mixing). The 8-byte
//! lane width in [`crate::wide`] is a separate protocol variant, not an
//! alternate encoding of the same outputs.

/// Bytes per digest output, cache row, and dataset item
pub const HASH_BYTES: usize = 64;

/// Bytes per mixing word at the canonical lane width
pub const WORD_BYTES: usize = 4;

/// Words per 64-byte hash at the canonical lane width
pub const WORDS_PER_HASH: usize = HASH_BYTES / WORD_BYTES;

/// Full passes of the randomized XOR-and-digest phase over the cache
pub const CACHE_ROUNDS: usize = 3;

/// Cache parents folded into one dataset item
pub const DATASET_PARENTS: usize = 256;

/// Bytes per dataset row touched by one hashimoto access
pub const MIX_BYTES: usize = 128;

/// Words per hashimoto mix at the canonical lane width
pub const MIX_WORDS: usize = MIX_BYTES / WORD_BYTES;

/// Dataset rows read by one hashimoto evaluation
pub const LOOP_ACCESSES: usize = 64;

/// FNV prime for 32-bit lanes
pub const FNV_PRIME32: u32 = 0x0100_0193;

/// FNV prime for 64-bit lanes
pub const FNV_PRIME64: u64 = 0x0000_0100_0000_01B3;

/// Bytes per mixing word in the wide (64-bit lane) variant
pub const WIDE_WORD_BYTES: usize = 8;

/// Words per hash in the wide variant
pub const WIDE_WORDS_PER_HASH: usize = HASH_BYTES / WIDE_WORD_BYTES;

/// Words per hashimoto mix in the wide variant
pub const WIDE_MIX_WORDS: usize = MIX_BYTES / WIDE_WORD_BYTES;
