//! Digest and word-mixing primitives.
//!
//! The digest is SHA-512 used as a black box: 64 deterministic bytes in
//! and out. The FNV mixer is the sole pseudorandom combination primitive
//! in the construction. All byte/word reinterpretation is little-endian;
//! changing the byte order changes every derived value.

use sha2::{Digest, Sha512};

use crate::params::{FNV_PRIME32, FNV_PRIME64, HASH_BYTES, WORDS_PER_HASH};

/// SHA-512 of `input`, as the fixed 64-byte array used throughout.
#[inline]
pub fn digest512(input: &[u8]) -> [u8; HASH_BYTES] {
    let mut out = [0u8; HASH_BYTES];
    out.copy_from_slice(&Sha512::digest(input));
    out
}

/// FNV combination of two 32-bit words: `(a * prime) ^ b`, multiplication
/// wrapping modulo 2^32.
#[inline(always)]
pub fn fnv32(a: u32, b: u32) -> u32 {
    a.wrapping_mul(FNV_PRIME32) ^ b
}

/// FNV combination of two 64-bit words (wide variant).
#[inline(always)]
pub fn fnv64(a: u64, b: u64) -> u64 {
    a.wrapping_mul(FNV_PRIME64) ^ b
}

/// Unpack a 64-byte hash into 16 little-endian 32-bit words.
#[inline]
pub fn hash_to_words(hash: &[u8; HASH_BYTES]) -> [u32; WORDS_PER_HASH] {
    let mut words = [0u32; WORDS_PER_HASH];
    for (word, chunk) in words.iter_mut().zip(hash.chunks_exact(4)) {
        *word = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    words
}

/// Pack 16 words back into the 64-byte little-endian form.
#[inline]
pub fn words_to_hash(words: &[u32; WORDS_PER_HASH]) -> [u8; HASH_BYTES] {
    let mut hash = [0u8; HASH_BYTES];
    for (chunk, word) in hash.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest512_known_vector() {
        assert_eq!(
            hex::encode(digest512(b"123")),
            "3c9909afec25354d551dae21590bb26e38d53f2173b8d3dc3eee4c047e7ab1c1\
             eb8b85103e3be7ba613b31bb5c9c36214dc9f14a42fd7a2fdb84856bca5c44c2"
        );
    }

    #[test]
    fn fnv32_multiplies_then_xors() {
        assert_eq!(fnv32(0, 0xDEAD_BEEF), 0xDEAD_BEEF);
        assert_eq!(fnv32(1, 0), FNV_PRIME32);
        // wraparound, not saturation
        assert_eq!(fnv32(u32::MAX, 0), u32::MAX.wrapping_mul(FNV_PRIME32));
    }

    #[test]
    fn fnv64_multiplies_then_xors() {
        assert_eq!(fnv64(0, 42), 42);
        assert_eq!(fnv64(1, 0), FNV_PRIME64);
        assert_eq!(fnv64(u64::MAX, 0), u64::MAX.wrapping_mul(FNV_PRIME64));
    }

    #[test]
    fn word_packing_round_trips() {
        let hash = digest512(b"roundtrip");
        assert_eq!(words_to_hash(&hash_to_words(&hash)), hash);
        // word 0 is the first four bytes, little-endian
        let words = hash_to_words(&hash);
        assert_eq!(
            words[0],
            u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]])
        );
    }
}
