//! Vector kernels for the FNV inner loops.
//!
//! Every path computes exactly `(a * FNV_PRIME32) ^ b` per 32-bit lane;
//! vectorization only changes how many lanes advance per instruction, so
//! hardware and software paths are bit-identical. The scalar fallback is
//! the portable source of truth and `verify::self_verify` cross-checks
//! the paths end to end.

use crate::params::FNV_PRIME32;

#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse4.1"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
use crate::primitives::fnv32;

/// FNV-fold a parent row into the mix, lane by lane.
///
/// `mix` and `row` must have equal lengths that are a multiple of 4; the
/// 16-word dataset item mix and the 32-word hashimoto mix both qualify.
#[inline(always)]
pub fn fnv_lanes(mix: &mut [u32], row: &[u32]) {
    debug_assert_eq!(mix.len(), row.len());
    debug_assert_eq!(mix.len() % 4, 0);

    #[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
    {
        fnv_lanes_x86(mix, row)
    }

    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    {
        fnv_lanes_arm(mix, row)
    }

    #[cfg(not(any(
        all(target_arch = "x86_64", target_feature = "sse4.1"),
        all(target_arch = "aarch64", target_feature = "neon")
    )))]
    {
        fnv_lanes_soft(mix, row)
    }
}

/// x86_64 path: four lanes per step, low-32-bit multiply then XOR.
#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
#[inline(always)]
fn fnv_lanes_x86(mix: &mut [u32], row: &[u32]) {
    use core::arch::x86_64::{
        __m128i, _mm_loadu_si128, _mm_mullo_epi32, _mm_set1_epi32, _mm_storeu_si128,
        _mm_xor_si128,
    };

    unsafe {
        let prime = _mm_set1_epi32(FNV_PRIME32 as i32);
        let mut i = 0;
        while i < mix.len() {
            let m = _mm_loadu_si128(mix.as_ptr().add(i) as *const __m128i);
            let r = _mm_loadu_si128(row.as_ptr().add(i) as *const __m128i);
            let out = _mm_xor_si128(_mm_mullo_epi32(m, prime), r);
            _mm_storeu_si128(mix.as_mut_ptr().add(i) as *mut __m128i, out);
            i += 4;
        }
    }
}

/// aarch64 NEON path: four lanes per step.
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[inline(always)]
fn fnv_lanes_arm(mix: &mut [u32], row: &[u32]) {
    use core::arch::aarch64::{vdupq_n_u32, veorq_u32, vld1q_u32, vmulq_u32, vst1q_u32};

    unsafe {
        let prime = vdupq_n_u32(FNV_PRIME32);
        let mut i = 0;
        while i < mix.len() {
            let m = vld1q_u32(mix.as_ptr().add(i));
            let r = vld1q_u32(row.as_ptr().add(i));
            vst1q_u32(mix.as_mut_ptr().add(i), veorq_u32(vmulq_u32(m, prime), r));
            i += 4;
        }
    }
}

/// Software fallback (and the behavioral contract for the paths above).
#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse4.1"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
#[inline(always)]
fn fnv_lanes_soft(mix: &mut [u32], row: &[u32]) {
    for (m, r) in mix.iter_mut().zip(row.iter()) {
        *m = fnv32(*m, *r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::fnv32 as fnv32_scalar;

    /// Whichever path is compiled in must match the scalar definition
    /// word for word.
    #[test]
    fn lanes_match_scalar_fnv() {
        let mut mix: Vec<u32> = (0u32..32)
            .map(|i| i.wrapping_mul(0x9E37_79B9) ^ 0xDEAD_BEEF)
            .collect();
        let row: Vec<u32> = (0u32..32)
            .map(|i| i.wrapping_mul(0x85EB_CA6B) ^ 0x1234_5678)
            .collect();
        let expect: Vec<u32> = mix
            .iter()
            .zip(row.iter())
            .map(|(&m, &r)| fnv32_scalar(m, r))
            .collect();

        fnv_lanes(&mut mix, &row);
        assert_eq!(mix, expect);
    }

    #[test]
    fn lanes_handle_extreme_words() {
        let mut mix = [u32::MAX, 0, FNV_PRIME32, 1, u32::MAX, 0, 2, 3];
        let row = [u32::MAX, u32::MAX, 0, 0, 1, 2, 3, 4];
        let expect: Vec<u32> = mix
            .iter()
            .zip(row.iter())
            .map(|(&m, &r)| fnv32_scalar(m, r))
            .collect();

        fnv_lanes(&mut mix, &row);
        assert_eq!(mix.to_vec(), expect);
    }
}
