//! Error kinds for cache construction, dataset materialization, and
//! cross-implementation verification.

use thiserror::Error;

/// Errors produced by the core construction.
///
/// Every operation here is pure and deterministic, so none of these are
/// resolved by retrying identical inputs. A failed construction never
/// leaves a partially initialized cache or dataset behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DaggerError {
    /// A size argument violates the construction's invariants.
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// The cache or dataset buffer could not be obtained.
    #[error("allocation failure: could not obtain {0} bytes")]
    AllocationFailure(usize),

    /// An optimized or vectorized path diverged from the reference path.
    /// Fatal: neither path is silently preferred over the other.
    #[error(
        "consistency mismatch: {stage} diverged at index {index}, byte {byte} \
         (reference {reference:#04x}, candidate {candidate:#04x})"
    )]
    ConsistencyMismatch {
        /// Which implementation pair diverged
        stage: &'static str,
        /// Item or hash index at which the divergence was seen
        index: u64,
        /// First differing byte offset within the output
        byte: usize,
        /// Reference byte at that offset
        reference: u8,
        /// Candidate byte at that offset
        candidate: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_reports_index_and_byte() {
        let err = DaggerError::ConsistencyMismatch {
            stage: "dataset_item_opt",
            index: 123,
            byte: 7,
            reference: 0xC0,
            candidate: 0x98,
        };
        let msg = err.to_string();
        assert!(msg.contains("dataset_item_opt"));
        assert!(msg.contains("index 123"));
        assert!(msg.contains("byte 7"));
    }
}
