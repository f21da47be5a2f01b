//! State hashing for determinism checks.
//!
//! Uses FNV-1a for fast, deterministic hashing of grid state. These
//! hashes are not cryptographically secure; they are used for fast
//! equality checks between runs.

use eddy_core::DirectionSet;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Incremental FNV-1a hasher over grid contents.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StateHasher(u64);

impl StateHasher {
    pub(crate) fn new() -> Self {
        Self(FNV_OFFSET)
    }

    #[inline]
    fn byte(&mut self, byte: u8) {
        self.0 = (self.0 ^ byte as u64).wrapping_mul(FNV_PRIME);
    }

    #[inline]
    pub(crate) fn u64(&mut self, v: u64) {
        for &b in &v.to_le_bytes() {
            self.byte(b);
        }
    }

    /// Fold in weights by bit pattern, so `-0.0` and `0.0` differ.
    pub(crate) fn weights(&mut self, cells: &[[f64; 8]]) {
        for cell in cells {
            for w in cell {
                self.u64(w.to_bits());
            }
        }
    }

    pub(crate) fn occupations(&mut self, cells: &[DirectionSet]) {
        for cell in cells {
            self.byte(cell.bits());
        }
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}
