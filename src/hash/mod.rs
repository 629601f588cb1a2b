//! Deterministic cell hashing
//!
//! A [`HashStrategy`] turns `(level, cell, seed)` into a well-mixed 64-bit
//! value. Strategies hold no mutable state, so the same inputs give the same
//! output from any thread, in any order, on any platform.
//!
//! Two strategies are provided:
//! - [`MixHash`]: fixed-formula hash combine (default, fastest)
//! - [`ReseededRng`]: a ChaCha8 generator freshly seeded from the inputs on every call

mod reseeded;

pub use reseeded::ReseededRng;

use glam::IVec2;

/// Pure hash of a cell at a level
pub trait HashStrategy: Send + Sync {
    /// Hash `(level, cell.x, cell.y, seed)` into 64 bits
    ///
    /// Must be a pure function of its arguments.
    fn hash(&self, level: u32, cell: IVec2, seed: u32) -> u64;
}

/// Fixed-formula hash combine
///
/// Folds each input into the running state and runs a SplitMix64 finalizer
/// after every step. The finalizer is a bijection, so inputs that differ in
/// exactly one field always produce different outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MixHash;

const SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const LEVEL_SALT: u64 = 0xdead_beaf_0000_0000;
const CELL_X_SALT: u64 = 0x1234_5678;
const CELL_Y_SALT: u64 = 0x8765_4321;

/// SplitMix64 finalizer
#[inline]
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl HashStrategy for MixHash {
    #[inline]
    fn hash(&self, level: u32, cell: IVec2, seed: u32) -> u64 {
        let mut h = mix64(seed as u64 ^ SEED_SALT);
        h = mix64(h ^ (level as u64 ^ LEVEL_SALT));
        h = mix64(h ^ (cell.x as u32 as u64 ^ CELL_X_SALT));
        mix64(h ^ (cell.y as u32 as u64 ^ CELL_Y_SALT))
    }
}

impl<H: HashStrategy + ?Sized> HashStrategy for &H {
    #[inline]
    fn hash(&self, level: u32, cell: IVec2, seed: u32) -> u64 {
        (**self).hash(level, cell, seed)
    }
}
