//! Coordinate hashing for live-cell sets, neighbour counts and the snapshot
//! index.
//!
//! Keys are small signed integer pairs, so SipHash's DoS resistance buys
//! nothing here. This is a multiply-rotate mix in the style of FxHash that
//! folds each 64-bit word into the running state.

use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hasher};

use super::coord::Coordinate;

const MX: u64 = 0x517c_c1b7_2722_0a95;
const MY: u64 = 0x6c62_272e_07bb_0142;

#[derive(Clone, Copy, Debug, Default)]
pub struct CoordHasher {
    state: u64,
}

impl CoordHasher {
    #[inline(always)]
    fn mix(&mut self, word: u64) {
        self.state = (self.state.rotate_left(5) ^ word).wrapping_mul(MX);
    }
}

impl Hasher for CoordHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut chunks = bytes.chunks_exact(8);
        for chunk in &mut chunks {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.mix(u64::from_le_bytes(word));
        }
        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut word = [0u8; 8];
            word[..rest.len()].copy_from_slice(rest);
            self.mix(u64::from_le_bytes(word));
        }
    }

    #[inline(always)]
    fn write_u8(&mut self, i: u8) {
        self.mix(i as u64);
    }

    #[inline(always)]
    fn write_u32(&mut self, i: u32) {
        self.mix(i as u64);
    }

    #[inline(always)]
    fn write_u64(&mut self, i: u64) {
        self.mix(i);
    }

    #[inline(always)]
    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64);
    }

    #[inline(always)]
    fn finish(&self) -> u64 {
        // Fold the high half down; hashbrown takes bucket bits from the low end.
        self.state ^ self.state.rotate_right(32).wrapping_mul(MY)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CoordBuildHasher;

impl BuildHasher for CoordBuildHasher {
    type Hasher = CoordHasher;

    #[inline]
    fn build_hasher(&self) -> CoordHasher {
        CoordHasher::default()
    }
}

/// Set of live cells.
pub type CellSet = HashSet<Coordinate, CoordBuildHasher>;

/// Per-cell map, used for neighbour occurrence counts.
pub type CellMap<V> = HashMap<Coordinate, V, CoordBuildHasher>;
