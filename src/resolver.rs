//! Cell root resolution
//!
//! Every cell at every level owns one jittered root. The root is rebuilt
//! from `(level, cell, seed)` on each query and never stored. Jitter keeps
//! the root inside its own cell, so the nearest root to any pixel is always
//! found among the 3x3 cells around the pixel's cell.

use glam::IVec2;

use crate::color::Color;
use crate::config::LevelConfig;
use crate::geometry::{cell_of, cell_origin, distance_sq, wrap_cell};
use crate::hash::{HashStrategy, MixHash};

/// Added to the seed for the color hash so it is independent of the position hash
const COLOR_STREAM: u32 = 0x6b43_a9b5;

/// Neighbourhood offsets in scan order: x offset outer, y offset inner, both ascending
const NEIGHBOURHOOD: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 0),
    IVec2::new(0, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
];

/// Nearest root found for a query pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Root {
    /// Level the root belongs to
    pub level: usize,
    /// Cell owning the root
    pub cell: IVec2,
    /// Jittered root position, inside `cell`
    pub position: IVec2,
}

/// Resolves jittered cell roots for every level of a configuration
///
/// Generic over the [`HashStrategy`] so alternative hashing schemes can be
/// swapped in without touching the search.
#[derive(Debug, Clone)]
pub struct CellResolver<H = MixHash> {
    seed: u32,
    levels: LevelConfig,
    hasher: H,
}

impl CellResolver<MixHash> {
    /// Create a resolver using the default [`MixHash`] strategy
    pub fn new(seed: u32, levels: LevelConfig) -> Self {
        Self::with_hasher(seed, levels, MixHash)
    }
}

impl<H: HashStrategy> CellResolver<H> {
    /// Create a resolver with a custom hash strategy
    pub fn with_hasher(seed: u32, levels: LevelConfig, hasher: H) -> Self {
        Self {
            seed,
            levels,
            hasher,
        }
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    pub fn levels(&self) -> &LevelConfig {
        &self.levels
    }

    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Jittered root position of a cell
    ///
    /// Offsets are taken from the low and high halves of the position hash,
    /// masked to the cell size, so the root always lies in
    /// `[cell * size, (cell + 1) * size)` on both axes. Aliased cell indices
    /// are folded with [`wrap_cell`] first, so every cell has one root.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not a configured level.
    pub fn root_position(&self, level: usize, cell: IVec2) -> IVec2 {
        let unit = self.levels.unit(level);
        let cell = wrap_cell(cell, unit);
        let mask = (1u64 << unit) - 1;
        let hash = self.hasher.hash(level as u32, cell, self.seed);

        let offset = IVec2::new((hash & mask) as i32, ((hash >> 32) & mask) as i32);
        let origin = cell_origin(cell, unit);
        IVec2::new(
            origin.x.wrapping_add(offset.x),
            origin.y.wrapping_add(offset.y),
        )
    }

    /// Color of a cell's root
    ///
    /// Uses a second hash call on a separate seed stream.
    pub fn root_color(&self, level: usize, cell: IVec2) -> Color {
        let cell = wrap_cell(cell, self.levels.unit(level));
        let seed = self.seed.wrapping_add(COLOR_STREAM);
        Color::from_hash(self.hasher.hash(level as u32, cell, seed))
    }

    /// Nearest root to a pixel at a level
    ///
    /// Scans the 3x3 cells around the pixel's cell in
    /// [`NEIGHBOURHOOD`] order. Only a strictly smaller distance replaces the
    /// current best, so on ties the earliest scanned cell wins.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not a configured level.
    pub fn nearest_root(&self, level: usize, p: IVec2) -> Root {
        let unit = self.levels.unit(level);
        let center = cell_of(p, unit);

        let mut best = Root {
            level,
            cell: center,
            position: p,
        };
        let mut best_dist = i64::MAX;

        for offset in NEIGHBOURHOOD {
            let cell = wrap_cell(
                IVec2::new(
                    center.x.wrapping_add(offset.x),
                    center.y.wrapping_add(offset.y),
                ),
                unit,
            );
            let position = self.root_position(level, cell);
            let dist = distance_sq(position, p);
            if dist < best_dist {
                best_dist = dist;
                best = Root {
                    level,
                    cell,
                    position,
                };
            }
        }

        best
    }

    /// Position of the nearest root, used at non-terminal levels
    #[inline]
    pub fn nearest_position(&self, level: usize, p: IVec2) -> IVec2 {
        self.nearest_root(level, p).position
    }

    /// Color of the nearest root, used at the terminal level
    ///
    /// The color hash is evaluated for the winning cell only.
    #[inline]
    pub fn nearest_color(&self, level: usize, p: IVec2) -> Color {
        let root = self.nearest_root(level, p);
        self.root_color(level, root.cell)
    }
}
