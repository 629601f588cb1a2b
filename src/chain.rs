//! Chained voronoi evaluation and region fill
//!
//! A pixel is resolved level by level. At every non-terminal level the
//! query moves to the position of the nearest root, and that position, not
//! the original pixel, is what the next level quantizes. At the terminal
//! level the nearest root's color is returned.

use glam::IVec2;
use log::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::color::Color;
use crate::config::{GeneratorConfig, LevelConfig};
use crate::error::{ChainError, Result};
use crate::geometry::PixelRect;
use crate::grid::{ColorGrid, PixelGrid};
use crate::hash::{HashStrategy, MixHash};
use crate::resolver::CellResolver;

/// Anything that can paint a rectangle of a 2-D target
pub trait TextureGenerator {
    /// Pixel type written into the target
    type Pixel;

    /// Write every pixel of `rect` into `target`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `rect` is not contained in the target's extent.
    /// An empty `rect` is a no-op.
    fn generate_texture(
        &self,
        rect: PixelRect,
        target: &mut PixelGrid<Self::Pixel>,
    ) -> Result<()>;
}

/// Deterministic chained voronoi region-map generator
///
/// Holds only the immutable seed, level configuration and hash strategy.
/// Every query is a pure function of those and the pixel coordinate, so a
/// generator can be shared freely between threads.
///
/// # Example
///
/// ```rust
/// use chained_voronoi::*;
///
/// let config = GeneratorConfigBuilder::new()
///     .seed(42)
///     .levels([3, 2])
///     .build()
///     .unwrap();
///
/// let generator = ChainedVoronoi::new(config);
/// let mut grid = ColorGrid::new(IVec2::ZERO, 16, 16);
/// generator.fill(PixelRect::new(0, 0, 16, 16), &mut grid).unwrap();
///
/// assert_eq!(grid.get(IVec2::new(3, 5)), Some(&generator.color_at(IVec2::new(3, 5))));
/// ```
#[derive(Debug, Clone)]
pub struct ChainedVoronoi<H = MixHash> {
    resolver: CellResolver<H>,
}

impl ChainedVoronoi<MixHash> {
    /// Create a generator using the default [`MixHash`] strategy
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_hasher(config, MixHash)
    }
}

impl<H: HashStrategy> ChainedVoronoi<H> {
    /// Create a generator with a custom hash strategy
    pub fn with_hasher(config: GeneratorConfig, hasher: H) -> Self {
        debug!(
            "chained voronoi: seed={} levels={} cell sizes={:?}",
            config.seed,
            config.level_count(),
            config
                .levels
                .units()
                .iter()
                .map(|&u| 1u32 << u)
                .collect::<Vec<_>>()
        );

        Self {
            resolver: CellResolver::with_hasher(config.seed, config.levels, hasher),
        }
    }

    #[inline]
    pub fn resolver(&self) -> &CellResolver<H> {
        &self.resolver
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.resolver.seed()
    }

    #[inline]
    pub fn levels(&self) -> &LevelConfig {
        self.resolver.levels()
    }

    /// Region color of a pixel, starting the chain at level 0
    #[inline]
    pub fn color_at(&self, p: IVec2) -> Color {
        self.evaluate_at_level(0, p)
    }

    /// Run the chain from `level` onward with `p` as that level's query
    ///
    /// # Panics
    ///
    /// Panics if `level` is not a configured level.
    pub fn evaluate_at_level(&self, level: usize, p: IVec2) -> Color {
        let terminal = self.levels().terminal_level();
        assert!(level <= terminal, "level {} out of range", level);

        let mut p = p;
        for level in level..terminal {
            p = self.resolver.nearest_position(level, p);
        }
        self.resolver.nearest_color(terminal, p)
    }

    /// Fill `rect` of `target` with region colors
    ///
    /// Rows are evaluated in parallel when the `parallel` feature is on.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `rect` does not fit inside `target`; nothing
    /// is written in that case. An empty `rect` is a no-op.
    pub fn fill(&self, rect: PixelRect, target: &mut ColorGrid) -> Result<()> {
        if !self.check_fill(rect, target)? {
            return Ok(());
        }

        #[cfg(feature = "parallel")]
        {
            let (row0, col0, width) = fill_offsets(rect, target);
            target
                .as_mut_slice()
                .par_chunks_mut(width)
                .skip(row0)
                .take(rect.height as usize)
                .enumerate()
                .for_each(|(r, row)| self.fill_row(rect, r, &mut row[col0..]));
        }

        #[cfg(not(feature = "parallel"))]
        self.fill_rows(rect, target);

        Ok(())
    }

    /// Single-threaded [`fill`](Self::fill); produces identical output
    pub fn fill_serial(&self, rect: PixelRect, target: &mut ColorGrid) -> Result<()> {
        if self.check_fill(rect, target)? {
            self.fill_rows(rect, target);
        }
        Ok(())
    }

    /// Allocate a `width` x `height` grid at the origin and fill all of it
    pub fn render(&self, width: u32, height: u32) -> ColorGrid {
        let mut grid = ColorGrid::new(IVec2::ZERO, width, height);
        let rect = grid.extent();
        if !rect.is_empty() {
            debug!("render {}x{}", width, height);
            self.fill_rows(rect, &mut grid);
        }
        grid
    }

    /// Validate a fill request; `Ok(false)` means there is nothing to do
    fn check_fill(&self, rect: PixelRect, target: &ColorGrid) -> Result<bool> {
        if rect.is_empty() {
            trace!("fill: empty rect {}, nothing to do", rect);
            return Ok(false);
        }

        let extent = target.extent();
        if !extent.contains_rect(&rect) {
            return Err(ChainError::OutOfBounds {
                rect,
                buffer: extent,
            });
        }

        debug!("fill: rect {} ({} pixels)", rect, rect.area());
        Ok(true)
    }

    fn fill_rows(&self, rect: PixelRect, target: &mut ColorGrid) {
        let (row0, col0, width) = fill_offsets(rect, target);
        target
            .as_mut_slice()
            .chunks_mut(width)
            .skip(row0)
            .take(rect.height as usize)
            .enumerate()
            .for_each(|(r, row)| self.fill_row(rect, r, &mut row[col0..]));
    }

    /// Fill row `r` of `rect`; `row` starts at the rect's min x
    fn fill_row(&self, rect: PixelRect, r: usize, row: &mut [Color]) {
        let y = rect.y.wrapping_add(r as i32);
        for (c, pixel) in row[..rect.width as usize].iter_mut().enumerate() {
            *pixel = self.color_at(IVec2::new(rect.x.wrapping_add(c as i32), y));
        }
    }
}

/// First row, first column and row length of a validated, non-empty fill
fn fill_offsets(rect: PixelRect, target: &ColorGrid) -> (usize, usize, usize) {
    let origin = target.origin();
    let row0 = (rect.y as i64 - origin.y as i64) as usize;
    let col0 = (rect.x as i64 - origin.x as i64) as usize;
    (row0, col0, target.width() as usize)
}

impl<H: HashStrategy> TextureGenerator for ChainedVoronoi<H> {
    type Pixel = Color;

    fn generate_texture(&self, rect: PixelRect, target: &mut ColorGrid) -> Result<()> {
        self.fill(rect, target)
    }
}

/// Fill `rect` of `target` from a seed and raw per-level cell-size exponents
///
/// The configuration is validated before any pixel is evaluated.
///
/// # Errors
///
/// Returns `InvalidConfig` for an empty or out-of-range `units` list and
/// `OutOfBounds` if `rect` does not fit inside `target`.
pub fn fill_region(
    seed: u32,
    units: &[i32],
    rect: PixelRect,
    target: &mut ColorGrid,
) -> Result<()> {
    let levels = LevelConfig::new(units.iter().copied())?;
    ChainedVoronoi::new(GeneratorConfig { seed, levels }).fill(rect, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfigBuilder;
    use crate::hash::ReseededRng;
    use std::collections::{HashMap, HashSet};

    const SENTINEL: Color = Color::new(1, 2, 3);

    fn generator(seed: u32, units: &[i32]) -> ChainedVoronoi {
        let config = GeneratorConfigBuilder::new()
            .seed(seed)
            .levels(units.iter().copied())
            .build()
            .unwrap();
        ChainedVoronoi::new(config)
    }

    fn sentinel_grid(origin: IVec2, width: u32, height: u32) -> ColorGrid {
        let mut grid = ColorGrid::new(origin, width, height);
        grid.as_mut_slice().fill(SENTINEL);
        grid
    }

    #[test]
    fn test_determinism_across_instances_and_order() {
        let a = generator(42, &[5, 3, 1]);
        let b = generator(42, &[5, 3, 1]);

        let rect = PixelRect::new(-20, -20, 40, 40);
        let forward: Vec<Color> = rect.pixels().map(|p| a.color_at(p)).collect();
        let mut backward: Vec<Color> = rect
            .pixels()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|p| b.color_at(p))
            .collect();
        backward.reverse();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generator(1, &[4, 2]);
        let b = generator(2, &[4, 2]);
        let rect = PixelRect::new(0, 0, 32, 32);
        assert!(rect.pixels().any(|p| a.color_at(p) != b.color_at(p)));
    }

    #[test]
    fn test_single_level_is_direct_lookup() {
        let generator = generator(7, &[3]);
        for p in PixelRect::new(-10, -10, 20, 20).pixels() {
            assert_eq!(generator.color_at(p), generator.resolver().nearest_color(0, p));
        }
    }

    #[test]
    fn test_chain_feeds_root_position_forward() {
        let generator = generator(9, &[4, 3, 2]);
        let resolver = generator.resolver();
        for p in PixelRect::new(0, 0, 24, 24).pixels() {
            let p1 = resolver.nearest_position(0, p);
            let p2 = resolver.nearest_position(1, p1);
            let expected = resolver.nearest_color(2, p2);
            assert_eq!(generator.color_at(p), expected);
            assert_eq!(generator.evaluate_at_level(1, p1), expected);
        }
    }

    #[test]
    fn test_known_colors_seed_42() {
        let generator = generator(42, &[3, 2]);
        let expected = [
            (IVec2::new(0, 0), Color::new(93, 204, 218)),
            (IVec2::new(3, 5), Color::new(245, 12, 97)),
            (IVec2::new(15, 15), Color::new(189, 222, 173)),
            (IVec2::new(-9, 20), Color::new(187, 54, 112)),
            (IVec2::new(100, -37), Color::new(151, 183, 26)),
        ];
        for (p, color) in expected {
            assert_eq!(generator.color_at(p), color, "pixel {:?}", p);
        }
    }

    #[test]
    fn test_known_colors_seed_42_reseeded() {
        let config = GeneratorConfigBuilder::new()
            .seed(42)
            .levels([3, 2])
            .build()
            .unwrap();
        let generator = ChainedVoronoi::with_hasher(config, ReseededRng);
        assert_eq!(generator.color_at(IVec2::new(15, 15)), Color::new(84, 183, 18));
        assert_eq!(generator.color_at(IVec2::new(-9, 20)), Color::new(148, 242, 65));
        assert_eq!(generator.color_at(IVec2::new(100, -37)), Color::new(250, 43, 89));
    }

    #[test]
    fn test_long_level_list() {
        // Unit-0 levels leave the query in place, so the chain only has to
        // reach the terminal level without exhausting the stack
        let levels = LevelConfig::new(vec![0; 200_000]).unwrap();
        let generator = ChainedVoronoi::new(GeneratorConfig { seed: 42, levels });
        let p = IVec2::new(3, 4);

        let terminal = generator.levels().terminal_level();
        assert_eq!(generator.color_at(p), generator.resolver().root_color(terminal, p));
    }

    #[test]
    #[should_panic]
    fn test_evaluate_past_terminal_level_panics() {
        let generator = generator(1, &[3, 2]);
        generator.evaluate_at_level(2, IVec2::ZERO);
    }

    #[test]
    fn test_scenario_seed_42_units_3_2() {
        let generator = generator(42, &[3, 2]);
        let resolver = generator.resolver();
        let rect = PixelRect::new(0, 0, 16, 16);

        let mut grid = ColorGrid::new(IVec2::ZERO, 16, 16);
        generator.fill(rect, &mut grid).unwrap();

        let mut cell_colors: HashMap<IVec2, Color> = HashMap::new();
        let mut colors = HashSet::new();
        for p in rect.pixels() {
            let color = *grid.get(p).unwrap();
            colors.insert(color);

            let anchor = resolver.nearest_position(0, p);
            let terminal = resolver.nearest_root(1, anchor);
            let shared = *cell_colors.entry(terminal.cell).or_insert(color);
            assert_eq!(shared, color, "pixels in one terminal cell must share a color");
        }

        assert_eq!(grid.as_slice().len(), 256);
        assert!(colors.len() <= (16 / 4 + 2) * (16 / 4 + 2));
        assert!(colors.len() <= cell_colors.len());
    }

    #[test]
    fn test_zero_area_fill_is_noop() {
        let generator = generator(42, &[3, 2]);
        let mut grid = sentinel_grid(IVec2::ZERO, 8, 8);

        generator.fill(PixelRect::new(0, 0, 0, 8), &mut grid).unwrap();
        generator.fill(PixelRect::new(0, 0, 8, -3), &mut grid).unwrap();
        // Empty rects far outside the buffer are still fine
        generator.fill(PixelRect::new(1000, 1000, 0, 0), &mut grid).unwrap();
        generator.fill_serial(PixelRect::new(0, 0, 0, 0), &mut grid).unwrap();

        assert!(grid.as_slice().iter().all(|&c| c == SENTINEL));
    }

    #[test]
    fn test_out_of_bounds_writes_nothing() {
        let generator = generator(42, &[3, 2]);
        let mut grid = sentinel_grid(IVec2::ZERO, 8, 8);

        let result = generator.fill(PixelRect::new(0, 0, 16, 16), &mut grid);
        assert_eq!(
            result,
            Err(ChainError::OutOfBounds {
                rect: PixelRect::new(0, 0, 16, 16),
                buffer: PixelRect::new(0, 0, 8, 8),
            })
        );

        let result = generator.fill_serial(PixelRect::new(-1, 0, 4, 4), &mut grid);
        assert!(matches!(result, Err(ChainError::OutOfBounds { .. })));

        assert!(grid.as_slice().iter().all(|&c| c == SENTINEL));
    }

    #[test]
    fn test_fill_into_offset_buffer() {
        let generator = generator(3, &[4, 2]);
        let mut grid = sentinel_grid(IVec2::new(-8, -8), 16, 16);
        let rect = PixelRect::new(-4, -6, 8, 10);

        generator.fill(rect, &mut grid).unwrap();

        for p in grid.extent().pixels() {
            let pixel = *grid.get(p).unwrap();
            if rect.contains(p) {
                assert_eq!(pixel, generator.color_at(p));
            } else {
                assert_eq!(pixel, SENTINEL);
            }
        }
    }

    #[test]
    fn test_fill_matches_fill_serial() {
        let generator = generator(77, &[5, 3, 2]);
        let rect = PixelRect::new(-13, 5, 37, 29);

        let mut parallel = sentinel_grid(IVec2::new(-20, 0), 64, 40);
        let mut serial = parallel.clone();
        generator.fill(rect, &mut parallel).unwrap();
        generator.fill_serial(rect, &mut serial).unwrap();

        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_render_covers_whole_grid() {
        let generator = generator(5, &[3, 1]);
        let grid = generator.render(12, 7);
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 7);
        for p in grid.extent().pixels() {
            assert_eq!(grid.get(p), Some(&generator.color_at(p)));
        }

        let empty = generator.render(0, 0);
        assert!(empty.as_slice().is_empty());
    }

    #[test]
    fn test_texture_generator_trait() {
        fn paint<G: TextureGenerator<Pixel = Color>>(g: &G, grid: &mut ColorGrid) -> Result<()> {
            let rect = grid.extent();
            g.generate_texture(rect, grid)
        }

        let generator = generator(11, &[2]);
        let mut grid = ColorGrid::new(IVec2::new(4, 4), 4, 4);
        paint(&generator, &mut grid).unwrap();
        assert_eq!(grid, {
            let mut expected = ColorGrid::new(IVec2::new(4, 4), 4, 4);
            generator.fill_serial(expected.extent(), &mut expected).unwrap();
            expected
        });
    }

    #[test]
    fn test_fill_region_validates_first() {
        let mut grid = sentinel_grid(IVec2::ZERO, 4, 4);
        let rect = PixelRect::new(0, 0, 4, 4);

        let result = fill_region(1, &[], rect, &mut grid);
        assert!(matches!(result, Err(ChainError::InvalidConfig(_))));

        let result = fill_region(1, &[2, -1], rect, &mut grid);
        assert!(matches!(result, Err(ChainError::InvalidConfig(_))));

        let result = fill_region(1, &[40], rect, &mut grid);
        assert!(matches!(result, Err(ChainError::InvalidConfig(_))));

        assert!(grid.as_slice().iter().all(|&c| c == SENTINEL));

        fill_region(1, &[2, 1], rect, &mut grid).unwrap();
        let expected = generator(1, &[2, 1]);
        assert_eq!(grid.get(IVec2::new(3, 1)), Some(&expected.color_at(IVec2::new(3, 1))));
    }

    #[test]
    fn test_reseeded_generator_is_deterministic() {
        let config = GeneratorConfigBuilder::new()
            .seed(42)
            .levels([3, 2])
            .build()
            .unwrap();
        let a = ChainedVoronoi::with_hasher(config.clone(), ReseededRng);
        let b = ChainedVoronoi::with_hasher(config, ReseededRng);

        let mut grid_a = ColorGrid::new(IVec2::ZERO, 16, 16);
        let mut grid_b = ColorGrid::new(IVec2::ZERO, 16, 16);
        a.fill(grid_a.extent(), &mut grid_a).unwrap();
        b.fill_serial(grid_b.extent(), &mut grid_b).unwrap();
        assert_eq!(grid_a, grid_b);
    }

    #[test]
    fn test_generator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChainedVoronoi>();
        assert_send_sync::<ChainedVoronoi<ReseededRng>>();
    }
}
