//! Chained voronoi region maps
//!
//! Deterministic, multi-scale procedural textures built by chaining jittered
//! Voronoi partitions. Each level snaps the query to the nearest jittered
//! cell root, and the root's position becomes the query for the next level.
//! The terminal level resolves a color instead, giving blob-like, fractal
//! region maps suited to biome or terrain layouts.
//!
//! # Quick Start
//!
//! ```rust
//! use chained_voronoi::*;
//!
//! let config = GeneratorConfigBuilder::new()
//!     .seed(42)
//!     .levels([5, 3, 2])
//!     .build()
//!     .unwrap();
//!
//! let generator = ChainedVoronoi::new(config);
//!
//! // The host owns the buffer; it can sit anywhere in pixel space
//! let mut grid = ColorGrid::new(IVec2::new(-64, -64), 128, 128);
//! generator.fill(grid.extent(), &mut grid).unwrap();
//!
//! let [r, g, b] = grid.get(IVec2::ZERO).unwrap().to_array();
//! println!("center pixel: {} {} {}", r, g, b);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): fills rows concurrently with rayon
//! - `serde`: serialization support for configuration types

pub mod error;
pub mod config;
pub mod geometry;
pub mod hash;
pub mod color;
pub mod resolver;
pub mod grid;
pub mod chain;

pub use error::{ChainError, Result};
pub use config::{GeneratorConfig, GeneratorConfigBuilder, LevelConfig, MAX_CELL_UNIT};
pub use geometry::PixelRect;
pub use hash::{HashStrategy, MixHash, ReseededRng};
pub use color::{Color, RegionColorF32};
pub use resolver::{CellResolver, Root};
pub use grid::{ColorGrid, PixelGrid};
pub use chain::{fill_region, ChainedVoronoi, TextureGenerator};

// Re-export glam::IVec2 for convenience
pub use glam::IVec2;
