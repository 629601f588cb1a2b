//! Generator configuration and builder
//!
//! A generator is fully determined by a seed and an ordered list of
//! per-level cell-size exponents. Both are validated once, up front, so
//! evaluation never has to fail.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};

/// Largest accepted cell-size exponent
///
/// Coordinates are `i32`. A cell and its neighbour must span less than
/// 2^31 pixels so that wrapping coordinate differences stay exact.
pub const MAX_CELL_UNIT: u32 = 30;

/// Ordered per-level cell-size exponents
///
/// `units[L]` is the base-2 log of the cell edge at level `L`. Level 0 is
/// evaluated first and the last level is terminal. Always non-empty.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<i32>", into = "Vec<i32>"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelConfig {
    units: Vec<u32>,
}

impl LevelConfig {
    /// Validate and build a level configuration from host integers
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the list is empty, or if any exponent is
    /// negative or greater than [`MAX_CELL_UNIT`].
    pub fn new<I>(units: I) -> Result<Self>
    where
        I: IntoIterator<Item = i32>,
    {
        let units = units
            .into_iter()
            .enumerate()
            .map(|(level, unit)| {
                u32::try_from(unit)
                    .ok()
                    .filter(|&u| u <= MAX_CELL_UNIT)
                    .ok_or_else(|| {
                        ChainError::InvalidConfig(format!(
                            "cell unit at level {} must be in 0..={} (got {})",
                            level, MAX_CELL_UNIT, unit
                        ))
                    })
            })
            .collect::<Result<Vec<u32>>>()?;

        if units.is_empty() {
            return Err(ChainError::InvalidConfig(
                "at least one level is required".to_string(),
            ));
        }

        Ok(Self { units })
    }

    /// Number of levels
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false; a validated configuration has a terminal level
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Index of the terminal level
    #[inline]
    pub fn terminal_level(&self) -> usize {
        self.units.len() - 1
    }

    /// Cell-size exponent of a level
    ///
    /// # Panics
    ///
    /// Panics if `level >= self.len()`.
    #[inline]
    pub fn unit(&self, level: usize) -> u32 {
        self.units[level]
    }

    /// Cell edge length of a level in pixels
    #[inline]
    pub fn cell_size(&self, level: usize) -> u32 {
        1 << self.unit(level)
    }

    /// All exponents in evaluation order
    #[inline]
    pub fn units(&self) -> &[u32] {
        &self.units
    }
}

impl TryFrom<Vec<i32>> for LevelConfig {
    type Error = ChainError;

    fn try_from(units: Vec<i32>) -> Result<Self> {
        Self::new(units)
    }
}

impl From<LevelConfig> for Vec<i32> {
    fn from(config: LevelConfig) -> Self {
        // MAX_CELL_UNIT fits in i32
        config.units.into_iter().map(|u| u as i32).collect()
    }
}

/// Configuration for a chained voronoi generator
///
/// The same configuration always produces the same map.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Seed fixing the entire output
    pub seed: u32,

    /// Per-level cell-size exponents
    pub levels: LevelConfig,
}

impl GeneratorConfig {
    /// Number of chained levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

/// Builder for creating a [`GeneratorConfig`] with validation
///
/// # Example
///
/// ```rust
/// use chained_voronoi::*;
///
/// let config = GeneratorConfigBuilder::new()
///     .seed(42)
///     .level(5)
///     .level(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.levels.units(), &[5, 3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    seed: Option<u32>,
    units: Vec<i32>,
}

impl GeneratorConfigBuilder {
    /// Create a builder with no seed and no levels
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Append one level with the given cell-size exponent
    pub fn level(mut self, unit: i32) -> Self {
        self.units.push(unit);
        self
    }

    /// Append several levels in evaluation order
    pub fn levels<I>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        self.units.extend(units);
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the level list is empty or contains an
    /// out-of-range exponent.
    pub fn build(self) -> Result<GeneratorConfig> {
        let levels = LevelConfig::new(self.units)?;
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(GeneratorConfig { seed, levels })
    }
}
