//! Integer geometry shared by the resolver and the region fill
//!
//! Pixel coordinates are `i32` and all arithmetic on them wraps on the
//! two's-complement ring, so results never depend on the platform.

use std::fmt;

use glam::IVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cell containing a pixel at the given cell-size exponent
///
/// Arithmetic shift, so negative coordinates floor toward negative infinity.
#[inline]
pub fn cell_of(p: IVec2, unit: u32) -> IVec2 {
    IVec2::new(p.x >> unit, p.y >> unit)
}

/// Pixel coordinate of a cell's minimum corner
#[inline]
pub fn cell_origin(cell: IVec2, unit: u32) -> IVec2 {
    IVec2::new(cell.x.wrapping_shl(unit), cell.y.wrapping_shl(unit))
}

/// Canonical index of a cell on the wrapped coordinate ring
///
/// At cell-size exponent `unit` there are 2^(32 - unit) cells per axis. Cell
/// indices outside `[-2^(31 - unit), 2^(31 - unit))` alias a cell inside that
/// range and are folded onto it.
#[inline]
pub fn wrap_cell(cell: IVec2, unit: u32) -> IVec2 {
    cell_of(cell_origin(cell, unit), unit)
}

/// Squared Euclidean distance between two pixels
///
/// Differences are taken with wrapping subtraction and widened to `i64`,
/// which is exact whenever the true difference fits in `i32`.
#[inline]
pub fn distance_sq(a: IVec2, b: IVec2) -> i64 {
    let dx = a.x.wrapping_sub(b.x) as i64;
    let dy = a.y.wrapping_sub(b.y) as i64;
    dx * dx + dy * dy
}

/// Axis-aligned pixel rectangle, closed on the min side and open on the max side
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// Minimum x
    pub x: i32,
    /// Minimum y
    pub y: i32,
    /// Width in pixels; non-positive means empty
    pub width: i32,
    /// Height in pixels; non-positive means empty
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width as u64 * self.height as u64
        }
    }

    /// Exclusive max x, widened so it cannot overflow
    #[inline]
    pub fn x_max(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive max y, widened so it cannot overflow
    #[inline]
    pub fn y_max(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Whether a pixel lies inside the rectangle
    pub fn contains(&self, p: IVec2) -> bool {
        (p.x as i64) >= self.x as i64
            && (p.x as i64) < self.x_max()
            && (p.y as i64) >= self.y as i64
            && (p.y as i64) < self.y_max()
    }

    /// Whether `other` lies entirely inside this rectangle
    ///
    /// An empty `other` is always contained.
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.x_max() <= self.x_max()
            && other.y_max() <= self.y_max()
    }

    /// Iterate every pixel, x outer and y inner
    pub fn pixels(&self) -> impl Iterator<Item = IVec2> {
        let (x0, x1) = (self.x as i64, self.x_max());
        let (y0, y1) = (self.y as i64, self.y_max());
        (x0..x1).flat_map(move |x| (y0..y1).map(move |y| IVec2::new(x as i32, y as i32)))
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}
