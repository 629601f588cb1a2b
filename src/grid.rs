//! Caller-owned 2-D pixel buffers
//!
//! A [`PixelGrid`] covers a rectangle of pixel space that need not start at
//! `(0, 0)`. Pixels are stored row-major: one row per y, x increasing
//! along the row.

use glam::IVec2;

use crate::color::Color;
use crate::geometry::PixelRect;

/// Row-major pixel buffer anchored at an arbitrary origin
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid<T> {
    origin: IVec2,
    width: u32,
    height: u32,
    pixels: Vec<T>,
}

/// Grid of region colors
pub type ColorGrid = PixelGrid<Color>;

impl<T: Clone + Default> PixelGrid<T> {
    /// Allocate a grid covering `[origin, origin + (width, height))`, filled with `T::default()`
    pub fn new(origin: IVec2, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
            pixels: vec![T::default(); width as usize * height as usize],
        }
    }
}

impl<T> PixelGrid<T> {
    #[inline]
    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel-space rectangle covered by the grid
    pub fn extent(&self) -> PixelRect {
        PixelRect::new(
            self.origin.x,
            self.origin.y,
            self.width.min(i32::MAX as u32) as i32,
            self.height.min(i32::MAX as u32) as i32,
        )
    }

    /// Storage index of a pixel, or `None` outside the grid
    fn index_of(&self, p: IVec2) -> Option<usize> {
        let dx = p.x as i64 - self.origin.x as i64;
        let dy = p.y as i64 - self.origin.y as i64;
        if dx < 0 || dy < 0 || dx >= self.width as i64 || dy >= self.height as i64 {
            return None;
        }
        Some(dy as usize * self.width as usize + dx as usize)
    }

    /// Pixel at a pixel-space coordinate
    pub fn get(&self, p: IVec2) -> Option<&T> {
        self.index_of(p).map(|i| &self.pixels[i])
    }

    /// Overwrite a pixel; returns false if `p` is outside the grid
    pub fn set(&mut self, p: IVec2, value: T) -> bool {
        match self.index_of(p) {
            Some(i) => {
                self.pixels[i] = value;
                true
            }
            None => false,
        }
    }

    /// Raw row-major storage
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    /// Iterate rows from the grid's min y upward
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on 0
        self.pixels.chunks(self.width.max(1) as usize)
    }
}

impl PixelGrid<Color> {
    /// Export as tightly packed 8-bit RGB, row-major
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }
}
