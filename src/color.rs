//! Region colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color with channel intensities in `[0, 1]`
pub type RegionColorF32 = [f32; 4];

/// Opaque 8-bit-per-channel region color
///
/// Colors are compared and hashed exactly, which is what region-membership
/// checks need. Use [`Color::to_rgba_f32`] for `[0, 1]` intensities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Take the three low bytes of a hash as red, green and blue
    #[inline]
    pub fn from_hash(hash: u64) -> Self {
        Self {
            r: (hash & 0xff) as u8,
            g: ((hash >> 8) & 0xff) as u8,
            b: ((hash >> 16) & 0xff) as u8,
        }
    }

    /// Channel intensities in `[0, 1]` with alpha 1.0
    pub fn to_rgba_f32(self) -> RegionColorF32 {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for RegionColorF32 {
    fn from(color: Color) -> Self {
        color.to_rgba_f32()
    }
}
