//! Detection ("map") colors
//!
//! Every cell paints itself into the hidden detection layer with a color no
//! other cell on that layer uses. The pointer is resolved to a cell by reading
//! the pixel under it and comparing all three channels.

use std::fmt;

use egui::Color32;

/// Odd multiplier, so `id * SPREAD mod 2^24` is a bijection on 24-bit ids.
/// Neighbouring ids land far apart in RGB space.
const SPREAD: u32 = 0x9E_37_79;
const MASK: u32 = 0x00FF_FFFF;

/// Opaque RGB color used only on the detection layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetectionColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DetectionColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color for the `id`-th allocation. Never black, since black
    /// would be indistinguishable from a cleared layer on some surfaces.
    pub fn from_id(id: u32) -> Self {
        let v = ((id % MASK) + 1).wrapping_mul(SPREAD) & MASK;
        Self {
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for DetectionColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Hands out detection colors for everything sharing one detection layer.
#[derive(Debug, Clone, Default)]
pub struct DetectionPalette {
    next_id: u32,
}

impl DetectionPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> DetectionColor {
        let color = DetectionColor::from_id(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        color
    }

    /// Number of colors handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next_id
    }
}
