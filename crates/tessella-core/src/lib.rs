//! Core types shared across the tessella crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Height of an equilateral triangle relative to its side length (`sqrt(3) / 2`).
pub const TRIANGLE_HEIGHT_RATIO: f64 = 0.866_025_403_784_438_6;

/// Number of diagonals covered by the bright band of the sweep.
pub const SWEEP_WIDTH: i64 = 8;

/// Number of diagonals covered by the fading tail behind the band.
pub const TAIL_LENGTH: i64 = 5;

/// Minimum time between two sweep steps, in milliseconds.
pub const SWEEP_INTERVAL_MS: u64 = 80;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// A translucent color with an opacity in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply the color channels and the opacity, clamping each to its range.
    pub fn scale(self, rgb_factor: f32, alpha_factor: f32) -> Self {
        let channel = |c: u8| (c as f32 * rgb_factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: (self.a * alpha_factor).clamp(0.0, 1.0),
        }
    }

    /// Composite this color over an opaque backdrop.
    pub fn blend_over(self, backdrop: Rgb) -> Rgb {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (bg as f32 + (fg as f32 - bg as f32) * a).round() as u8;
        Rgb::new(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }
}

/// CSS `rgba()` notation, for surfaces that want a color string.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

/// A point in viewport pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport covering a terminal area, given the pixel size of one cell.
    pub fn from_cells(columns: u16, rows: u16, cell_width: f64, cell_height: f64) -> Self {
        Self {
            width: columns as f64 * cell_width,
            height: rows as f64 * cell_height,
        }
    }

    /// True when there is nothing to cover (zero, negative or non-finite size).
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Which way a mosaic triangle points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Upward,
    Downward,
}

impl Orientation {
    /// Tiles alternate orientation like a checkerboard.
    pub fn for_cell(row: usize, col: usize) -> Self {
        if (row + col) % 2 == 0 {
            Orientation::Upward
        } else {
            Orientation::Downward
        }
    }
}

/// How neighbouring triangles are placed along a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One triangle per `size`-wide cell; gaps between neighbours show the backdrop.
    #[default]
    Spaced,
    /// Neighbours share edges, half a side apart, covering the viewport without gaps.
    Interlocked,
}

impl Layout {
    /// Switch to the other layout.
    pub fn toggle(&self) -> Self {
        match self {
            Layout::Spaced => Layout::Interlocked,
            Layout::Interlocked => Layout::Spaced,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Spaced => "spaced",
            Layout::Interlocked => "interlocked",
        }
    }
}
