//! Light-sweep shading (stateless).
//!
//! A bright band `SWEEP_WIDTH` diagonals wide travels across the grid,
//! followed by a dimmer tail `TAIL_LENGTH` diagonals long. Everything here is
//! a pure function of a tile's base color, its diagonal and the sweep
//! position, so stored tile colors never change.

use tessella_core::{Rgba, SWEEP_WIDTH, TAIL_LENGTH};

use crate::grid::Tile;

/// Channel and opacity boost at the front of the band.
const BAND_RGB_GAIN: f32 = 0.8;
const BAND_ALPHA_GAIN: f32 = 0.5;

/// Channel and opacity boost at the start of the tail.
const TAIL_RGB_GAIN: f32 = 0.4;
const TAIL_ALPHA_GAIN: f32 = 0.3;

/// Display color of a tile on `diagonal` while the sweep is at `position`.
pub fn shade(color: Rgba, diagonal: usize, position: usize) -> Rgba {
    let distance = position as i64 - diagonal as i64;

    if (0..SWEEP_WIDTH).contains(&distance) {
        let intensity = 1.0 - distance as f32 / SWEEP_WIDTH as f32;
        color.scale(1.0 + intensity * BAND_RGB_GAIN, 1.0 + intensity * BAND_ALPHA_GAIN)
    } else if (SWEEP_WIDTH..SWEEP_WIDTH + TAIL_LENGTH).contains(&distance) {
        let intensity = 1.0 - (distance - SWEEP_WIDTH) as f32 / TAIL_LENGTH as f32;
        color.scale(1.0 + intensity * TAIL_RGB_GAIN, 1.0 + intensity * TAIL_ALPHA_GAIN)
    } else {
        color
    }
}

/// Overwrite `display` with the shaded color of every tile.
pub fn paint(tiles: &[Tile], position: usize, display: &mut Vec<Rgba>) {
    display.clear();
    display.extend(
        tiles
            .iter()
            .map(|tile| shade(tile.color, tile.diagonal(), position)),
    );
}

/// Shaded colors of every tile, in tile order.
pub fn display_colors(tiles: &[Tile], position: usize) -> Vec<Rgba> {
    let mut display = Vec::with_capacity(tiles.len());
    paint(tiles, position, &mut display);
    display
}

/// Position of the sweep across the grid's diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepState {
    position: usize,
    max_diagonal: usize,
}

impl SweepState {
    pub fn new(max_diagonal: usize) -> Self {
        Self {
            position: 0,
            max_diagonal,
        }
    }

    pub fn with_position(max_diagonal: usize, position: usize) -> Self {
        Self {
            position,
            max_diagonal,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn max_diagonal(&self) -> usize {
        self.max_diagonal
    }

    /// Last position before the sweep wraps; the tail has left the grid by then.
    pub fn limit(&self) -> usize {
        self.max_diagonal + (SWEEP_WIDTH + TAIL_LENGTH) as usize
    }

    /// Bring an out-of-range position back to the start.
    pub fn normalize(&mut self) {
        if self.position > self.limit() {
            self.position = 0;
        }
    }

    /// Step to the next diagonal, wrapping past the limit.
    pub fn advance(&mut self) {
        self.position += 1;
        self.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Rgba = Rgba::new(100, 50, 200, 0.2);

    #[test]
    fn test_band_front_is_brightest() {
        let c = shade(BASE, 3, 3);
        assert_eq!((c.r, c.g, c.b), (180, 90, 255));
        assert!((c.a - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_band_fades_towards_tail() {
        // distance 4 -> intensity 0.5
        let c = shade(BASE, 0, 4);
        assert_eq!((c.r, c.g, c.b), (140, 70, 255));
        assert!((c.a - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_tail_shading() {
        // distance 8 -> first tail diagonal, intensity 1
        let c = shade(BASE, 2, 10);
        assert_eq!((c.r, c.g, c.b), (140, 70, 255));
        assert!((c.a - 0.26).abs() < 1e-6);

        // distance 12 -> last tail diagonal, intensity 0.2
        let c = shade(BASE, 0, 12);
        assert_eq!((c.r, c.g, c.b), (108, 54, 216));
        assert!((c.a - 0.212).abs() < 1e-6);
    }

    #[test]
    fn test_unlit_tiles_keep_base_color() {
        // Ahead of the band
        assert_eq!(shade(BASE, 5, 4), BASE);
        assert_eq!(shade(BASE, 20, 0), BASE);
        // Behind the tail
        assert_eq!(shade(BASE, 0, 13), BASE);
        assert_eq!(shade(BASE, 1, 40), BASE);
    }

    #[test]
    fn test_advance_wraps_after_limit() {
        let mut state = SweepState::new(6);
        assert_eq!(state.limit(), 19);
        for _ in 0..19 {
            state.advance();
        }
        assert_eq!(state.position(), 19);
        state.advance();
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_normalize_resets_out_of_range() {
        let mut state = SweepState::with_position(6, 20);
        state.normalize();
        assert_eq!(state.position(), 0);

        let mut state = SweepState::with_position(6, 19);
        state.normalize();
        assert_eq!(state.position(), 19);
    }
}
