//! Triangular mosaic tessellation.
//!
//! The grid is a row-major sequence of equilateral triangles that alternate
//! between pointing up and down. Each tile carries its geometry in viewport
//! pixels and a color drawn once, at build time, from a [`Palette`] with a
//! little random jitter. Grids are never edited in place; a resize builds a
//! new one.

use std::rc::Rc;

use rand::Rng;
use tessella_core::{Layout, Orientation, Point, Rgb, Rgba, TRIANGLE_HEIGHT_RATIO, Viewport};

use crate::palette::Palette;

/// Largest offset added to or subtracted from each base color channel.
const CHANNEL_JITTER: i32 = 30;

/// Lowest tile opacity.
const MIN_OPACITY: f32 = 0.15;

/// Width of the random opacity band above [`MIN_OPACITY`].
const OPACITY_SPREAD: f32 = 0.10;

/// Tolerance for points lying on a shared edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Most tiles a single grid may hold.
pub const MAX_TILES: usize = 4_000_000;

/// One triangular cell of the mosaic.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub vertices: [Point; 3],
    pub base_color: Rgb,
    /// Fill color after jitter. Fixed for the lifetime of the grid.
    pub color: Rgba,
}

impl Tile {
    /// Index of the diagonal this tile sits on; the sweep travels along these.
    pub fn diagonal(&self) -> usize {
        self.row + self.col
    }

    /// Whether `p` lies inside the triangle or on its boundary.
    pub fn contains(&self, p: Point) -> bool {
        let [a, b, c] = self.vertices;
        let d1 = edge_side(p, a, b);
        let d2 = edge_side(p, b, c);
        let d3 = edge_side(p, c, a);

        let has_neg = d1 < -EDGE_EPSILON || d2 < -EDGE_EPSILON || d3 < -EDGE_EPSILON;
        let has_pos = d1 > EDGE_EPSILON || d2 > EDGE_EPSILON || d3 > EDGE_EPSILON;
        !(has_neg && has_pos)
    }
}

fn edge_side(p: Point, a: Point, b: Point) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// A filled triangle ready to hand to a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    pub vertices: [Point; 3],
    pub fill: Rgba,
}

/// Picks the triangle edge length for a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleSizePolicy {
    /// Edge length on regular viewports.
    pub size: f64,
    /// Edge length on viewports narrower than `breakpoint`.
    pub narrow_size: f64,
    /// Viewport width below which `narrow_size` applies.
    pub breakpoint: f64,
}

impl Default for TriangleSizePolicy {
    fn default() -> Self {
        Self {
            size: 80.0,
            narrow_size: 60.0,
            breakpoint: 768.0,
        }
    }
}

impl TriangleSizePolicy {
    pub fn size_for(&self, viewport: Viewport) -> f64 {
        if viewport.width < self.breakpoint {
            self.narrow_size
        } else {
            self.size
        }
    }
}

/// The full set of tiles covering one viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    tiles: Rc<[Tile]>,
    rows: usize,
    cols: usize,
    triangle_size: f64,
    layout: Layout,
}

impl Grid {
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Shared handle to the tile sequence, for animators that outlive a borrow.
    pub fn shared_tiles(&self) -> Rc<[Tile]> {
        Rc::clone(&self.tiles)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn triangle_size(&self) -> f64 {
        self.triangle_size
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Highest diagonal index present in the grid.
    pub fn max_diagonal(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.rows - 1) + (self.cols - 1)
        }
    }

    /// Base (unswept) fill colors, one per tile.
    pub fn base_colors(&self) -> Vec<Rgba> {
        self.tiles.iter().map(|t| t.color).collect()
    }

    /// Index of the tile containing `p`, if any.
    ///
    /// Only the handful of tiles whose bounding boxes can hold `p` are tested.
    pub fn tile_at(&self, p: Point) -> Option<usize> {
        if self.is_empty() || !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        let s = self.triangle_size;
        let band = s * TRIANGLE_HEIGHT_RATIO;

        let row = (p.y / band).floor() as i64;
        let (col_lo, col_hi) = match self.layout {
            Layout::Spaced => {
                let c = (p.x / s).floor() as i64;
                (c - 1, c)
            }
            Layout::Interlocked => {
                let c = (p.x / (s / 2.0)).floor() as i64;
                (c - 1, c + 2)
            }
        };

        for r in (row - 1)..=row {
            if r < 0 || r as usize >= self.rows {
                continue;
            }
            for c in col_lo..=col_hi {
                if c < 0 || c as usize >= self.cols {
                    continue;
                }
                let idx = r as usize * self.cols + c as usize;
                if self.tiles[idx].contains(p) {
                    return Some(idx);
                }
            }
        }
        None
    }

    /// Drawable polygons, pairing each tile's geometry with a display color.
    ///
    /// `display` is indexed like [`Grid::tiles`]; tiles without a display
    /// entry fall back to their base color.
    pub fn draw_commands<'a>(&'a self, display: &'a [Rgba]) -> impl Iterator<Item = Polygon> + 'a {
        self.tiles.iter().enumerate().map(move |(i, tile)| Polygon {
            vertices: tile.vertices,
            fill: display.get(i).copied().unwrap_or(tile.color),
        })
    }
}

/// Build a [`Layout::Spaced`] grid covering `viewport`.
pub fn build_grid<R: Rng + ?Sized>(
    viewport: Viewport,
    triangle_size: f64,
    palette: &Palette,
    rng: &mut R,
) -> Grid {
    build_grid_with_layout(viewport, triangle_size, Layout::Spaced, palette, rng)
}

/// Build a grid covering `viewport` with the given layout.
///
/// Returns an empty grid for an empty viewport or a non-positive size.
pub fn build_grid_with_layout<R: Rng + ?Sized>(
    viewport: Viewport,
    triangle_size: f64,
    layout: Layout,
    palette: &Palette,
    rng: &mut R,
) -> Grid {
    if viewport.is_empty() || !triangle_size.is_finite() || triangle_size <= 0.0 {
        return Grid::default();
    }

    let s = triangle_size;
    let band = s * TRIANGLE_HEIGHT_RATIO;

    let cols = match layout {
        Layout::Spaced => (viewport.width / s).ceil() + 1.0,
        Layout::Interlocked => (2.0 * viewport.width / s).ceil() + 2.0,
    };
    let rows = (viewport.height / band).ceil() + 1.0;
    if !(rows * cols <= MAX_TILES as f64) {
        tracing::warn!(
            width = viewport.width,
            height = viewport.height,
            size = s,
            "mosaic would exceed {MAX_TILES} tiles, leaving it empty"
        );
        return Grid::default();
    }
    let (rows, cols) = (rows as usize, cols as usize);

    let mut tiles = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let x = match layout {
                Layout::Spaced => col as f64 * s,
                Layout::Interlocked => col as f64 * s / 2.0 - s / 2.0,
            };
            let y = row as f64 * band;
            let orientation = Orientation::for_cell(row, col);
            let vertices = match orientation {
                Orientation::Upward => [
                    Point::new(x, y + band),
                    Point::new(x + s / 2.0, y),
                    Point::new(x + s, y + band),
                ],
                Orientation::Downward => [
                    Point::new(x, y),
                    Point::new(x + s, y),
                    Point::new(x + s / 2.0, y + band),
                ],
            };

            let base_color = palette.pick(rng);
            let color = jitter(base_color, rng);
            tiles.push(Tile {
                row,
                col,
                orientation,
                vertices,
                base_color,
                color,
            });
        }
    }

    tracing::debug!(rows, cols, tiles = tiles.len(), size = s, layout = layout.name(), "built mosaic grid");

    Grid {
        tiles: tiles.into(),
        rows,
        cols,
        triangle_size: s,
        layout,
    }
}

/// Randomize a base color: each channel shifted by up to ±30, opacity in 0.15..0.25.
fn jitter<R: Rng + ?Sized>(base: Rgb, rng: &mut R) -> Rgba {
    let mut channel =
        |c: u8| (c as i32 + rng.random_range(-CHANNEL_JITTER..=CHANNEL_JITTER)).clamp(0, 255) as u8;
    let r = channel(base.r);
    let g = channel(base.g);
    let b = channel(base.b);
    let a = MIN_OPACITY + rng.random_range(0.0..OPACITY_SPREAD);
    Rgba::new(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn grid(width: f64, height: f64, size: f64, layout: Layout) -> Grid {
        let mut rng = StdRng::seed_from_u64(42);
        build_grid_with_layout(
            Viewport::new(width, height),
            size,
            layout,
            &Palette::default(),
            &mut rng,
        )
    }

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 0.01 && (a.y - b.y).abs() < 0.01
    }

    /// Evenly spaced sample points over the closed rectangle.
    fn samples(width: f64, height: f64, steps: usize) -> impl Iterator<Item = Point> {
        (0..=steps).flat_map(move |i| {
            (0..=steps).map(move |j| {
                Point::new(
                    width * i as f64 / steps as f64,
                    height * j as f64 / steps as f64,
                )
            })
        })
    }

    #[test]
    fn test_example_dimensions() {
        let g = grid(240.0, 138.0, 80.0, Layout::Spaced);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.len(), 12);

        let first = &g.tiles()[0];
        assert_eq!(first.orientation, Orientation::Upward);
        assert!(approx(first.vertices[0], Point::new(0.0, 69.28)));
        assert!(approx(first.vertices[1], Point::new(40.0, 0.0)));
        assert!(approx(first.vertices[2], Point::new(80.0, 69.28)));
    }

    #[test]
    fn test_height_just_over_two_bands_adds_row() {
        // 139 px is slightly more than two triangle heights at size 80
        let g = grid(240.0, 139.0, 80.0, Layout::Spaced);
        assert_eq!(g.rows(), 4);
        assert_eq!(g.len(), 16);
    }

    #[test]
    fn test_downward_vertices() {
        let g = grid(240.0, 138.0, 80.0, Layout::Spaced);
        let tile = &g.tiles()[1];
        assert_eq!((tile.row, tile.col), (0, 1));
        assert_eq!(tile.orientation, Orientation::Downward);
        assert!(approx(tile.vertices[0], Point::new(80.0, 0.0)));
        assert!(approx(tile.vertices[1], Point::new(160.0, 0.0)));
        assert!(approx(tile.vertices[2], Point::new(120.0, 69.28)));
    }

    #[test]
    fn test_orientation_follows_parity() {
        let g = grid(500.0, 400.0, 50.0, Layout::Spaced);
        for tile in g.tiles() {
            let expected = if (tile.row + tile.col) % 2 == 0 {
                Orientation::Upward
            } else {
                Orientation::Downward
            };
            assert_eq!(tile.orientation, expected);
        }
    }

    #[test]
    fn test_row_major_order() {
        let g = grid(300.0, 200.0, 60.0, Layout::Spaced);
        for (i, tile) in g.tiles().iter().enumerate() {
            assert_eq!(tile.row, i / g.cols());
            assert_eq!(tile.col, i % g.cols());
            assert_eq!(tile.diagonal(), tile.row + tile.col);
        }
        assert_eq!(g.max_diagonal(), g.rows() - 1 + g.cols() - 1);
    }

    #[test]
    fn test_colors_within_bounds() {
        let palette = Palette::default();
        let g = grid(800.0, 600.0, 40.0, Layout::Spaced);
        for tile in g.tiles() {
            assert!(palette.colors().contains(&tile.base_color));
            let dist = |a: u8, b: u8| (a as i32 - b as i32).abs();
            assert!(dist(tile.color.r, tile.base_color.r) <= 30);
            assert!(dist(tile.color.g, tile.base_color.g) <= 30);
            assert!(dist(tile.color.b, tile.base_color.b) <= 30);
            assert!(tile.color.a >= 0.15 && tile.color.a < 0.25);
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        assert_eq!(
            grid(640.0, 480.0, 80.0, Layout::Spaced),
            grid(640.0, 480.0, 80.0, Layout::Spaced)
        );

        let mut rng = StdRng::seed_from_u64(1);
        let other = build_grid(
            Viewport::new(640.0, 480.0),
            80.0,
            &Palette::default(),
            &mut rng,
        );
        assert_ne!(other, grid(640.0, 480.0, 80.0, Layout::Spaced));
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_grid() {
        assert!(grid(0.0, 0.0, 80.0, Layout::Spaced).is_empty());
        assert!(grid(100.0, 0.0, 80.0, Layout::Spaced).is_empty());
        assert!(grid(100.0, 100.0, 0.0, Layout::Spaced).is_empty());
        assert!(grid(100.0, 100.0, -5.0, Layout::Interlocked).is_empty());
        assert!(grid(100.0, 100.0, f64::NAN, Layout::Spaced).is_empty());

        let empty = Grid::default();
        assert_eq!(empty.max_diagonal(), 0);
        assert_eq!(empty.tile_at(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_oversized_grid_is_empty() {
        assert!(grid(1e30, 1.0, 1.0, Layout::Spaced).is_empty());
        assert!(grid(1e10, 1e10, 1.0, Layout::Interlocked).is_empty());
        assert!(grid(f64::INFINITY, 100.0, 80.0, Layout::Spaced).is_empty());
        assert!(grid(100.0, 100.0, 1e-300, Layout::Spaced).is_empty());

        let g = grid(1999.0, 10.0, 1.0, Layout::Spaced);
        assert_eq!((g.cols(), g.rows()), (2000, 13));
        assert!(g.len() <= MAX_TILES);
    }

    #[test]
    fn test_spaced_cells_cover_viewport() {
        let (w, h, s) = (317.0, 233.0, 45.0);
        let g = grid(w, h, s, Layout::Spaced);
        let band = s * TRIANGLE_HEIGHT_RATIO;
        for p in samples(w, h, 40) {
            let covered = g.tiles().iter().any(|t| {
                let x = t.col as f64 * s;
                let y = t.row as f64 * band;
                p.x >= x && p.x <= x + s && p.y >= y && p.y <= y + band
            });
            assert!(covered, "{p:?} outside every tile cell");
        }
    }

    #[test]
    fn test_spaced_layout_leaves_gaps() {
        let g = grid(240.0, 138.0, 80.0, Layout::Spaced);
        assert_eq!(g.tile_at(Point::new(5.0, 5.0)), None);
        assert_eq!(g.tile_at(Point::new(40.0, 30.0)), Some(0));
    }

    #[test]
    fn test_interlocked_covers_viewport() {
        for (w, h, s) in [(240.0, 139.0, 80.0), (317.0, 233.0, 45.0), (50.0, 20.0, 60.0)] {
            let g = grid(w, h, s, Layout::Interlocked);
            for p in samples(w, h, 60) {
                assert!(g.tile_at(p).is_some(), "{p:?} not covered ({w}x{h}, size {s})");
            }
        }
    }

    #[test]
    fn test_tile_at_matches_linear_scan() {
        let g = grid(300.0, 200.0, 50.0, Layout::Interlocked);
        for p in samples(300.0, 200.0, 23) {
            let idx = g.tile_at(p).unwrap();
            assert!(g.tiles()[idx].contains(p));
        }
    }

    #[test]
    fn test_draw_commands_use_display_colors() {
        let g = grid(160.0, 70.0, 80.0, Layout::Spaced);
        let mut display = g.base_colors();
        display[0] = Rgba::new(1, 2, 3, 1.0);
        display.truncate(2);

        let polygons: Vec<Polygon> = g.draw_commands(&display).collect();
        assert_eq!(polygons.len(), g.len());
        assert_eq!(polygons[0].fill, Rgba::new(1, 2, 3, 1.0));
        assert_eq!(polygons[0].vertices, g.tiles()[0].vertices);
        assert_eq!(polygons[2].fill, g.tiles()[2].color);
    }

    #[test]
    fn test_size_policy_breakpoint() {
        let policy = TriangleSizePolicy::default();
        assert_eq!(policy.size_for(Viewport::new(1024.0, 768.0)), 80.0);
        assert_eq!(policy.size_for(Viewport::new(400.0, 800.0)), 60.0);
    }
}
