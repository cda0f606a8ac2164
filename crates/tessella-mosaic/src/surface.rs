//! Terminal rendering of the mosaic.
//!
//! Each terminal cell shows two vertical samples using an upper half block:
//! the foreground paints the top half and the background the bottom half.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tessella_core::{Point, Rgb, Rgba};

use crate::grid::Grid;

/// Upper half block; fg is the top sample, bg the bottom one.
pub const HALF_BLOCK: &str = "▀";

/// Maps terminal cells into the mosaic's pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Width of one terminal cell in viewport pixels.
    pub width: f64,
    /// Height of one terminal cell in viewport pixels.
    pub height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 20.0,
        }
    }
}

/// Convert to a terminal truecolor.
pub fn to_terminal_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Color of the mosaic at one pixel: the covering tile over the backdrop.
pub fn sample(grid: &Grid, display: &[Rgba], backdrop: Rgb, p: Point) -> Rgb {
    match grid.tile_at(p) {
        Some(idx) => {
            let fill = display
                .get(idx)
                .copied()
                .unwrap_or(grid.tiles()[idx].color);
            fill.blend_over(backdrop)
        }
        None => backdrop,
    }
}

/// Top and bottom sample colors for the cell at column `x`, row `y`
/// (relative to the mosaic origin).
pub fn cell_colors(
    grid: &Grid,
    display: &[Rgba],
    backdrop: Rgb,
    metrics: CellMetrics,
    x: u16,
    y: u16,
) -> (Rgb, Rgb) {
    let px = (x as f64 + 0.5) * metrics.width;
    let top = (y as f64 + 0.25) * metrics.height;
    let bottom = (y as f64 + 0.75) * metrics.height;
    (
        sample(grid, display, backdrop, Point::new(px, top)),
        sample(grid, display, backdrop, Point::new(px, bottom)),
    )
}

/// Render the mosaic into `area` of the frame.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    grid: &Grid,
    display: &[Rgba],
    backdrop: Rgb,
    metrics: CellMetrics,
) {
    let lines: Vec<Line> = (0..area.height)
        .map(|y| {
            let spans: Vec<Span> = (0..area.width)
                .map(|x| {
                    let (top, bottom) = cell_colors(grid, display, backdrop, metrics, x, y);
                    Span::styled(
                        HALF_BLOCK,
                        Style::new()
                            .fg(to_terminal_color(top))
                            .bg(to_terminal_color(bottom)),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
