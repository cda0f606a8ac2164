//! Triangular mosaic background with an animated light sweep.
//!
//! The [`grid`] module tessellates a viewport into jittered triangles, the
//! [`sweep`] and [`animator`] modules run a bright band with a fading tail
//! across the grid's diagonals, and [`MosaicView`] ties both to a viewport
//! that can be resized. [`surface`] draws the result into a ratatui frame.

pub mod animator;
pub mod clock;
pub mod debounce;
pub mod grid;
pub mod palette;
pub mod surface;
pub mod sweep;
mod view;

pub use animator::{SweepHandle, SweepLoop, SweepTarget, TickOutcome};
pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debouncer;
pub use grid::{Grid, Polygon, Tile, TriangleSizePolicy, build_grid, build_grid_with_layout};
pub use palette::Palette;
pub use surface::CellMetrics;
pub use view::{DEFAULT_RESIZE_DEBOUNCE_MS, MosaicSettings, MosaicView};
