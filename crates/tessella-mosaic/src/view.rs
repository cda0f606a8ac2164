//! Mosaic view: owns the grid, its sweep and the resize debouncer.

use rand::Rng;
use tessella_core::{Layout, Rgba, Viewport};

use crate::animator::{SweepLoop, SweepTarget, TickOutcome};
use crate::clock::Clock;
use crate::debounce::Debouncer;
use crate::grid::{Grid, TriangleSizePolicy, build_grid_with_layout};
use crate::palette::Palette;

/// Default quiet window before a resize triggers a rebuild.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 500;

/// Presentation settings for a mosaic view.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicSettings {
    pub size_policy: TriangleSizePolicy,
    pub layout: Layout,
    pub palette: Palette,
    pub resize_debounce_ms: u64,
}

impl Default for MosaicSettings {
    fn default() -> Self {
        Self {
            size_policy: TriangleSizePolicy::default(),
            layout: Layout::default(),
            palette: Palette::default(),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
        }
    }
}

/// A live mosaic: at most one grid and one sweep loop at any time.
#[derive(Debug)]
pub struct MosaicView<C, R> {
    settings: MosaicSettings,
    clock: C,
    rng: R,
    viewport: Viewport,
    grid: Grid,
    /// Displayed color of each tile, indexed like the grid's tiles.
    display: Vec<Rgba>,
    target: SweepTarget,
    sweep: Option<SweepLoop<C>>,
    resize: Debouncer<Viewport>,
    paused: bool,
}

impl<C: Clock + Clone, R: Rng> MosaicView<C, R> {
    /// Create an empty view. Call [`MosaicView::regenerate`] to build the first grid.
    pub fn new(settings: MosaicSettings, clock: C, rng: R) -> Self {
        let resize = Debouncer::new(settings.resize_debounce_ms);
        Self {
            settings,
            clock,
            rng,
            viewport: Viewport::default(),
            grid: Grid::default(),
            display: Vec::new(),
            target: SweepTarget::new(),
            sweep: None,
            resize,
            paused: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn display(&self) -> &[Rgba] {
        &self.display
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &MosaicSettings {
        &self.settings
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True while a sweep loop is running on the current grid.
    pub fn is_sweeping(&self) -> bool {
        self.sweep.as_ref().is_some_and(|s| s.is_active())
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize.is_pending()
    }

    /// Tear down the current grid and sweep, then build both afresh.
    pub fn regenerate(&mut self, viewport: Viewport) {
        self.resize.cancel();
        self.stop_sweep();

        let size = self.settings.size_policy.size_for(viewport);
        self.viewport = viewport;
        self.grid = build_grid_with_layout(
            viewport,
            size,
            self.settings.layout,
            &self.settings.palette,
            &mut self.rng,
        );
        self.display = self.grid.base_colors();

        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            tiles = self.grid.len(),
            "mosaic regenerated"
        );

        if !self.paused {
            self.start_sweep();
        }
    }

    /// Record a viewport change; the rebuild happens once resizes settle.
    pub fn request_resize(&mut self, viewport: Viewport) {
        self.resize.push(viewport, self.clock.now_ms());
    }

    /// Switch layouts and rebuild immediately.
    pub fn set_layout(&mut self, layout: Layout) {
        self.settings.layout = layout;
        self.regenerate(self.viewport);
    }

    /// Stop the sweep and show the tiles' base colors.
    pub fn pause(&mut self) {
        self.paused = true;
        self.stop_sweep();
        self.display = self.grid.base_colors();
    }

    /// Start a fresh sweep from the first diagonal.
    pub fn resume(&mut self) {
        self.paused = false;
        self.start_sweep();
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Run one frame: apply a settled resize, then step the sweep.
    pub fn frame(&mut self) -> TickOutcome {
        if let Some(viewport) = self.resize.poll(self.clock.now_ms()) {
            tracing::debug!(width = viewport.width, height = viewport.height, "resize settled");
            self.regenerate(viewport);
        }

        let Some(sweep) = self.sweep.as_mut() else {
            return TickOutcome::Stopped;
        };
        let outcome = sweep.tick(&mut self.display);
        if outcome == TickOutcome::Stopped {
            self.sweep = None;
        }
        outcome
    }

    fn start_sweep(&mut self) {
        let sweep = self.target.start_sweep(
            self.grid.shared_tiles(),
            self.grid.max_diagonal(),
            self.clock.clone(),
        );
        self.sweep = sweep.is_active().then_some(sweep);
    }

    fn stop_sweep(&mut self) {
        if let Some(sweep) = self.sweep.take() {
            sweep.handle().stop();
            tracing::debug!("sweep stopped");
        }
        self.target.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use rand::{SeedableRng, rngs::StdRng};
    use tessella_core::SWEEP_INTERVAL_MS;

    fn view(clock: &ManualClock) -> MosaicView<ManualClock, StdRng> {
        MosaicView::new(
            MosaicSettings::default(),
            clock.clone(),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn test_new_view_is_empty() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        assert!(v.grid().is_empty());
        assert!(!v.is_sweeping());
        assert_eq!(v.frame(), TickOutcome::Stopped);
    }

    #[test]
    fn test_regenerate_builds_grid_and_sweep() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.regenerate(Viewport::new(800.0, 480.0));

        assert_eq!(v.grid().triangle_size(), 80.0);
        assert_eq!(v.display().len(), v.grid().len());
        assert!(v.is_sweeping());
        assert_eq!(v.frame(), TickOutcome::Painted);
        assert_eq!(v.frame(), TickOutcome::Waiting);
    }

    #[test]
    fn test_narrow_viewport_uses_small_triangles() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.regenerate(Viewport::new(400.0, 480.0));
        assert_eq!(v.grid().triangle_size(), 60.0);
    }

    #[test]
    fn test_empty_viewport_is_noop() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.regenerate(Viewport::new(0.0, 0.0));
        assert!(v.grid().is_empty());
        assert!(!v.is_sweeping());
        assert_eq!(v.frame(), TickOutcome::Stopped);
    }

    #[test]
    fn test_resize_burst_rebuilds_once_after_quiet_window() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.regenerate(Viewport::new(800.0, 480.0));
        let original = v.grid().clone();

        v.request_resize(Viewport::new(900.0, 480.0));
        clock.advance(200);
        v.request_resize(Viewport::new(1000.0, 480.0));
        clock.advance(400);
        v.frame();
        assert_eq!(v.grid(), &original);
        assert!(v.has_pending_resize());

        clock.advance(100);
        v.frame();
        assert!(!v.has_pending_resize());
        assert_eq!(v.viewport(), Viewport::new(1000.0, 480.0));
        assert_ne!(v.grid(), &original);
        assert!(v.is_sweeping());
    }

    #[test]
    fn test_settled_resize_stops_previous_loop() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.regenerate(Viewport::new(800.0, 480.0));
        let old_handle = v.sweep.as_ref().map(SweepLoop::handle).unwrap();
        let mut stray = v.target.start_sweep(
            v.grid().shared_tiles(),
            v.grid().max_diagonal(),
            clock.clone(),
        );
        assert!(stray.is_active());

        v.request_resize(Viewport::new(1000.0, 600.0));
        clock.advance(DEFAULT_RESIZE_DEBOUNCE_MS);
        v.frame();

        assert_eq!(v.viewport(), Viewport::new(1000.0, 600.0));
        assert!(old_handle.is_stopped());
        assert!(!stray.is_active());
        let mut display = v.grid().base_colors();
        assert_eq!(stray.tick(&mut display), TickOutcome::Stopped);
        assert!(v.is_sweeping());
    }

    #[test]
    fn test_regenerate_cancels_pending_resize() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.request_resize(Viewport::new(300.0, 300.0));
        v.regenerate(Viewport::new(800.0, 480.0));
        clock.advance(1_000);
        v.frame();
        assert_eq!(v.viewport(), Viewport::new(800.0, 480.0));
    }

    #[test]
    fn test_pause_restores_base_colors() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.regenerate(Viewport::new(800.0, 480.0));
        for _ in 0..5 {
            v.frame();
            clock.advance(SWEEP_INTERVAL_MS);
        }
        assert_ne!(v.display(), v.grid().base_colors().as_slice());

        v.pause();
        assert!(v.is_paused());
        assert!(!v.is_sweeping());
        assert_eq!(v.display(), v.grid().base_colors().as_slice());
        assert_eq!(v.frame(), TickOutcome::Stopped);

        v.resume();
        assert!(v.is_sweeping());
        assert_eq!(v.frame(), TickOutcome::Painted);
    }

    #[test]
    fn test_paused_view_stays_paused_across_rebuild() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.pause();
        v.regenerate(Viewport::new(800.0, 480.0));
        assert!(!v.is_sweeping());
        v.toggle_pause();
        assert!(v.is_sweeping());
    }

    #[test]
    fn test_set_layout_rebuilds() {
        let clock = ManualClock::new(0);
        let mut v = view(&clock);
        v.regenerate(Viewport::new(800.0, 480.0));
        let spaced_cols = v.grid().cols();
        v.set_layout(Layout::Interlocked);
        assert_eq!(v.grid().layout(), Layout::Interlocked);
        assert!(v.grid().cols() > spaced_cols);
    }
}
