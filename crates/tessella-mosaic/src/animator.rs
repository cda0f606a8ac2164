//! Sweep animation loop (stateful).
//!
//! A [`SweepLoop`] is driven by its host calling [`SweepLoop::tick`] once per
//! frame. It repaints at most every [`SWEEP_INTERVAL_MS`] and otherwise
//! leaves the display buffer alone. Loops are started through a
//! [`SweepTarget`], which keeps exactly one of them live: starting a new
//! loop makes every older loop on the same target decline its next tick.

use std::cell::Cell;
use std::rc::Rc;

use tessella_core::{Rgba, SWEEP_INTERVAL_MS};

use crate::clock::Clock;
use crate::grid::Tile;
use crate::sweep::{self, SweepState};

/// What a call to [`SweepLoop::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The display buffer was repainted and the sweep advanced.
    Painted,
    /// Too early for the next step; nothing changed.
    Waiting,
    /// The loop was stopped or superseded and will not run again.
    Stopped,
}

/// Cancellation handle for a running sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepHandle {
    stopped: Rc<Cell<bool>>,
}

impl SweepHandle {
    /// Stop the sweep. Its next tick returns [`TickOutcome::Stopped`].
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// The surface a sweep paints on. Owns the single-active-loop guarantee.
#[derive(Debug, Clone, Default)]
pub struct SweepTarget {
    generation: Rc<Cell<u64>>,
}

impl SweepTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start sweeping `tiles`, superseding any loop already started here.
    ///
    /// An empty tile sequence yields a loop that is already stopped.
    pub fn start_sweep<C: Clock>(
        &self,
        tiles: Rc<[Tile]>,
        max_diagonal: usize,
        clock: C,
    ) -> SweepLoop<C> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let handle = SweepHandle::default();
        if tiles.is_empty() {
            handle.stop();
        } else {
            tracing::debug!(generation, tiles = tiles.len(), max_diagonal, "sweep started");
        }

        SweepLoop {
            tiles,
            state: SweepState::new(max_diagonal),
            clock,
            last_update_ms: None,
            generation,
            target: Rc::clone(&self.generation),
            handle,
        }
    }

    /// Stop whichever loop is currently live on this target.
    pub fn stop_all(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

/// A running sweep over one tile sequence.
#[derive(Debug)]
pub struct SweepLoop<C> {
    tiles: Rc<[Tile]>,
    state: SweepState,
    clock: C,
    last_update_ms: Option<u64>,
    generation: u64,
    target: Rc<Cell<u64>>,
    handle: SweepHandle,
}

impl<C: Clock> SweepLoop<C> {
    pub fn handle(&self) -> SweepHandle {
        self.handle.clone()
    }

    /// Neither stopped through its handle nor superseded on its target.
    pub fn is_active(&self) -> bool {
        !self.handle.is_stopped() && self.generation == self.target.get()
    }

    pub fn position(&self) -> usize {
        self.state.position()
    }

    /// Move the sweep to an arbitrary position; out-of-range values wrap on
    /// the next paint.
    pub fn seek(&mut self, position: usize) {
        self.state = SweepState::with_position(self.state.max_diagonal(), position);
    }

    /// Run one frame of the loop.
    ///
    /// An inactive loop returns [`TickOutcome::Stopped`] without reading its
    /// clock or touching `display`.
    pub fn tick(&mut self, display: &mut Vec<Rgba>) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Stopped;
        }

        let now = self.clock.now_ms();
        if let Some(last) = self.last_update_ms
            && now.saturating_sub(last) < SWEEP_INTERVAL_MS
        {
            return TickOutcome::Waiting;
        }
        self.last_update_ms = Some(now);

        self.state.normalize();
        sweep::paint(&self.tiles, self.state.position(), display);
        self.state.advance();
        TickOutcome::Painted
    }
}
