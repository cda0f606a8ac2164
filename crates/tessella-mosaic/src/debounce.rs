//! Collapse bursts of updates into one, fired after the input settles.

/// Holds the most recent value until no new one has arrived for `window_ms`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    /// Record a new value, restarting the quiet window.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((now_ms.saturating_add(self.window_ms), value));
    }

    /// Take the pending value once its quiet window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now_ms >= deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Drop the pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
