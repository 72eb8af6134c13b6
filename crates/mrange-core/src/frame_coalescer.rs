#![forbid(unsafe_code)]

//! Debounce-to-next-frame coalescing for high-frequency pointer moves.
//!
//! Pointers can report moves far faster than the host paints. Applying each
//! one causes redundant layout work, so moves are parked here and only the
//! freshest is applied when the next paint callback fires.
//!
//! # Design
//!
//! [`FrameCoalescer`] holds at most one pending apply ("latest wins"):
//! - Scheduling while nothing is pending asks the host for a paint callback.
//! - Scheduling while an apply is pending replaces it; the already requested
//!   callback will pick up the new value.
//! - [`fire`](FrameCoalescer::fire) hands out the pending value once.
//!   Already-fired applies are never retried.
//!
//! # Usage
//!
//! ```
//! use mrange_core::frame_coalescer::{FrameCoalescer, FrameSchedule};
//!
//! let mut frames = FrameCoalescer::new();
//! assert_eq!(frames.schedule(10.0), FrameSchedule::Requested);
//! assert_eq!(frames.schedule(20.0), FrameSchedule::Replaced);
//!
//! // Paint callback: only the freshest position is applied.
//! assert_eq!(frames.fire(), Some(20.0));
//! assert_eq!(frames.fire(), None);
//! ```

/// Outcome of [`FrameCoalescer::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSchedule {
    /// Nothing was pending; the host should request a paint callback.
    Requested,
    /// An unfired apply was replaced; the outstanding callback suffices.
    Replaced,
}

/// Counters for coalescing effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Values scheduled.
    pub scheduled: u64,
    /// Values discarded because a newer one replaced them.
    pub replaced: u64,
    /// Values applied by a paint callback.
    pub fired: u64,
    /// Values dropped by [`FrameCoalescer::cancel`].
    pub cancelled: u64,
}

/// Single-slot, latest-wins coalescer.
///
/// # Thread Safety
///
/// Not thread-safe; it lives on the host's event loop.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    stats: FrameStats,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            stats: FrameStats::default(),
        }
    }
}

impl<T> FrameCoalescer<T> {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `value` for the next paint callback, replacing any unfired one.
    pub fn schedule(&mut self, value: T) -> FrameSchedule {
        self.stats.scheduled += 1;
        if self.pending.replace(value).is_some() {
            self.stats.replaced += 1;
            FrameSchedule::Replaced
        } else {
            FrameSchedule::Requested
        }
    }

    /// Paint callback: take the pending value, if any.
    pub fn fire(&mut self) -> Option<T> {
        let value = self.pending.take();
        if value.is_some() {
            self.stats.fired += 1;
        }
        value
    }

    /// Drop the pending value without applying it.
    ///
    /// Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        let had = self.pending.take().is_some();
        if had {
            self.stats.cancelled += 1;
        }
        had
    }

    /// Whether an apply is waiting for a paint callback.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Peek at the pending value.
    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Coalescing counters.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_coalescer_has_no_pending() {
        let frames = FrameCoalescer::<f64>::new();
        assert!(!frames.has_pending());
        assert_eq!(frames.stats(), FrameStats::default());
    }

    #[test]
    fn latest_value_wins() {
        let mut frames = FrameCoalescer::new();
        assert_eq!(frames.schedule(1), FrameSchedule::Requested);
        assert_eq!(frames.schedule(2), FrameSchedule::Replaced);
        assert_eq!(frames.schedule(3), FrameSchedule::Replaced);
        assert_eq!(frames.pending(), Some(&3));
        assert_eq!(frames.fire(), Some(3));
        assert!(!frames.has_pending());
    }

    #[test]
    fn fired_values_are_not_retried() {
        let mut frames = FrameCoalescer::new();
        frames.schedule("a");
        assert_eq!(frames.fire(), Some("a"));
        assert_eq!(frames.fire(), None);
        // next schedule needs a fresh callback
        assert_eq!(frames.schedule("b"), FrameSchedule::Requested);
    }

    #[test]
    fn cancel_drops_pending() {
        let mut frames = FrameCoalescer::new();
        assert!(!frames.cancel());
        frames.schedule(5);
        assert!(frames.cancel());
        assert_eq!(frames.fire(), None);
    }

    #[test]
    fn stats_track_every_outcome() {
        let mut frames = FrameCoalescer::new();
        for i in 0..10 {
            frames.schedule(i);
        }
        let _ = frames.fire();
        frames.schedule(99);
        frames.cancel();
        let stats = frames.stats();
        assert_eq!(stats.scheduled, 11);
        assert_eq!(stats.replaced, 9);
        assert_eq!(stats.fired, 1);
        assert_eq!(stats.cancelled, 1);
    }
}
