#![forbid(unsafe_code)]

//! Live and commit notifications for slider observers.
//!
//! Two notification kinds leave the slider:
//! - **Live** updates fire repeatedly during a drag. They are throttled to
//!   at most one per [`ThrottleConfig::live_window`] and carry the freshest
//!   snapshot at the moment the window elapses.
//! - **Commit** notifications fire once per discrete value-changing action
//!   (drag release, keyboard step, programmatic mutation). They are never
//!   throttled and are delivered synchronously.
//!
//! Every payload is the full value snapshot in thumb-index order.
//!
//! # Timer model
//!
//! The emitter never reads a clock. [`request_live`](NotificationEmitter::request_live)
//! arms a single deadline; arming again while one is pending is a no-op, so
//! the ticking deadline picks up whatever state exists when it fires. The
//! host polls with [`poll`](NotificationEmitter::poll) once
//! [`next_deadline`](NotificationEmitter::next_deadline) has passed.
//!
//! A live emission whose snapshot equals the last emitted one (live or
//! commit) is suppressed.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use web_time::Instant;
//! use mrange_widgets::notifier::{NotificationEmitter, NotificationKind, ThrottleConfig};
//!
//! let mut emitter = NotificationEmitter::new(ThrottleConfig::default());
//! let t0 = Instant::now();
//!
//! assert!(emitter.request_live(t0));
//! assert!(!emitter.request_live(t0 + Duration::from_millis(10)));
//!
//! // Too early: nothing fires.
//! assert!(emitter.poll(t0 + Duration::from_millis(20), &[30.0]).is_none());
//!
//! let live = emitter.poll(t0 + Duration::from_millis(50), &[35.0]).unwrap();
//! assert_eq!(live.kind, NotificationKind::Live);
//! assert_eq!(live.values, vec![35.0]);
//! ```

use std::fmt;
use std::time::Duration;

use web_time::Instant;

/// Default live-update window (about 20 notifications per second).
pub const DEFAULT_LIVE_WINDOW: Duration = Duration::from_millis(50);

/// Throttling parameters for live notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Minimum spacing between live emissions.
    pub live_window: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            live_window: DEFAULT_LIVE_WINDOW,
        }
    }
}

impl ThrottleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the live-update window.
    #[must_use]
    pub fn live_window(mut self, window: Duration) -> Self {
        self.live_window = window;
        self
    }
}

/// Which observable channel a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Intermediate update during interaction.
    Live,
    /// Terminal update for a discrete action.
    Commit,
}

/// One outgoing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Channel.
    pub kind: NotificationKind,
    /// Monotonic per-emitter sequence number, starting at 1.
    pub sequence: u64,
    /// Full value snapshot in thumb-index order.
    pub values: Vec<f64>,
}

/// Handle returned by [`NotificationEmitter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Emitter counters for monitoring and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterStats {
    /// Live notifications delivered.
    pub live_emitted: u64,
    /// Commit notifications delivered.
    pub commits_emitted: u64,
    /// Live notifications skipped because nothing changed.
    pub duplicates_suppressed: u64,
    /// Live deadlines armed.
    pub timers_scheduled: u64,
    /// Live deadlines dropped by a commit or teardown.
    pub timers_cancelled: u64,
}

type Listener = Box<dyn FnMut(&Notification)>;

/// Deduplicating, rate-limiting notification source.
pub struct NotificationEmitter {
    config: ThrottleConfig,
    deadline: Option<Instant>,
    last_emitted: Option<Vec<f64>>,
    next_sequence: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    stats: EmitterStats,
}

impl fmt::Debug for NotificationEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationEmitter")
            .field("config", &self.config)
            .field("deadline", &self.deadline)
            .field("last_emitted", &self.last_emitted)
            .field("next_sequence", &self.next_sequence)
            .field("listeners", &self.listeners.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for NotificationEmitter {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

impl NotificationEmitter {
    /// Create an emitter with the given throttle.
    #[must_use]
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            deadline: None,
            last_emitted: None,
            next_sequence: 1,
            listeners: Vec::new(),
            next_listener: 1,
            stats: EmitterStats::default(),
        }
    }

    /// Throttle configuration.
    #[must_use]
    pub fn config(&self) -> ThrottleConfig {
        self.config
    }

    /// Register an observer. It receives every live and commit notification.
    pub fn subscribe(&mut self, listener: impl FnMut(&Notification) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Arm the live deadline if none is pending.
    ///
    /// Returns `true` when a new deadline was armed.
    pub fn request_live(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        let deadline = now + self.config.live_window;
        self.deadline = Some(deadline);
        self.stats.timers_scheduled += 1;
        tracing::trace!(
            message = "notifier.timer_armed",
            window_ms = self.config.live_window.as_millis() as u64
        );
        true
    }

    /// Pending live deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a live emission is waiting for its window to elapse.
    #[must_use]
    pub fn has_pending_live(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire the live deadline if it has passed.
    ///
    /// `snapshot` is the state at fire time. Returns the emitted
    /// notification, or `None` when the deadline is still in the future,
    /// nothing is pending, or the snapshot duplicates the last emission.
    pub fn poll(&mut self, now: Instant, snapshot: &[f64]) -> Option<Notification> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        if self.last_emitted.as_deref() == Some(snapshot) {
            self.stats.duplicates_suppressed += 1;
            tracing::trace!(
                message = "notifier.duplicate_suppressed",
                thumbs = snapshot.len()
            );
            return None;
        }

        self.stats.live_emitted += 1;
        tracing::trace!(message = "notifier.live", thumbs = snapshot.len());
        Some(self.emit(NotificationKind::Live, snapshot))
    }

    /// Deliver a commit synchronously, dropping any pending live emission.
    ///
    /// Commits are never deduplicated: each accepted action produces one.
    pub fn commit(&mut self, snapshot: &[f64]) -> Notification {
        self.cancel_pending();
        self.stats.commits_emitted += 1;
        tracing::debug!(message = "slider.commit", thumbs = snapshot.len());
        self.emit(NotificationKind::Commit, snapshot)
    }

    /// Drop the pending live deadline. Returns `true` if one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        let had = self.deadline.take().is_some();
        if had {
            self.stats.timers_cancelled += 1;
        }
        had
    }

    /// Record `snapshot` as already known to observers without emitting.
    ///
    /// Live updates that would repeat it are then suppressed.
    pub fn prime(&mut self, snapshot: &[f64]) {
        self.last_emitted = Some(snapshot.to_vec());
    }

    /// Snapshot carried by the most recent notification.
    #[must_use]
    pub fn last_emitted(&self) -> Option<&[f64]> {
        self.last_emitted.as_deref()
    }

    /// Emitter counters.
    #[must_use]
    pub fn stats(&self) -> EmitterStats {
        self.stats
    }

    fn emit(&mut self, kind: NotificationKind, snapshot: &[f64]) -> Notification {
        let notification = Notification {
            kind,
            sequence: self.next_sequence,
            values: snapshot.to_vec(),
        };
        self.next_sequence += 1;
        self.last_emitted = Some(notification.values.clone());
        for (_, listener) in &mut self.listeners {
            listener(&notification);
        }
        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn one_deadline_at_a_time() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        assert!(emitter.request_live(t0));
        assert!(!emitter.request_live(t0 + ms(30)));
        assert_eq!(emitter.next_deadline(), Some(t0 + ms(50)));
        assert_eq!(emitter.stats().timers_scheduled, 1);
    }

    #[test]
    fn poll_before_deadline_keeps_pending() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        emitter.request_live(t0);
        assert!(emitter.poll(t0 + ms(49), &[1.0]).is_none());
        assert!(emitter.has_pending_live());
    }

    #[test]
    fn last_queued_emission_still_fires() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        emitter.request_live(t0);
        let live = emitter.poll(t0 + ms(500), &[42.0]).expect("deadline passed");
        assert_eq!(live.kind, NotificationKind::Live);
        assert_eq!(live.values, vec![42.0]);
        assert!(!emitter.has_pending_live());
    }

    #[test]
    fn duplicate_live_is_suppressed() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        emitter.request_live(t0);
        assert!(emitter.poll(t0 + ms(50), &[10.0, 20.0]).is_some());
        emitter.request_live(t0 + ms(60));
        assert!(emitter.poll(t0 + ms(110), &[10.0, 20.0]).is_none());
        assert_eq!(emitter.stats().duplicates_suppressed, 1);
        assert_eq!(emitter.stats().live_emitted, 1);
    }

    #[test]
    fn commit_cancels_pending_live() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        emitter.request_live(t0);
        let commit = emitter.commit(&[5.0]);
        assert_eq!(commit.kind, NotificationKind::Commit);
        assert!(!emitter.has_pending_live());
        assert!(emitter.poll(t0 + ms(100), &[6.0]).is_none());
        assert_eq!(emitter.stats().timers_cancelled, 1);
    }

    #[test]
    fn live_after_commit_with_same_values_is_suppressed() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        emitter.commit(&[5.0]);
        emitter.request_live(t0);
        assert!(emitter.poll(t0 + ms(50), &[5.0]).is_none());
    }

    #[test]
    fn primed_snapshot_suppresses_live() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        emitter.prime(&[25.0, 75.0]);
        emitter.request_live(t0);
        assert!(emitter.poll(t0 + ms(50), &[25.0, 75.0]).is_none());
        assert_eq!(emitter.stats().live_emitted, 0);
        assert_eq!(emitter.last_emitted(), Some(&[25.0, 75.0][..]));
    }

    #[test]
    fn commits_are_never_deduplicated() {
        let mut emitter = NotificationEmitter::default();
        emitter.commit(&[1.0]);
        emitter.commit(&[1.0]);
        assert_eq!(emitter.stats().commits_emitted, 2);
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut emitter = NotificationEmitter::default();
        let t0 = Instant::now();
        let a = emitter.commit(&[1.0]);
        emitter.request_live(t0);
        let b = emitter.poll(t0 + ms(50), &[2.0]).expect("fires");
        let c = emitter.commit(&[3.0]);
        assert_eq!((a.sequence, b.sequence, c.sequence), (1, 2, 3));
    }

    #[test]
    fn listeners_receive_every_notification() {
        let mut emitter = NotificationEmitter::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = emitter.subscribe(move |n| sink.borrow_mut().push((n.kind, n.values.clone())));
        assert_eq!(emitter.listener_count(), 1);

        let t0 = Instant::now();
        emitter.request_live(t0);
        emitter.poll(t0 + ms(50), &[1.0]);
        emitter.commit(&[2.0]);
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.commit(&[3.0]);

        assert_eq!(
            *seen.borrow(),
            vec![
                (NotificationKind::Live, vec![1.0]),
                (NotificationKind::Commit, vec![2.0]),
            ]
        );
    }

    #[test]
    fn custom_window() {
        let mut emitter = NotificationEmitter::new(ThrottleConfig::new().live_window(ms(10)));
        let t0 = Instant::now();
        emitter.request_live(t0);
        assert!(emitter.poll(t0 + ms(10), &[1.0]).is_some());
    }
}
