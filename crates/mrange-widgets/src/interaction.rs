#![forbid(unsafe_code)]

//! Pointer, touch, and keyboard interaction for the multi-thumb slider.
//!
//! [`InteractionController`] turns canonical input events into thumb
//! updates while enforcing:
//! - one active pointer at a time (later presses are ignored until release),
//! - global capture acquired on drag start and released on every exit path
//!   (release, cancel, blur, disable, teardown), and
//! - at most one applied pointer move per paint callback.
//!
//! # State machine
//!
//! ```text
//!            press on thumb i
//!   Idle ─────────────────────────▶ Dragging(i)
//!    ▲                                  │ move: schedule frame
//!    │    release / cancel / blur       │ frame: apply latest move (live)
//!    └──────────────────────────────────┘ (flush pending frame, commit)
//! ```
//!
//! The keyboard path never enters `Dragging`: each handled key press sets
//! the focused thumb directly and commits. Arrows move one increment,
//! PageUp/PageDown and Shift+arrow move [`LARGE_STEP_MULTIPLIER`]
//! increments, and keys chorded with Ctrl, Alt or Super are left to the host.
//!
//! Every dispatch returns an [`InteractionDispatch`] with a structured log
//! entry and, when observers must hear about it, the
//! [`NotificationKind`] to emit. The controller never notifies by itself.

use std::fmt;

use mrange_core::config::SliderConfig;
use mrange_core::event::{KeyCode, KeyEvent, PointerEvent};
use mrange_core::frame_coalescer::{FrameCoalescer, FrameSchedule, FrameStats};
use mrange_core::geometry::TrackBounds;

use crate::capture::{CaptureDisposer, GlobalCapture, NoopCapture};
use crate::notifier::NotificationKind;
use crate::slider_state::SliderState;

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    /// A press, possibly on a thumb.
    PointerDown,
    /// A move from any pointer.
    PointerMove,
    /// A release from any pointer.
    PointerUp,
    /// The host aborted the pointer stream.
    PointerCancel,
    /// The widget or window lost focus.
    Blur,
    /// A paint callback.
    Frame,
    /// A key event on a focused thumb.
    Key,
    /// The slider was disabled mid-drag.
    Disable,
}

/// Deterministic reason why an incoming signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The press did not land on a thumb element.
    NotOnThumb,
    /// The slider is disabled.
    Disabled,
    /// The thumb index does not exist.
    InvalidThumb,
    /// Mouse and pen drags need the primary button.
    ButtonNotAllowed,
    /// Another pointer already owns the drag.
    ActivePointerAlreadyInProgress,
    /// No drag is in progress.
    NoActivePointer,
    /// The signal came from a pointer other than the dragging one.
    PointerMismatch,
    /// No coalesced move was waiting for this paint callback.
    NoPendingFrame,
    /// Key releases never move thumbs.
    KeyRelease,
    /// The key has no slider binding, or carries a shortcut modifier.
    UnhandledKey,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Capture acquired; the thumb follows the pointer.
    DragStarted,
    /// The move was parked for the next paint callback.
    MoveScheduled(FrameSchedule),
    /// The parked move was applied as a live update.
    MoveApplied,
    /// Release, cancel or blur ended the drag.
    DragEnded,
    /// Disabling ended the drag; the parked move was dropped.
    DragAborted,
    /// A key set the thumb value.
    ValueCommitted,
    /// Nothing changed.
    Ignored(IgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionLogEntry {
    /// Which entry point produced the record.
    pub phase: InteractionPhase,
    /// Set for accepted dispatches only.
    pub sequence: Option<u64>,
    /// Pointer that sent the signal, if it was a pointer signal.
    pub pointer_id: Option<u32>,
    /// Thumb the signal targeted, if known.
    pub thumb: Option<usize>,
    /// What the controller did.
    pub outcome: InteractionOutcome,
}

/// Result of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionDispatch {
    /// Notification the owner must emit, if any.
    pub notify: Option<NotificationKind>,
    /// Structured record of the dispatch.
    pub log: InteractionLogEntry,
}

impl InteractionDispatch {
    fn ignored(
        phase: InteractionPhase,
        reason: IgnoredReason,
        pointer_id: Option<u32>,
        thumb: Option<usize>,
    ) -> Self {
        tracing::trace!(
            message = "slider.input_ignored",
            phase = ?phase,
            reason = ?reason,
            pointer_id,
            thumb
        );
        Self {
            notify: None,
            log: InteractionLogEntry {
                phase,
                sequence: None,
                pointer_id,
                thumb,
                outcome: InteractionOutcome::Ignored(reason),
            },
        }
    }

    /// True when the signal was ignored.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, InteractionOutcome::Ignored(_))
    }
}

/// Observable drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { thumb: usize, pointer_id: u32 },
}

#[derive(Debug)]
struct ActiveDrag {
    thumb: usize,
    pointer_id: u32,
    disposer: CaptureDisposer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingMove {
    thumb: usize,
    client_x: f64,
}

/// Increments moved by PageUp/PageDown and Shift+arrow.
pub const LARGE_STEP_MULTIPLIER: f64 = 10.0;

/// Candidate value for a keyboard action on a thumb holding `current`.
///
/// Arrows move by one step (1% of the range when the step is `0`),
/// Home/End jump to the bounds. Keys without a binding, and keys chorded
/// with a shortcut modifier, return `None`.
#[must_use]
pub fn key_target(config: &SliderConfig, current: f64, key: &KeyEvent) -> Option<f64> {
    if key.has_shortcut_modifier() {
        return None;
    }
    let step = if config.step > 0.0 {
        config.step
    } else {
        config.span() / 100.0
    };
    let large = step * LARGE_STEP_MULTIPLIER;
    let arrow = if key.is_shifted() { large } else { step };
    let decrease = |by: f64| Some(config.min.max(current - by));
    let increase = |by: f64| Some(config.max.min(current + by));
    match key.code {
        KeyCode::Left | KeyCode::Down => decrease(arrow),
        KeyCode::Right | KeyCode::Up => increase(arrow),
        KeyCode::PageDown => decrease(large),
        KeyCode::PageUp => increase(large),
        KeyCode::Home => Some(config.min),
        KeyCode::End => Some(config.max),
        _ => None,
    }
}

/// Single-pointer drag and keyboard controller.
pub struct InteractionController {
    active: Option<ActiveDrag>,
    frames: FrameCoalescer<PendingMove>,
    track: TrackBounds,
    capture: Box<dyn GlobalCapture>,
    next_sequence: u64,
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("active", &self.active)
            .field("frames", &self.frames)
            .field("track", &self.track)
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(NoopCapture)
    }
}

impl InteractionController {
    /// Create a controller that acquires global capture through `capture`.
    pub fn new(capture: impl GlobalCapture + 'static) -> Self {
        Self {
            active: None,
            frames: FrameCoalescer::new(),
            track: TrackBounds::default(),
            capture: Box::new(capture),
            next_sequence: 1,
        }
    }

    /// Replace the capture hook. An active drag keeps its disposer.
    pub fn set_capture(&mut self, capture: impl GlobalCapture + 'static) {
        self.capture = Box::new(capture);
    }

    /// Report the track's current client-space extent.
    pub fn set_track_bounds(&mut self, track: TrackBounds) {
        self.track = track;
    }

    /// Last reported track extent.
    #[must_use]
    pub fn track_bounds(&self) -> TrackBounds {
        self.track
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        match &self.active {
            Some(active) => DragState::Dragging {
                thumb: active.thumb,
                pointer_id: active.pointer_id,
            },
            None => DragState::Idle,
        }
    }

    /// Thumb being dragged, if any.
    #[must_use]
    pub fn active_thumb(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.thumb)
    }

    /// Pointer owning the drag, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.as_ref().map(|active| active.pointer_id)
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a coalesced move waits for the next paint callback.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.frames.has_pending()
    }

    /// Frame coalescing counters.
    #[must_use]
    pub fn frame_stats(&self) -> FrameStats {
        self.frames.stats()
    }

    /// Handle a press. `thumb` is the thumb element under the pointer.
    pub fn pointer_down(
        &mut self,
        state: &SliderState,
        thumb: Option<usize>,
        pointer: &PointerEvent,
    ) -> InteractionDispatch {
        let phase = InteractionPhase::PointerDown;
        let pointer_id = Some(pointer.pointer_id);
        let Some(index) = thumb else {
            return InteractionDispatch::ignored(phase, IgnoredReason::NotOnThumb, pointer_id, None);
        };
        if !pointer.starts_drag() {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::ButtonNotAllowed,
                pointer_id,
                thumb,
            );
        }
        if self.active.is_some() {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::ActivePointerAlreadyInProgress,
                pointer_id,
                thumb,
            );
        }
        if state.is_disabled() {
            return InteractionDispatch::ignored(phase, IgnoredReason::Disabled, pointer_id, thumb);
        }
        if index >= state.len() {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::InvalidThumb,
                pointer_id,
                thumb,
            );
        }

        let disposer = self.capture.acquire(pointer.pointer_id);
        self.active = Some(ActiveDrag {
            thumb: index,
            pointer_id: pointer.pointer_id,
            disposer,
        });
        tracing::debug!(
            message = "slider.drag_start",
            thumb = index,
            pointer_id = pointer.pointer_id,
            kind = ?pointer.kind
        );
        self.accepted(phase, pointer_id, thumb, InteractionOutcome::DragStarted, None)
    }

    /// Handle a move from the captured pointer. The move is parked until
    /// the next [`on_frame`](Self::on_frame).
    pub fn pointer_move(&mut self, pointer: &PointerEvent) -> InteractionDispatch {
        let phase = InteractionPhase::PointerMove;
        let pointer_id = Some(pointer.pointer_id);
        let Some(active) = &self.active else {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::NoActivePointer,
                pointer_id,
                None,
            );
        };
        let thumb = active.thumb;
        if active.pointer_id != pointer.pointer_id {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::PointerMismatch,
                pointer_id,
                Some(thumb),
            );
        }
        let schedule = self.frames.schedule(PendingMove {
            thumb,
            client_x: pointer.client_x,
        });
        self.accepted(
            phase,
            pointer_id,
            Some(thumb),
            InteractionOutcome::MoveScheduled(schedule),
            None,
        )
    }

    /// Paint callback: apply the freshest parked move as a live update.
    pub fn on_frame(&mut self, state: &mut SliderState) -> InteractionDispatch {
        let phase = InteractionPhase::Frame;
        let pointer_id = self.active_pointer_id();
        let Some(pending) = self.frames.fire() else {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::NoPendingFrame,
                pointer_id,
                None,
            );
        };
        if !self.apply_move(state, pending) {
            let reason = if state.is_disabled() {
                IgnoredReason::Disabled
            } else {
                IgnoredReason::InvalidThumb
            };
            return InteractionDispatch::ignored(phase, reason, pointer_id, Some(pending.thumb));
        }
        self.accepted(
            phase,
            pointer_id,
            Some(pending.thumb),
            InteractionOutcome::MoveApplied,
            Some(NotificationKind::Live),
        )
    }

    /// Handle release of the captured pointer: flush, release, commit.
    pub fn pointer_up(
        &mut self,
        state: &mut SliderState,
        pointer: &PointerEvent,
    ) -> InteractionDispatch {
        let phase = InteractionPhase::PointerUp;
        match self.check_active(phase, Some(pointer.pointer_id)) {
            Ok(()) => self.finish_drag(state, phase),
            Err(ignored) => ignored,
        }
    }

    /// Host-aborted pointer stream (touch cancel, lost capture).
    ///
    /// `None` cancels whatever pointer is active. Ends the drag like a
    /// release so observers still receive a commit.
    pub fn pointer_cancel(
        &mut self,
        state: &mut SliderState,
        pointer_id: Option<u32>,
    ) -> InteractionDispatch {
        let phase = InteractionPhase::PointerCancel;
        match self.check_active(phase, pointer_id) {
            Ok(()) => self.finish_drag(state, phase),
            Err(ignored) => ignored,
        }
    }

    /// Focus loss ends any drag like a release.
    pub fn blur(&mut self, state: &mut SliderState) -> InteractionDispatch {
        let phase = InteractionPhase::Blur;
        match self.check_active(phase, None) {
            Ok(()) => self.finish_drag(state, phase),
            Err(ignored) => ignored,
        }
    }

    /// End a drag because the slider became disabled.
    ///
    /// The parked move is dropped (the state no longer accepts it) and a
    /// commit is still requested so the drag has a terminal notification.
    pub fn abort_drag(&mut self) -> Option<InteractionDispatch> {
        let active = self.active.take()?;
        self.frames.cancel();
        let (thumb, pointer_id) = (active.thumb, active.pointer_id);
        active.disposer.dispose();
        tracing::debug!(message = "slider.drag_abort", thumb, pointer_id);
        Some(self.accepted(
            InteractionPhase::Disable,
            Some(pointer_id),
            Some(thumb),
            InteractionOutcome::DragAborted,
            Some(NotificationKind::Commit),
        ))
    }

    /// Release capture and drop any parked move without notifying.
    ///
    /// Safe to call at any time; returns `true` if a drag was released.
    pub fn teardown(&mut self) -> bool {
        self.frames.cancel();
        match self.active.take() {
            Some(active) => {
                tracing::debug!(
                    message = "slider.drag_teardown",
                    thumb = active.thumb,
                    pointer_id = active.pointer_id
                );
                active.disposer.dispose();
                true
            }
            None => false,
        }
    }

    /// Keep the drag consistent after `index` was removed.
    ///
    /// Removing the dragged thumb ends the drag silently (the removal
    /// already commits); later thumbs shift down by one.
    pub fn thumb_removed(&mut self, index: usize) -> bool {
        let Some(active) = &mut self.active else {
            return false;
        };
        if active.thumb == index {
            return self.teardown();
        }
        if active.thumb > index {
            active.thumb -= 1;
            if let Some(pending) = self.frames.fire() {
                self.frames.schedule(PendingMove {
                    thumb: pending.thumb.saturating_sub(1),
                    ..pending
                });
            }
        }
        false
    }

    /// Keep the drag consistent after the whole thumb set was replaced.
    ///
    /// Ends the drag silently if the dragged index no longer exists.
    pub fn thumbs_replaced(&mut self, len: usize) -> bool {
        let orphaned = self.active.as_ref().is_some_and(|active| active.thumb >= len);
        orphaned && self.teardown()
    }

    /// Handle a key event on the focused thumb.
    pub fn key(
        &mut self,
        state: &mut SliderState,
        thumb: usize,
        key: &KeyEvent,
    ) -> InteractionDispatch {
        let phase = InteractionPhase::Key;
        if !key.is_press() {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::KeyRelease,
                None,
                Some(thumb),
            );
        }
        if state.is_disabled() {
            return InteractionDispatch::ignored(phase, IgnoredReason::Disabled, None, Some(thumb));
        }
        let Some(current) = state.value(thumb) else {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::InvalidThumb,
                None,
                Some(thumb),
            );
        };
        let Some(target) = key_target(state.config(), current, key) else {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::UnhandledKey,
                None,
                Some(thumb),
            );
        };
        state.set_thumb_value(thumb, target);
        tracing::debug!(
            message = "slider.key",
            thumb,
            code = ?key.code,
            value = state.value(thumb)
        );
        self.accepted(
            phase,
            None,
            Some(thumb),
            InteractionOutcome::ValueCommitted,
            Some(NotificationKind::Commit),
        )
    }

    fn check_active(
        &self,
        phase: InteractionPhase,
        pointer_id: Option<u32>,
    ) -> Result<(), InteractionDispatch> {
        let Some(active) = &self.active else {
            return Err(InteractionDispatch::ignored(
                phase,
                IgnoredReason::NoActivePointer,
                pointer_id,
                None,
            ));
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return Err(InteractionDispatch::ignored(
                phase,
                IgnoredReason::PointerMismatch,
                pointer_id,
                Some(active.thumb),
            ));
        }
        Ok(())
    }

    fn finish_drag(
        &mut self,
        state: &mut SliderState,
        phase: InteractionPhase,
    ) -> InteractionDispatch {
        if let Some(pending) = self.frames.fire() {
            self.apply_move(state, pending);
        }
        let Some(active) = self.active.take() else {
            return InteractionDispatch::ignored(phase, IgnoredReason::NoActivePointer, None, None);
        };
        let (thumb, pointer_id) = (active.thumb, active.pointer_id);
        active.disposer.dispose();
        tracing::debug!(
            message = "slider.drag_end",
            phase = ?phase,
            thumb,
            pointer_id,
            value = state.value(thumb)
        );
        self.accepted(
            phase,
            Some(pointer_id),
            Some(thumb),
            InteractionOutcome::DragEnded,
            Some(NotificationKind::Commit),
        )
    }

    fn apply_move(&self, state: &mut SliderState, pending: PendingMove) -> bool {
        let fraction = self.track.fraction_at(pending.client_x);
        state.move_thumb_by_pointer(pending.thumb, fraction)
    }

    fn accepted(
        &mut self,
        phase: InteractionPhase,
        pointer_id: Option<u32>,
        thumb: Option<usize>,
        outcome: InteractionOutcome,
        notify: Option<NotificationKind>,
    ) -> InteractionDispatch {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        InteractionDispatch {
            notify,
            log: InteractionLogEntry {
                phase,
                sequence: Some(sequence),
                pointer_id,
                thumb,
                outcome,
            },
        }
    }
}
