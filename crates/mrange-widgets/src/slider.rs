#![forbid(unsafe_code)]

//! The composed multi-thumb range slider.
//!
//! [`MultiRangeSlider`] wires together:
//! - [`SliderState`] (thumb values and constraints),
//! - [`InteractionController`] (pointer drag and keyboard),
//! - [`NotificationEmitter`] (throttled live updates, synchronous commits),
//! - [`FormFieldMirror`] (one named field per thumb).
//!
//! # Host loop
//!
//! ```text
//! input event ─▶ handle_event(event, now)
//! paint callback (needs_frame) ─▶ on_frame(now)
//! timer (next_deadline) ─▶ tick(now)
//! ```
//!
//! The slider never reads a clock or schedules anything itself; hosts ask
//! [`needs_frame`](MultiRangeSlider::needs_frame) and
//! [`next_deadline`](MultiRangeSlider::next_deadline) after each call.
//!
//! # Example
//!
//! ```
//! use mrange_core::config::SliderConfig;
//! use mrange_core::event::{InputEvent, PointerEvent};
//! use mrange_core::geometry::TrackBounds;
//! use mrange_widgets::slider::MultiRangeSlider;
//! use web_time::Instant;
//!
//! let mut slider = MultiRangeSlider::new(SliderConfig::new().step(5.0).values([25.0, 75.0]));
//! slider.set_track_bounds(TrackBounds::new(0.0, 200.0));
//! let now = Instant::now();
//!
//! slider.handle_event(
//!     &InputEvent::PointerDown { thumb: Some(0), pointer: PointerEvent::new(1, 50.0) },
//!     now,
//! );
//! slider.handle_event(&InputEvent::PointerMove(PointerEvent::new(1, 120.0)), now);
//! assert!(slider.needs_frame());
//! slider.on_frame(now);
//! assert_eq!(slider.get_current_values(), vec![60.0, 75.0]);
//! ```

use mrange_core::config::{ConfigPatch, SliderConfig};
use mrange_core::event::InputEvent;
use mrange_core::geometry::TrackBounds;
use mrange_core::value_math::format_value;
use web_time::Instant;

use crate::capture::GlobalCapture;
use crate::form_fields::{FormField, FormFieldMirror};
use crate::interaction::{DragState, InteractionController, InteractionDispatch};
use crate::lifecycle::{ComponentLifecycle, LifecyclePhase};
use crate::notifier::{
    EmitterStats, ListenerId, Notification, NotificationEmitter, NotificationKind, ThrottleConfig,
};
use crate::slider_state::{Highlight, SliderState};

/// Accessibility data for one thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbAccessibility {
    /// 1-based label, e.g. `"Thumb 1"`.
    pub label: String,
    pub value_now: f64,
    pub value_min: f64,
    pub value_max: f64,
    pub disabled: bool,
}

/// Render model for one thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbView {
    pub index: usize,
    pub value: f64,
    /// Position on the track in percent (`0` on a degenerate range).
    pub percent: f64,
    /// Value rendered with the configured precision.
    pub text: String,
    pub dragging: bool,
    /// Whether the thumb takes keyboard focus.
    pub focusable: bool,
    pub accessibility: ThumbAccessibility,
}

/// Result of [`MultiRangeSlider::handle_event`] and
/// [`MultiRangeSlider::on_frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub dispatch: InteractionDispatch,
    /// Commit delivered synchronously by this event, if any.
    pub notification: Option<Notification>,
}

/// Multi-thumb range slider engine.
#[derive(Debug)]
pub struct MultiRangeSlider {
    state: SliderState,
    interaction: InteractionController,
    emitter: NotificationEmitter,
    fields: FormFieldMirror,
    phase: LifecyclePhase,
}

impl MultiRangeSlider {
    /// Create a slider with the default live-update throttle.
    #[must_use]
    pub fn new(config: SliderConfig) -> Self {
        Self::with_throttle(config, ThrottleConfig::default())
    }

    /// Create a slider with a custom live-update throttle.
    #[must_use]
    pub fn with_throttle(config: SliderConfig, throttle: ThrottleConfig) -> Self {
        let state = SliderState::new(config);
        let fields = FormFieldMirror::new(state.config().name.clone(), state.config().precision);
        let mut emitter = NotificationEmitter::new(throttle);
        emitter.prime(state.values());
        Self {
            state,
            interaction: InteractionController::default(),
            emitter,
            fields,
            phase: LifecyclePhase::Created,
        }
    }

    /// Route global pointer capture through `capture`.
    #[must_use]
    pub fn with_capture(mut self, capture: impl GlobalCapture + 'static) -> Self {
        self.interaction.set_capture(capture);
        self
    }

    // ── Public operations ───────────────────────────────────────────────

    /// Snapshot of the values in thumb-index order.
    #[must_use]
    pub fn get_current_values(&self) -> Vec<f64> {
        self.state.snapshot()
    }

    /// Borrowed view of the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.state.values()
    }

    /// Replace every value and commit.
    pub fn set_values(&mut self, values: &[f64]) -> bool {
        if !self.state.set_values(values) {
            return self.rejected("set_values");
        }
        self.interaction.thumbs_replaced(self.state.len());
        self.structural_commit("set_values");
        true
    }

    /// Append a thumb (midpoint by default) and commit.
    pub fn add_thumb(&mut self, value: Option<f64>) -> Option<usize> {
        let Some(index) = self.state.add_thumb(value) else {
            self.rejected("add_thumb");
            return None;
        };
        self.structural_commit("add_thumb");
        Some(index)
    }

    /// Remove a thumb and commit. Later indices shift down by one.
    pub fn remove_thumb(&mut self, index: usize) -> bool {
        if !self.state.remove_thumb(index) {
            return self.rejected("remove_thumb");
        }
        self.interaction.thumb_removed(index);
        self.structural_commit("remove_thumb");
        true
    }

    /// Set one thumb and commit.
    pub fn set_thumb_value(&mut self, index: usize, value: f64) -> bool {
        if !self.state.set_thumb_value(index, value) {
            return self.rejected("set_thumb_value");
        }
        self.structural_commit("set_thumb_value");
        true
    }

    /// Accept mutations and input again.
    pub fn enable(&mut self) {
        if self.state.set_disabled(false) {
            tracing::debug!(message = "slider.enable");
        }
    }

    /// Reject mutations and input. An active drag ends with a commit.
    pub fn disable(&mut self) {
        if self.state.set_disabled(true) {
            tracing::debug!(message = "slider.disable");
        }
        if let Some(dispatch) = self.interaction.abort_drag() {
            self.deliver(&dispatch, None);
        }
    }

    /// Restore the configured baseline (possibly empty) and commit.
    pub fn reset(&mut self) -> bool {
        if !self.state.reset() {
            return self.rejected("reset");
        }
        self.interaction.thumbs_replaced(self.state.len());
        self.structural_commit("reset");
        true
    }

    // ── Host integration ────────────────────────────────────────────────

    /// Report the track's client-space extent.
    pub fn set_track_bounds(&mut self, track: TrackBounds) {
        self.interaction.set_track_bounds(track);
    }

    /// Feed one input event.
    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) -> EventOutcome {
        let dispatch = match event {
            InputEvent::PointerDown { thumb, pointer } => {
                self.interaction.pointer_down(&self.state, *thumb, pointer)
            }
            InputEvent::PointerMove(pointer) => self.interaction.pointer_move(pointer),
            InputEvent::PointerUp(pointer) => self.interaction.pointer_up(&mut self.state, pointer),
            InputEvent::PointerCancel { pointer_id } => {
                self.interaction.pointer_cancel(&mut self.state, *pointer_id)
            }
            InputEvent::Key { thumb, key } => self.interaction.key(&mut self.state, *thumb, key),
            InputEvent::Blur => self.interaction.blur(&mut self.state),
        };
        let notification = self.deliver(&dispatch, Some(now));
        EventOutcome {
            dispatch,
            notification,
        }
    }

    /// Paint callback: apply the latest coalesced move.
    pub fn on_frame(&mut self, now: Instant) -> EventOutcome {
        let dispatch = self.interaction.on_frame(&mut self.state);
        let notification = self.deliver(&dispatch, Some(now));
        EventOutcome {
            dispatch,
            notification,
        }
    }

    /// Timer callback: emit the throttled live update if its window elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Notification> {
        let notification = self.emitter.poll(now, self.state.values())?;
        self.sync_fields(&notification.values);
        Some(notification)
    }

    /// Whether the host should request a paint callback.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.interaction.needs_frame()
    }

    /// When the host should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.emitter.next_deadline()
    }

    // ── Observers ───────────────────────────────────────────────────────

    /// Register a notification listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&Notification) + 'static) -> ListenerId {
        self.emitter.subscribe(listener)
    }

    /// Remove a notification listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.emitter.unsubscribe(id)
    }

    /// Emitter counters.
    #[must_use]
    pub fn stats(&self) -> EmitterStats {
        self.emitter.stats()
    }

    // ── Render model ────────────────────────────────────────────────────

    /// Per-thumb view data in thumb-index order.
    #[must_use]
    pub fn thumbs(&self) -> Vec<ThumbView> {
        let config = self.state.config();
        let active = self.interaction.active_thumb();
        self.state
            .values()
            .iter()
            .enumerate()
            .map(|(index, &value)| ThumbView {
                index,
                value,
                percent: config.percent_of(value),
                text: format_value(value, config.precision),
                dragging: active == Some(index),
                focusable: !config.disabled,
                accessibility: ThumbAccessibility {
                    label: format!("Thumb {}", index + 1),
                    value_now: value,
                    value_min: config.min,
                    value_max: config.max,
                    disabled: config.disabled,
                },
            })
            .collect()
    }

    /// Filled segment between the outermost thumbs.
    #[must_use]
    pub fn highlight(&self) -> Option<Highlight> {
        self.state.highlight()
    }

    /// Mirrored form fields.
    #[must_use]
    pub fn form_fields(&self) -> &[FormField] {
        self.fields.fields()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        self.state.config()
    }

    /// Whether the slider rejects mutations.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state.is_disabled()
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.interaction.drag_state()
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn deliver(
        &mut self,
        dispatch: &InteractionDispatch,
        now: Option<Instant>,
    ) -> Option<Notification> {
        match dispatch.notify? {
            NotificationKind::Live => {
                if let Some(now) = now {
                    self.emitter.request_live(now);
                }
                None
            }
            NotificationKind::Commit => Some(self.commit()),
        }
    }

    fn commit(&mut self) -> Notification {
        let notification = self.emitter.commit(self.state.values());
        self.sync_fields(&notification.values);
        notification
    }

    /// Form fields exist only while attached; `on_attach` rebuilds them.
    fn sync_fields(&mut self, values: &[f64]) {
        if self.phase.is_attached() {
            self.fields.sync(values);
        }
    }

    fn structural_commit(&mut self, op: &'static str) {
        tracing::debug!(message = "slider.mutation", op, thumbs = self.state.len());
        self.commit();
    }

    fn rejected(&self, op: &'static str) -> bool {
        tracing::trace!(
            message = "slider.mutation_rejected",
            op,
            disabled = self.state.is_disabled()
        );
        false
    }
}

impl ComponentLifecycle for MultiRangeSlider {
    fn on_create(config: SliderConfig) -> Self {
        Self::new(config)
    }

    fn on_attach(&mut self) {
        self.phase = LifecyclePhase::Attached;
        let config = self.state.config();
        self.fields
            .reconfigure(&config.name, config.precision, self.state.values());
        tracing::debug!(message = "slider.attach", thumbs = self.state.len());
    }

    fn on_detach(&mut self) {
        let released = self.interaction.teardown();
        self.emitter.cancel_pending();
        self.fields.clear();
        if self.phase != LifecyclePhase::Detached {
            tracing::debug!(message = "slider.detach", released_capture = released);
        }
        self.phase = LifecyclePhase::Detached;
    }

    fn on_config_change(&mut self, patch: &ConfigPatch) {
        if patch.is_empty() {
            return;
        }
        let outcome = self.state.reconfigure(patch);
        tracing::debug!(
            message = "slider.config_change",
            replaced = outcome.replaced,
            resnapped = outcome.resnapped,
            disabled = self.state.is_disabled()
        );
        if outcome.replaced {
            self.interaction.thumbs_replaced(self.state.len());
        }
        if outcome.values_touched() {
            self.emitter.prime(self.state.values());
        }
        if self.state.is_disabled()
            && let Some(dispatch) = self.interaction.abort_drag()
        {
            self.deliver(&dispatch, None);
        }
        if self.phase.is_attached() {
            let config = self.state.config();
            self.fields
                .reconfigure(&config.name, config.precision, self.state.values());
        }
    }

    fn phase(&self) -> LifecyclePhase {
        self.phase
    }
}
