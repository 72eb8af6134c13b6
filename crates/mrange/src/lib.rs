#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! mrange public facade crate.
//!
//! Re-exports the slider engine and its input types, and adds the binding
//! layer that turns markup-style string attributes into a configured
//! [`MultiRangeSlider`].
//!
//! ```
//! use mrange::prelude::*;
//!
//! let slider = mrange::from_attributes(
//!     [("min", "0"), ("max", "1000"), ("step", "50"), ("values", "200,800")],
//!     ParseMode::Lenient,
//! )?;
//! assert_eq!(slider.get_current_values(), vec![200.0, 800.0]);
//! # Ok::<(), mrange::Error>(())
//! ```

pub mod attributes;
mod error;

// --- Core re-exports -------------------------------------------------------

pub use mrange_core::config::{ConfigError, ConfigPatch, SliderConfig};
pub use mrange_core::event::{
    InputEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerKind,
};
pub use mrange_core::geometry::TrackBounds;

// --- Widget re-exports -----------------------------------------------------

pub use mrange_widgets::capture::{CaptureDisposer, GlobalCapture, NoopCapture};
pub use mrange_widgets::form_fields::FormField;
pub use mrange_widgets::interaction::{DragState, IgnoredReason, InteractionOutcome};
pub use mrange_widgets::lifecycle::{ComponentLifecycle, LifecyclePhase};
pub use mrange_widgets::notifier::{
    EmitterStats, ListenerId, Notification, NotificationKind, ThrottleConfig,
};
pub use mrange_widgets::slider::{EventOutcome, MultiRangeSlider, ThumbView};
pub use mrange_widgets::slider_state::Highlight;

// --- Binding ---------------------------------------------------------------

pub use attributes::{Attribute, AttributeError, ParseMode};
pub use error::{Error, Recovery, Result};

/// Create a slider from markup-style attributes.
pub fn from_attributes<'a, I>(attrs: I, mode: ParseMode) -> Result<MultiRangeSlider>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let config = attributes::parse_attributes(attrs, mode)?;
    Ok(MultiRangeSlider::on_create(config))
}

/// Apply one attribute change (or removal, with `value = None`) to a live
/// slider. No change notification is emitted.
pub fn apply_attribute(
    slider: &mut MultiRangeSlider,
    name: &str,
    value: Option<&str>,
    mode: ParseMode,
) -> Result<()> {
    let patch = attributes::attribute_patch(name, value, mode)?;
    tracing::debug!(
        message = "slider.attribute",
        attribute = name,
        removed = value.is_none(),
        ignored = patch.is_empty()
    );
    slider.on_config_change(&patch);
    Ok(())
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    //! Common imports for hosts embedding a slider.

    pub use crate::{
        ComponentLifecycle, GlobalCapture, InputEvent, KeyCode, KeyEvent, MultiRangeSlider,
        Notification, NotificationKind, ParseMode, PointerEvent, SliderConfig, TrackBounds,
    };
    pub use web_time::Instant;
}

pub use mrange_core as core;
pub use mrange_widgets as widgets;
