#![forbid(unsafe_code)]

//! Component lifecycle interface.
//!
//! Any UI framework (or a plain owner object) hosts a slider by driving
//! these hooks in order:
//!
//! ```text
//! on_create ──▶ on_attach ──▶ (on_config_change)* ──▶ on_detach
//!                   ▲                                    │
//!                   └──────────── re-attach ─────────────┘
//! ```
//!
//! `on_detach` must release every resource held across events (global
//! capture, pending timers, pending frames) and must be safe to call
//! repeatedly.

use mrange_core::config::{ConfigPatch, SliderConfig};

/// Where a component is in its host lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// Constructed but not yet attached to a host surface.
    #[default]
    Created,
    /// Attached and receiving input.
    Attached,
    /// Detached; resources released.
    Detached,
}

impl LifecyclePhase {
    /// Whether the component currently receives input.
    #[must_use]
    pub const fn is_attached(self) -> bool {
        matches!(self, Self::Attached)
    }
}

/// Hooks a host calls on a hosted component.
pub trait ComponentLifecycle: Sized {
    /// Build the component from its typed configuration.
    fn on_create(config: SliderConfig) -> Self;

    /// The component became visible and interactive.
    fn on_attach(&mut self);

    /// The component is leaving its host. Idempotent.
    fn on_detach(&mut self);

    /// Part of the configuration changed.
    fn on_config_change(&mut self, patch: &ConfigPatch);

    /// Current phase.
    fn phase(&self) -> LifecyclePhase;
}
