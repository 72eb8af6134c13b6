#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Stateful slider engine built on `mrange-core`.
//!
//! # Role in mrange
//! `mrange-widgets` owns everything that changes over time: the thumb set,
//! the active drag, the pending paint-callback move, the live-update
//! deadline and the mirrored form fields. It consumes the pure types from
//! `mrange-core` and is consumed by the `mrange` facade.
//!
//! # Modules
//! - [`slider_state`]: thumb values, constraints, highlight span.
//! - [`interaction`]: pointer drag state machine and keyboard stepping.
//! - [`notifier`]: throttled live updates and synchronous commits.
//! - [`capture`]: global pointer capture as a disposable resource.
//! - [`lifecycle`]: create/attach/detach/config-change hooks.
//! - [`form_fields`]: `name[index]` field mirror.
//! - [`slider`]: [`MultiRangeSlider`], the composed widget.

pub mod capture;
pub mod form_fields;
pub mod interaction;
pub mod lifecycle;
pub mod notifier;
pub mod slider;
pub mod slider_state;

pub use slider::MultiRangeSlider;
