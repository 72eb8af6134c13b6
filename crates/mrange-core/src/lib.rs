#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: value math, typed configuration, and canonical input events.
//!
//! # Role in mrange
//! `mrange-core` is the pure layer. It owns the numeric conversions between
//! values and track positions, the validated slider configuration, and the
//! normalized pointer/keyboard event types that the widget engine consumes.
//!
//! # Primary responsibilities
//! - **value_math**: value/percent mapping, step snapping, precision rounding.
//! - **SliderConfig**: bounds, step, precision, initial values, field name.
//! - **Event types**: pointer and key events independent of any host toolkit.
//! - **FrameCoalescer**: latest-wins debounce to the next paint callback.
//!
//! # How it fits in the system
//! `mrange-widgets` builds the stateful slider engine on top of these types.
//! Nothing in this crate has side effects or reads a clock; time is always
//! passed in by the caller.

pub mod config;
pub mod event;
pub mod frame_coalescer;
pub mod geometry;
pub mod value_math;
