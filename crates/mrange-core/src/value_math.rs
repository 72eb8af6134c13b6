#![forbid(unsafe_code)]

//! Pure numeric conversions between slider values and track positions.
//!
//! All functions are stateless and total over finite inputs. Two of them
//! carry caller obligations:
//!
//! - [`value_to_percent`] and [`percent_to_value`] are linear maps over
//!   `[min, max]`. When `min == max` the result of `value_to_percent` is
//!   `NaN`; callers guard the degenerate range before calling.
//! - [`percent_to_value`] does not clamp. A percent outside `[0, 100]`
//!   produces a value outside the bounds.
//!
//! [`constrain`] is the composition the slider engine actually uses:
//! clamp, snap, round, and re-check the bounds.

/// Largest supported number of decimal digits.
///
/// Beyond this, `value * 10^precision` leaves the range where `f64` holds
/// integers exactly and rounding stops being meaningful.
pub const MAX_PRECISION: u32 = 12;

/// Map a value onto the track as a percentage of `[min, max]`.
#[inline]
#[must_use]
pub fn value_to_percent(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)) * 100.0
}

/// Inverse of [`value_to_percent`].
#[inline]
#[must_use]
pub fn percent_to_value(percent: f64, min: f64, max: f64) -> f64 {
    min + (percent / 100.0) * (max - min)
}

/// Snap `value` to the step grid anchored at `min`, then round to
/// `precision` decimal digits.
///
/// With `step == 0` (or a non-positive step) snapping is skipped and only
/// the precision rounding applies. Rounding is half away from zero.
#[must_use]
pub fn round_value(value: f64, min: f64, step: f64, precision: u32) -> f64 {
    let snapped = if step > 0.0 {
        min + ((value - min) / step).round() * step
    } else {
        value
    };
    round_to_precision(snapped, precision)
}

/// Round to `precision` decimal digits, half away from zero.
#[inline]
#[must_use]
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}

/// Clamp a raw candidate into `[min, max]` and align it to the step grid.
///
/// `NaN` resolves to `min`. If snapping to the nearest step overshoots
/// `max` (the range is not a whole number of steps), the value falls back
/// one step. The result always lies in `[min, max]`.
#[must_use]
pub fn constrain(value: f64, min: f64, max: f64, step: f64, precision: u32) -> f64 {
    if value.is_nan() {
        return clamp(round_to_precision(min, precision), min, max);
    }
    let clamped = clamp(value, min, max);
    let mut rounded = round_value(clamped, min, step, precision);
    if rounded > max && step > 0.0 {
        rounded = round_to_precision(rounded - step, precision);
    }
    clamp(rounded, min, max)
}

/// Clamp without the panics of `f64::clamp` on reversed or `NaN` bounds.
///
/// Reversed bounds resolve to `max`; a `NaN` bound is ignored.
#[inline]
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Format a value with exactly `precision` fractional digits.
#[must_use]
pub fn format_value(value: f64, precision: u32) -> String {
    format!("{:.*}", precision.min(MAX_PRECISION) as usize, value)
}
