#![forbid(unsafe_code)]

//! Thumb value state for the multi-thumb slider.
//!
//! [`SliderState`] owns the thumb set: one value per thumb, addressed by
//! creation order (not by sorted position).
//!
//! # Invariants
//!
//! 1. Every value lies in `[min, max]`.
//! 2. With `step > 0`, every value sits on the step grid anchored at `min`
//!    and is rounded to `precision` digits.
//! 3. While disabled, no mutating operation changes the values.
//! 4. The highlighted span runs from the smallest to the largest value,
//!    independent of which thumbs hold them.
//!
//! # Failure Modes
//!
//! Nothing here fails. Mutations while disabled and out-of-bounds indices
//! are no-ops reported as `false` / `None`; callers that need confirmation
//! read [`values`](SliderState::values) afterwards.
//!
//! Removing a thumb shifts every later index down by one. Callers holding
//! indices across a removal must re-resolve them.

use mrange_core::config::{ConfigPatch, SliderConfig};
use mrange_core::value_math;

/// Filled segment between the outermost thumbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    /// Smallest current value.
    pub start: f64,
    /// Largest current value.
    pub end: f64,
    /// Left edge as a percent of the track.
    pub left_percent: f64,
    /// Width as a percent of the track.
    pub width_percent: f64,
}

/// What a configuration change did to the thumb set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reconfigured {
    /// The thumb set was rebuilt from new initial values.
    pub replaced: bool,
    /// Every value was re-snapped to new bounds, step, or precision.
    pub resnapped: bool,
    /// The disabled flag flipped.
    pub disabled_changed: bool,
}

impl Reconfigured {
    /// True when the value snapshot may have changed.
    #[must_use]
    pub fn values_touched(&self) -> bool {
        self.replaced || self.resnapped
    }
}

/// Ordered thumb values plus the configuration that constrains them.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    config: SliderConfig,
    values: Vec<f64>,
    baseline: Vec<f64>,
}

impl SliderState {
    /// Build the thumb set from a configuration.
    ///
    /// Explicit initial values are clamped and rounded; without them the
    /// slider starts with two thumbs at 25% and 75% of the range.
    #[must_use]
    pub fn new(config: SliderConfig) -> Self {
        let config = config.normalized();
        let baseline = config.values.clone().unwrap_or_default();
        let values = Self::initial_values(&config);
        Self {
            config,
            values,
            baseline,
        }
    }

    fn initial_values(config: &SliderConfig) -> Vec<f64> {
        match config.explicit_values() {
            Some(values) => values.iter().map(|&v| config.constrain(v)).collect(),
            None => config
                .default_values()
                .iter()
                .map(|&v| config.constrain(v))
                .collect(),
        }
    }

    /// Active configuration (always normalized).
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Whether mutations are currently rejected.
    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Set the disabled flag. Returns `true` if it changed.
    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        let changed = self.config.disabled != disabled;
        self.config.disabled = disabled;
        changed
    }

    /// Current values in thumb-index (creation) order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Owned snapshot of the current values.
    #[must_use]
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Value of one thumb.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Number of thumbs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no thumbs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Baseline restored by [`reset`](Self::reset).
    #[must_use]
    pub fn baseline(&self) -> &[f64] {
        &self.baseline
    }

    /// Replace every value. Each is clamped and rounded independently.
    pub fn set_values(&mut self, values: &[f64]) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.values = values.iter().map(|&v| self.config.constrain(v)).collect();
        true
    }

    /// Append a thumb, defaulting to the range midpoint.
    ///
    /// Returns the new thumb's index (`len - 1` after the append).
    pub fn add_thumb(&mut self, value: Option<f64>) -> Option<usize> {
        if self.is_disabled() {
            return None;
        }
        let value = self.config.constrain(value.unwrap_or_else(|| self.config.midpoint()));
        self.values.push(value);
        Some(self.values.len() - 1)
    }

    /// Remove a thumb; later indices shift down by one.
    ///
    /// No minimum thumb count is enforced here. Hosts that need one check
    /// [`len`](Self::len) before calling.
    pub fn remove_thumb(&mut self, index: usize) -> bool {
        if self.is_disabled() || index >= self.values.len() {
            return false;
        }
        self.values.remove(index);
        true
    }

    /// Set one thumb to a clamped, rounded value.
    pub fn set_thumb_value(&mut self, index: usize, raw: f64) -> bool {
        if self.is_disabled() {
            return false;
        }
        let value = self.config.constrain(raw);
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Move a thumb to a fractional track position (`0` = min, `1` = max).
    ///
    /// The fraction is clamped to `[0, 1]` before conversion.
    pub fn move_thumb_by_pointer(&mut self, index: usize, fraction: f64) -> bool {
        if self.is_disabled() || index >= self.values.len() {
            return false;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let raw = if self.config.is_degenerate() {
            self.config.min
        } else {
            value_math::percent_to_value(fraction * 100.0, self.config.min, self.config.max)
        };
        self.values[index] = self.config.constrain(raw);
        true
    }

    /// Restore the baseline given at configuration time.
    ///
    /// Without a baseline the slider ends up with no thumbs; the 25%/75%
    /// default pair only applies at creation.
    pub fn reset(&mut self) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.values = self
            .baseline
            .iter()
            .map(|&v| self.config.constrain(v))
            .collect();
        true
    }

    /// Apply a configuration change.
    ///
    /// New initial values rebuild the thumb set (and the baseline); new
    /// bounds, step, or precision re-snap every existing value. This runs
    /// regardless of the disabled flag.
    pub fn reconfigure(&mut self, patch: &ConfigPatch) -> Reconfigured {
        let next = self.config.patched(patch);
        let mut outcome = Reconfigured {
            disabled_changed: next.disabled != self.config.disabled,
            ..Reconfigured::default()
        };
        self.config = next;

        if patch.values.is_some() {
            self.baseline = self.config.values.clone().unwrap_or_default();
            self.values = Self::initial_values(&self.config);
            outcome.replaced = true;
        } else if patch.changes_geometry() {
            for value in &mut self.values {
                *value = self.config.constrain(*value);
            }
            outcome.resnapped = true;
        }
        outcome
    }

    /// Filled segment from the smallest to the largest value.
    ///
    /// `None` with fewer than two thumbs.
    #[must_use]
    pub fn highlight(&self) -> Option<Highlight> {
        if self.values.len() < 2 {
            return None;
        }
        let (start, end) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let left_percent = self.config.percent_of(start);
        let right_percent = self.config.percent_of(end);
        Some(Highlight {
            start,
            end,
            left_percent,
            width_percent: right_percent - left_percent,
        })
    }
}
