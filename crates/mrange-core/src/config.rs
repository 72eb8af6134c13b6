#![forbid(unsafe_code)]

//! Typed slider configuration.
//!
//! A [`SliderConfig`] is immutable for one render cycle. Hosts build it
//! explicitly (string attribute parsing lives in the host binding layer)
//! and hand it to the widget at creation; later changes arrive as a
//! [`ConfigPatch`].
//!
//! Malformed values are never rejected. [`SliderConfig::validate`] lists
//! what is wrong and [`SliderConfig::normalized`] repairs it, so a
//! misconfigured slider stays interactive.
//!
//! # Loading
//!
//! With the `config-file` feature:
//!
//! ```toml
//! min = 0.0
//! max = 1000.0
//! step = 50.0
//! values = [200.0, 800.0]
//! name = "price"
//! ```
//!
//! ```rust,ignore
//! let config = SliderConfig::from_toml_str(text)?.normalized();
//! ```

use std::fmt;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use crate::value_math::{self, MAX_PRECISION};

/// Default lower bound.
pub const DEFAULT_MIN: f64 = 0.0;
/// Default upper bound.
pub const DEFAULT_MAX: f64 = 100.0;
/// Default snap increment (continuous).
pub const DEFAULT_STEP: f64 = 0.0;
/// Default number of decimal digits.
pub const DEFAULT_PRECISION: u32 = 0;
/// Default base name for mirrored form fields.
pub const DEFAULT_NAME: &str = "range-values";

/// Slider bounds, snapping rules, and initial state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct SliderConfig {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
    /// Snap increment measured from `min`; `0` means continuous.
    pub step: f64,
    /// Decimal digits kept after rounding.
    pub precision: u32,
    /// Whether value-mutating operations are rejected.
    pub disabled: bool,
    /// Initial thumb values, also the baseline restored by `reset`.
    ///
    /// `None` (or an empty list) creates the two-thumb default at 25% and
    /// 75% of the range.
    pub values: Option<Vec<f64>>,
    /// Base name for the mirrored form fields (`name[0]`, `name[1]`, ...).
    pub name: String,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            precision: DEFAULT_PRECISION,
            disabled: false,
            values: None,
            name: DEFAULT_NAME.to_owned(),
        }
    }
}

impl SliderConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both bounds.
    #[must_use]
    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the snap increment.
    #[must_use]
    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the number of decimal digits.
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Set the initial (and reset baseline) values.
    #[must_use]
    pub fn values(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.values = Some(values.into());
        self
    }

    /// Set the form-field base name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Width of the value range.
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when `min == max`, where percent conversions are undefined.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.span() > 0.0)
    }

    /// Midpoint of the range, the default value for a new thumb.
    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Clamp, snap, and round a raw candidate with this configuration.
    #[inline]
    #[must_use]
    pub fn constrain(&self, value: f64) -> f64 {
        value_math::constrain(value, self.min, self.max, self.step, self.precision)
    }

    /// Percent position of `value` on the track; `0` for a degenerate range.
    #[must_use]
    pub fn percent_of(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        value_math::value_to_percent(value, self.min, self.max)
    }

    /// Explicit initial values, or `None` when the default pair applies.
    #[must_use]
    pub fn explicit_values(&self) -> Option<&[f64]> {
        self.values.as_deref().filter(|v| !v.is_empty())
    }

    /// The computed default pair: 25% and 75% of the range.
    #[must_use]
    pub fn default_values(&self) -> [f64; 2] {
        let span = self.span();
        [self.min + span * 0.25, self.min + span * 0.75]
    }

    /// List every problem with this configuration.
    ///
    /// An empty list means [`normalized`](Self::normalized) is the identity.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.min.is_finite() {
            errors.push(format!("min must be finite, got {}", self.min));
        }
        if !self.max.is_finite() {
            errors.push(format!("max must be finite, got {}", self.max));
        }
        if self.min.is_finite() && self.max.is_finite() && self.min >= self.max {
            errors.push(format!(
                "min must be < max, got min={} max={}",
                self.min, self.max
            ));
        }
        if !(self.step >= 0.0) || !self.step.is_finite() {
            errors.push(format!("step must be finite and >= 0, got {}", self.step));
        }
        if self.precision > MAX_PRECISION {
            errors.push(format!(
                "precision must be <= {MAX_PRECISION}, got {}",
                self.precision
            ));
        }
        if let Some(values) = &self.values
            && values.iter().any(|v| !v.is_finite())
        {
            errors.push("values must all be finite".into());
        }

        errors
    }

    /// Repair the configuration instead of rejecting it.
    ///
    /// - Non-finite bounds fall back to the defaults.
    /// - Reversed bounds are swapped. Equal bounds are kept; the range is
    ///   then degenerate and every value collapses onto `min`.
    /// - A negative or non-finite step becomes `0` (continuous).
    /// - Precision is capped at [`MAX_PRECISION`].
    /// - Non-finite initial values are dropped.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.min.is_finite() {
            self.min = DEFAULT_MIN;
        }
        if !self.max.is_finite() {
            self.max = DEFAULT_MAX;
        }
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        if !(self.step >= 0.0) || !self.step.is_finite() {
            self.step = 0.0;
        }
        self.precision = self.precision.min(MAX_PRECISION);
        if let Some(values) = &mut self.values {
            values.retain(|v| v.is_finite());
        }
        self
    }

    /// Strict counterpart of [`normalized`](Self::normalized): reject
    /// instead of repair.
    pub fn ensure_valid(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Apply a patch, returning the updated configuration.
    #[must_use]
    pub fn patched(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        if let Some(min) = patch.min {
            next.min = min;
        }
        if let Some(max) = patch.max {
            next.max = max;
        }
        if let Some(step) = patch.step {
            next.step = step;
        }
        if let Some(precision) = patch.precision {
            next.precision = precision;
        }
        if let Some(disabled) = patch.disabled {
            next.disabled = disabled;
        }
        if let Some(values) = &patch.values {
            next.values = Some(values.clone());
        }
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        next.normalized()
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Serialize to a pretty TOML string.
    #[cfg(feature = "config-file")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSer)
    }
}

/// A partial configuration update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    /// New lower bound; re-snaps every thumb.
    pub min: Option<f64>,
    /// New upper bound; re-snaps every thumb.
    pub max: Option<f64>,
    /// New snap increment; re-snaps every thumb.
    pub step: Option<f64>,
    /// New decimal digits; re-rounds every thumb.
    pub precision: Option<u32>,
    /// Enable or disable mutations.
    pub disabled: Option<bool>,
    /// Replace the thumb set and the reset baseline.
    pub values: Option<Vec<f64>>,
    /// New base name for the mirrored form fields.
    pub name: Option<String>,
}

impl ConfigPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the patch changes bounds, step, or precision, which
    /// forces every thumb value to be re-snapped.
    #[must_use]
    pub fn changes_geometry(&self) -> bool {
        self.min.is_some() || self.max.is_some() || self.step.is_some() || self.precision.is_some()
    }

    /// True when nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Errors from loading or strictly validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config-file")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Configuration parsed but failed validation.
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}
