#![forbid(unsafe_code)]

//! Host attribute binding.
//!
//! Markup hosts configure the slider through string attributes:
//!
//! | attribute   | meaning                              | fallback        |
//! |-------------|--------------------------------------|-----------------|
//! | `min`       | lower bound                          | `0`             |
//! | `max`       | upper bound                          | `100`           |
//! | `values`    | comma-separated initial values       | default pair    |
//! | `name`      | form-field base name                 | `range-values`  |
//! | `precision` | decimal digits                       | `0`             |
//! | `step`      | snap increment, `0` = continuous     | `0`             |
//! | `disabled`  | boolean; presence means `true`       | `false`         |
//!
//! [`ParseMode::Lenient`] never fails: malformed numbers fall back to the
//! defaults and unparseable list entries are dropped. [`ParseMode::Strict`]
//! reports the first malformed or unknown attribute instead.

use std::fmt;

use mrange_core::config::{
    ConfigPatch, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_NAME, DEFAULT_PRECISION, DEFAULT_STEP,
    SliderConfig,
};

use crate::Result;

/// Recognized attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Min,
    Max,
    Values,
    Name,
    Precision,
    Step,
    Disabled,
}

impl Attribute {
    /// Every observed attribute, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Min,
        Self::Max,
        Self::Values,
        Self::Name,
        Self::Precision,
        Self::Step,
        Self::Disabled,
    ];

    /// Markup name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Values => "values",
            Self::Name => "name",
            Self::Precision => "precision",
            Self::Step => "step",
            Self::Disabled => "disabled",
        }
    }

    /// Look up a markup name (ASCII case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How malformed attribute text is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Replace malformed values with defaults.
    #[default]
    Lenient,
    /// Reject malformed values and unknown attribute names.
    Strict,
}

/// Strict-mode attribute failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The attribute's text is not a valid value.
    Malformed { attribute: Attribute, value: String },
    /// The attribute name is not recognized.
    Unknown(String),
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { attribute, value } => {
                write!(f, "malformed `{attribute}` attribute: {value:?}")
            }
            Self::Unknown(name) => write!(f, "unknown attribute `{name}`"),
        }
    }
}

impl std::error::Error for AttributeError {}

/// Build a configuration from an attribute set.
///
/// Attributes not present keep their defaults. A later duplicate wins.
/// Lenient parsing repairs the result (reversed bounds are swapped);
/// strict parsing rejects a configuration that would need repair.
pub fn parse_attributes<'a, I>(attrs: I, mode: ParseMode) -> Result<SliderConfig>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut merged = ConfigPatch::default();
    for (name, value) in attrs {
        merge(&mut merged, attribute_patch(name, Some(value), mode)?);
    }
    match mode {
        ParseMode::Lenient => Ok(SliderConfig::default().patched(&merged)),
        ParseMode::Strict => Ok(apply_raw(merged).ensure_valid()?),
    }
}

fn merge(into: &mut ConfigPatch, patch: ConfigPatch) {
    into.min = patch.min.or(into.min);
    into.max = patch.max.or(into.max);
    into.step = patch.step.or(into.step);
    into.precision = patch.precision.or(into.precision);
    into.disabled = patch.disabled.or(into.disabled);
    if patch.values.is_some() {
        into.values = patch.values;
    }
    if patch.name.is_some() {
        into.name = patch.name;
    }
}

fn apply_raw(patch: ConfigPatch) -> SliderConfig {
    let defaults = SliderConfig::default();
    SliderConfig {
        min: patch.min.unwrap_or(defaults.min),
        max: patch.max.unwrap_or(defaults.max),
        step: patch.step.unwrap_or(defaults.step),
        precision: patch.precision.unwrap_or(defaults.precision),
        disabled: patch.disabled.unwrap_or(defaults.disabled),
        values: patch.values.or(defaults.values),
        name: patch.name.unwrap_or(defaults.name),
    }
}

/// Translate one attribute change into a configuration patch.
///
/// `value` is `None` when the attribute was removed, which restores the
/// default (and clears `disabled`).
pub fn attribute_patch(
    name: &str,
    value: Option<&str>,
    mode: ParseMode,
) -> std::result::Result<ConfigPatch, AttributeError> {
    let Some(attribute) = Attribute::from_name(name) else {
        return match mode {
            ParseMode::Lenient => Ok(ConfigPatch::default()),
            ParseMode::Strict => Err(AttributeError::Unknown(name.to_owned())),
        };
    };

    let mut patch = ConfigPatch::default();
    match attribute {
        Attribute::Min => patch.min = Some(parse_number(attribute, value, DEFAULT_MIN, mode)?),
        Attribute::Max => patch.max = Some(parse_number(attribute, value, DEFAULT_MAX, mode)?),
        Attribute::Step => patch.step = Some(parse_step(value, mode)?),
        Attribute::Precision => patch.precision = Some(parse_precision(value, mode)?),
        Attribute::Values => patch.values = Some(parse_values(value, mode)?),
        Attribute::Name => {
            let name = value.map(str::trim).filter(|v| !v.is_empty());
            patch.name = Some(name.unwrap_or(DEFAULT_NAME).to_owned());
        }
        Attribute::Disabled => patch.disabled = Some(value.is_some()),
    }
    Ok(patch)
}

/// Parse a comma-separated value list. Empty text yields an empty list.
pub fn parse_values(
    value: Option<&str>,
    mode: ParseMode,
) -> std::result::Result<Vec<f64>, AttributeError> {
    let Some(text) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Vec::new());
    };
    let mut values = Vec::new();
    for entry in text.split(',') {
        match parse_finite(entry) {
            Some(v) => values.push(v),
            None if mode == ParseMode::Strict => {
                return Err(malformed(Attribute::Values, text));
            }
            None => {}
        }
    }
    Ok(values)
}

fn parse_number(
    attribute: Attribute,
    value: Option<&str>,
    default: f64,
    mode: ParseMode,
) -> std::result::Result<f64, AttributeError> {
    let Some(text) = value else {
        return Ok(default);
    };
    match (parse_finite(text), mode) {
        (Some(v), _) => Ok(v),
        (None, ParseMode::Lenient) => Ok(default),
        (None, ParseMode::Strict) => Err(malformed(attribute, text)),
    }
}

fn parse_step(value: Option<&str>, mode: ParseMode) -> std::result::Result<f64, AttributeError> {
    let step = parse_number(Attribute::Step, value, DEFAULT_STEP, mode)?;
    if step >= 0.0 {
        return Ok(step);
    }
    match (mode, value) {
        (ParseMode::Strict, Some(text)) => Err(malformed(Attribute::Step, text)),
        _ => Ok(DEFAULT_STEP),
    }
}

fn parse_precision(
    value: Option<&str>,
    mode: ParseMode,
) -> std::result::Result<u32, AttributeError> {
    let Some(text) = value else {
        return Ok(DEFAULT_PRECISION);
    };
    let trimmed = text.trim();
    if let Ok(digits) = trimmed.parse::<u32>() {
        return Ok(digits);
    }
    match mode {
        ParseMode::Strict => Err(malformed(Attribute::Precision, text)),
        // "2.7" keeps its integer part, like a leading-digits integer parse.
        ParseMode::Lenient => Ok(parse_finite(trimmed)
            .filter(|v| *v >= 0.0)
            .map_or(DEFAULT_PRECISION, |v| v.trunc().min(f64::from(u32::MAX)) as u32)),
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn malformed(attribute: Attribute, text: &str) -> AttributeError {
    AttributeError::Malformed {
        attribute,
        value: text.to_owned(),
    }
}
