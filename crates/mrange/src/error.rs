#![forbid(unsafe_code)]

//! Unified error type and recovery policy.
//!
//! Slider operations themselves never fail: out-of-range values are
//! clamped and malformed configuration is repaired. Errors only surface
//! from the binding layer, when a host opts into strict attribute parsing
//! or loads a configuration file. Each variant maps to a [`Recovery`] so
//! hosts that still want a working slider know what to fall back to.

use std::fmt;

use mrange_core::config::ConfigError;

use crate::attributes::{AttributeError, ParseMode};

// ── Recovery ────────────────────────────────────────────────────────────

/// What a host should do instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Re-parse leniently; malformed attributes take their defaults.
    ParseLeniently,
    /// Repair the configuration with `SliderConfig::normalized`.
    Normalize,
    /// Ignore the source and start from `SliderConfig::default()`.
    UseDefaults,
}

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error for mrange binding APIs.
#[derive(Debug)]
pub enum Error {
    /// Strict attribute parsing rejected an attribute.
    Attribute(AttributeError),
    /// A configuration failed to load or validate.
    Config(ConfigError),
}

impl Error {
    /// Suggested fallback.
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Attribute(_) => Recovery::ParseLeniently,
            Self::Config(ConfigError::Invalid(_)) => Recovery::Normalize,
            #[allow(unreachable_patterns)]
            Self::Config(_) => Recovery::UseDefaults,
        }
    }

    /// Short label for log fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Attribute(_) => "attribute",
            Self::Config(_) => "config",
        }
    }

    /// Parse mode to retry with, if retrying can succeed.
    #[must_use]
    pub fn retry_mode(&self) -> Option<ParseMode> {
        matches!(self.recovery(), Recovery::ParseLeniently).then_some(ParseMode::Lenient)
    }
}

// ── Display / Error / From ──────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(err) => write!(f, "attribute: {err}"),
            Self::Config(err) => write!(f, "config: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Attribute(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<AttributeError> for Error {
    fn from(err: AttributeError) -> Self {
        Self::Attribute(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for mrange binding APIs.
pub type Result<T> = std::result::Result<T, Error>;
