//! Unified error types for the airlock controller.
//!
//! A single `Error` enum that every subsystem converts into. All variants
//! are `Copy` so they can be passed through the orchestrator and recorded
//! in events without allocation.
//!
//! Only [`Error::MissingCapability`] is fatal, and only at construction.
//! Physical stalls (door stuck, vent cannot pressurize) are not errors at
//! all: they are steady-state alarm displays re-evaluated every tick.

use core::fmt;

use crate::gate::Capability;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A required collaborator was not bound at startup.
    MissingCapability(Capability),
    /// An out-of-range numeric status code reached the render step.
    InvalidStatus(i8),
    /// A door sequence was requested with no door selected.
    AmbiguousTarget,
    /// Configuration could not be parsed or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCapability(c) => write!(f, "missing capability: {c}"),
            Self::InvalidStatus(code) => write!(f, "invalid status code: {code}"),
            Self::AmbiguousTarget => write!(f, "no inner/outer door specified"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    Parse,
    /// A field failed range validation. Describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "malformed config document"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
