//! Error types for the printer controller.
//!
//! The only faults the core can observe are job preconditions.  Both are
//! `Copy` and map one-to-one onto the status line reported to the host.
//! Hardware access is infallible from the core's point of view.

use core::fmt;

// ---------------------------------------------------------------------------
// Precondition faults
// ---------------------------------------------------------------------------

/// A physical-state check that failed before printing began.
///
/// Variant order is evaluation order: paper is always checked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionFault {
    /// The paper sensor is deasserted.
    NoPaper,
    /// The ink sensor is deasserted.
    LowInk,
}

impl PreconditionFault {
    /// Status line sent to the host when a job is aborted for this fault.
    pub const fn status_message(self) -> &'static str {
        match self {
            Self::NoPaper => "Error: No paper loaded.",
            Self::LowInk => "Error: Low ink level.",
        }
    }
}

impl fmt::Display for PreconditionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPaper => write!(f, "no paper loaded"),
            Self::LowInk => write!(f, "low ink level"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating [`PrinterConfig`](crate::config::PrinterConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// The serialized config could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
