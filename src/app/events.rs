//! Outbound controller events.
//!
//! The [`Controller`](crate::controller::Controller) and
//! [`JobProcessor`](crate::job::JobProcessor) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  They are diagnostics
//! only; the host sees status lines through the host link.

use crate::job::{JobOutcome, JobState};

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Lines configured and both motors de-energised.
    Ready,

    /// The job state machine moved between states.
    StateChanged { from: JobState, to: JobState },

    /// A job attempt returned to idle.
    JobFinished(JobOutcome),
}
