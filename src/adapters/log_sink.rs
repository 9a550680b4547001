//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the `log`
//! facade (UART / USB-CDC console in production).  Sub-cycle transitions
//! go out at debug level so a long job does not flood the console.

use log::{Level, log};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;
use crate::job::{JobOutcome, JobState};

/// Adapter that logs every [`ControllerEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// Console severity of an event.  Any job that did not complete is a warning.
fn level_for(event: &ControllerEvent) -> Level {
    match event {
        ControllerEvent::StateChanged {
            from: JobState::Printing(_),
            to: JobState::Printing(_),
        } => Level::Debug,
        ControllerEvent::Ready
        | ControllerEvent::StateChanged { .. }
        | ControllerEvent::JobFinished(JobOutcome::Completed { .. }) => Level::Info,
        ControllerEvent::JobFinished(_) => Level::Warn,
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        let level = level_for(event);
        match event {
            ControllerEvent::Ready => {
                log!(level, "READY | lines configured, motors off");
            }
            ControllerEvent::StateChanged { from, to } => {
                log!(level, "STATE | {} -> {}", from.name(), to.name());
            }
            ControllerEvent::JobFinished(outcome) => match outcome {
                JobOutcome::Completed { cycles } => {
                    log!(level, "JOB | completed, {} lines", cycles);
                }
                JobOutcome::Aborted(fault) => {
                    log!(level, "JOB | aborted: {}", fault);
                }
                JobOutcome::CycleLimitReached { cycles } => {
                    log!(level, "JOB | stopped at cycle limit ({} lines)", cycles);
                }
                JobOutcome::Cancelled { cycles } => {
                    log!(level, "JOB | cancelled after {} lines", cycles);
                }
            },
        }
    }
}
