//! Job processor — the print-job state machine.
//!
//! ```text
//!            ┌──────────────────────────┐
//!   Idle ──▶ │ ValidatingPreconditions  │──── fault ───▶ Aborted ──▶ Idle
//!            └────────────┬─────────────┘
//!                         │ ok
//!                         ▼
//!   Printing:  Entry ──▶ AwaitData ──── no data ───▶ Done ──▶ Idle
//!                          ▲    │ more data
//!                          │    ▼
//!                FeedDelay ◀─ HeadIdle ◀─ HeadActive
//! ```
//!
//! [`JobProcessor::process_job`] runs one job attempt to completion.
//! Every path ends back in `Idle` with both motors de-energised.  The
//! only blocking points are the head dwell and feed settle delays; the
//! optional cancel flag and cycle limit are checked in `AwaitData`,
//! between sub-cycles.

use log::{debug, info, warn};

use crate::app::events::ControllerEvent;
use crate::app::ports::{EventSink, HardwarePort, HostLink};
use crate::config::PrinterConfig;
use crate::drivers::motors::ActuatorController;
use crate::error::PreconditionFault;
use crate::sensors::SensorEvaluator;
use crate::signal::CancelFlag;

pub const STATUS_PRINTING_STARTED: &str = "Printing started.";
pub const STATUS_PRINTING_COMPLETED: &str = "Printing completed.";
pub const STATUS_CYCLE_LIMIT: &str = "Error: Print cycle limit reached.";
pub const STATUS_CANCELLED: &str = "Printing cancelled.";

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Top-level job states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    ValidatingPreconditions,
    Aborted(PreconditionFault),
    Printing(PrintPhase),
}

/// Sub-states of [`JobState::Printing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintPhase {
    /// Feed motor on, "Printing started." sent.
    Entry,
    /// Between sub-cycles: checkpoint, then ask the host for more data.
    AwaitData,
    /// Head energised for the dwell interval.
    HeadActive,
    /// Head released.
    HeadIdle,
    /// Paper settling before the next data check.
    FeedDelay,
    /// Feed motor off, final status sent.
    Done,
}

impl JobState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::ValidatingPreconditions => "ValidatingPreconditions",
            Self::Aborted(_) => "Aborted",
            Self::Printing(phase) => match phase {
                PrintPhase::Entry => "Printing/Entry",
                PrintPhase::AwaitData => "Printing/AwaitData",
                PrintPhase::HeadActive => "Printing/HeadActive",
                PrintPhase::HeadIdle => "Printing/HeadIdle",
                PrintPhase::FeedDelay => "Printing/FeedDelay",
                PrintPhase::Done => "Printing/Done",
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a job attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The host ran out of data after `cycles` sub-cycles.
    Completed { cycles: u32 },
    /// A precondition failed; no motor was touched.
    Aborted(PreconditionFault),
    /// The configured `max_cycles` was reached before the host ran dry.
    CycleLimitReached { cycles: u32 },
    /// The cancel flag was raised between sub-cycles.
    Cancelled { cycles: u32 },
}

impl JobOutcome {
    /// Sub-cycles executed (0 for an aborted job).
    pub const fn cycles(self) -> u32 {
        match self {
            Self::Completed { cycles }
            | Self::CycleLimitReached { cycles }
            | Self::Cancelled { cycles } => cycles,
            Self::Aborted(_) => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

/// Why the printing phase is exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    DataExhausted,
    CycleLimit,
    Cancelled,
}

/// Per-attempt bookkeeping.  Lives on the stack for one `process_job` call.
struct JobCycle {
    cycles: u32,
    exit: Exit,
}

enum Step {
    Next(JobState),
    Finish(JobOutcome),
}

/// Runs single print jobs against the configured timing and line map.
pub struct JobProcessor<'a> {
    config: &'a PrinterConfig,
    sensors: SensorEvaluator<'a>,
    motors: ActuatorController<'a>,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> JobProcessor<'a> {
    pub fn new(config: &'a PrinterConfig) -> Self {
        Self {
            config,
            sensors: SensorEvaluator::new(&config.lines),
            motors: ActuatorController::new(&config.lines),
            cancel: None,
        }
    }

    /// Honour `flag` at the checkpoint between sub-cycles.
    #[must_use]
    pub fn with_cancel(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Process one job attempt to completion.
    ///
    /// Blocks for the whole print.  There is no timeout unless
    /// `max_cycles` is configured: a host that always reports more data
    /// keeps the printer running.
    pub fn process_job(
        &self,
        hw: &mut impl HardwarePort,
        link: &mut impl HostLink,
        sink: &mut impl EventSink,
    ) -> JobOutcome {
        // A request raised while idle does not carry over into this job.
        if self.cancel.is_some_and(CancelFlag::take) {
            debug!("Discarding cancel request raised before job start");
        }

        let mut job = JobCycle {
            cycles: 0,
            exit: Exit::DataExhausted,
        };
        let mut state = JobState::Idle;

        loop {
            match self.step(state, &mut job, hw, link) {
                Step::Next(next) => {
                    sink.emit(&ControllerEvent::StateChanged {
                        from: state,
                        to: next,
                    });
                    state = next;
                }
                Step::Finish(outcome) => {
                    sink.emit(&ControllerEvent::StateChanged {
                        from: state,
                        to: JobState::Idle,
                    });
                    sink.emit(&ControllerEvent::JobFinished(outcome));
                    info!("Job finished: {:?}", outcome);
                    return outcome;
                }
            }
        }
    }

    fn step(
        &self,
        state: JobState,
        job: &mut JobCycle,
        hw: &mut impl HardwarePort,
        link: &mut impl HostLink,
    ) -> Step {
        match state {
            JobState::Idle => Step::Next(JobState::ValidatingPreconditions),

            JobState::ValidatingPreconditions => match self.sensors.check_preconditions(hw) {
                Ok(()) => Step::Next(JobState::Printing(PrintPhase::Entry)),
                Err(fault) => {
                    warn!("Job rejected: {}", fault);
                    Step::Next(JobState::Aborted(fault))
                }
            },

            JobState::Aborted(fault) => {
                link.send_status(fault.status_message());
                Step::Finish(JobOutcome::Aborted(fault))
            }

            JobState::Printing(phase) => self.print_step(phase, job, hw, link),
        }
    }

    fn print_step(
        &self,
        phase: PrintPhase,
        job: &mut JobCycle,
        hw: &mut impl HardwarePort,
        link: &mut impl HostLink,
    ) -> Step {
        match phase {
            PrintPhase::Entry => {
                self.motors.set_feed_motor(hw, true);
                link.send_status(STATUS_PRINTING_STARTED);
                info!("Printing started");
                Step::Next(JobState::Printing(PrintPhase::AwaitData))
            }

            PrintPhase::AwaitData => {
                if self.cancel.is_some_and(CancelFlag::take) {
                    info!("Cancel requested after {} cycles", job.cycles);
                    job.exit = Exit::Cancelled;
                    return Step::Next(JobState::Printing(PrintPhase::Done));
                }
                if self.config.max_cycles.is_some_and(|max| job.cycles >= max) {
                    warn!("Cycle limit of {} reached, stopping job", job.cycles);
                    job.exit = Exit::CycleLimit;
                    return Step::Next(JobState::Printing(PrintPhase::Done));
                }
                if link.has_more_data() {
                    return Step::Next(JobState::Printing(PrintPhase::HeadActive));
                }
                // A link blocked on the host gives up its wait on cancel.
                job.exit = if self.cancel.is_some_and(CancelFlag::take) {
                    info!("Cancel requested while waiting for data");
                    Exit::Cancelled
                } else {
                    Exit::DataExhausted
                };
                Step::Next(JobState::Printing(PrintPhase::Done))
            }

            PrintPhase::HeadActive => {
                self.motors.set_print_head_motor(hw, true);
                hw.delay_ms(self.config.head_dwell_ms);
                Step::Next(JobState::Printing(PrintPhase::HeadIdle))
            }

            PrintPhase::HeadIdle => {
                self.motors.set_print_head_motor(hw, false);
                Step::Next(JobState::Printing(PrintPhase::FeedDelay))
            }

            PrintPhase::FeedDelay => {
                hw.delay_ms(self.config.feed_settle_ms);
                job.cycles = job.cycles.saturating_add(1);
                debug!("Cycle {} done", job.cycles);
                Step::Next(JobState::Printing(PrintPhase::AwaitData))
            }

            PrintPhase::Done => {
                self.motors.set_feed_motor(hw, false);
                let cycles = job.cycles;
                let (status, outcome) = match job.exit {
                    Exit::DataExhausted => {
                        (STATUS_PRINTING_COMPLETED, JobOutcome::Completed { cycles })
                    }
                    Exit::CycleLimit => (STATUS_CYCLE_LIMIT, JobOutcome::CycleLimitReached { cycles }),
                    Exit::Cancelled => (STATUS_CANCELLED, JobOutcome::Cancelled { cycles }),
                };
                link.send_status(status);
                Step::Finish(outcome)
            }
        }
    }
}
