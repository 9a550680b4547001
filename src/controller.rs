//! Main loop — polls the host link and dispatches jobs.
//!
//! ```text
//!  HardwarePort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                   │       Controller        │
//!      HostLink ◀──▶│  poll · JobProcessor    │
//!                   └─────────────────────────┘
//! ```
//!
//! [`Controller`] owns the configuration and every port.  Jobs run
//! synchronously inside [`Controller::poll_once`], so no job can be
//! accepted while another is printing.

use log::info;

use crate::app::events::ControllerEvent;
use crate::app::ports::{EventSink, HardwarePort, HostLink};
use crate::config::PrinterConfig;
use crate::drivers::motors::ActuatorController;
use crate::job::{JobOutcome, JobProcessor};
use crate::lines::DigitalLine;
use crate::signal::{CancelFlag, ShutdownSignal};

/// Counters accumulated across [`Controller::run`] calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Poll iterations executed.
    pub polls: u32,
    /// Jobs that printed until the host ran out of data.
    pub jobs_completed: u32,
    /// Jobs rejected by a precondition.
    pub jobs_aborted: u32,
    /// Jobs stopped by the cycle limit or a cancel request.
    pub jobs_stopped: u32,
}

impl RunSummary {
    fn record(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Completed { .. } => {
                self.jobs_completed = self.jobs_completed.saturating_add(1);
            }
            JobOutcome::Aborted(_) => {
                self.jobs_aborted = self.jobs_aborted.saturating_add(1);
            }
            JobOutcome::CycleLimitReached { .. } | JobOutcome::Cancelled { .. } => {
                self.jobs_stopped = self.jobs_stopped.saturating_add(1);
            }
        }
    }

    pub fn jobs_total(&self) -> u32 {
        self.jobs_completed
            .saturating_add(self.jobs_aborted)
            .saturating_add(self.jobs_stopped)
    }
}

pub struct Controller<'a, H, L, S> {
    config: PrinterConfig,
    hw: H,
    link: L,
    sink: S,
    cancel: Option<&'a CancelFlag>,
    summary: RunSummary,
}

impl<'a, H, L, S> Controller<'a, H, L, S>
where
    H: HardwarePort,
    L: HostLink,
    S: EventSink,
{
    /// Construct the controller.  Does **not** touch hardware; call
    /// [`init`](Self::init) next.
    pub fn new(config: PrinterConfig, hw: H, link: L, sink: S) -> Self {
        Self {
            config,
            hw,
            link,
            sink,
            cancel: None,
            summary: RunSummary::default(),
        }
    }

    /// Let `flag` cancel the job in progress between sub-cycles.
    #[must_use]
    pub fn with_cancel(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Configure every line with its fixed direction, then de-energise
    /// both motors.
    pub fn init(&mut self) {
        for line in DigitalLine::ALL {
            self.hw.configure(line, line.direction());
        }
        ActuatorController::new(&self.config.lines).all_off(&mut self.hw);
        self.sink.emit(&ControllerEvent::Ready);
        info!(
            "Controller ready (dwell={}ms settle={}ms poll={}ms limit={:?})",
            self.config.head_dwell_ms,
            self.config.feed_settle_ms,
            self.config.poll_interval_ms,
            self.config.max_cycles
        );
    }

    /// Check the host once; if a job is pending, process it to completion.
    pub fn poll_once(&mut self) -> Option<JobOutcome> {
        if !self.link.has_pending_job() {
            return None;
        }
        info!("Job accepted");
        let mut processor = JobProcessor::new(&self.config);
        if let Some(flag) = self.cancel {
            processor = processor.with_cancel(flag);
        }
        let outcome = processor.process_job(&mut self.hw, &mut self.link, &mut self.sink);
        self.summary.record(outcome);
        Some(outcome)
    }

    /// Poll at the configured cadence until `shutdown` asks to stop.
    ///
    /// The signal is checked before every poll; a job in progress always
    /// runs to completion first.
    pub fn run(&mut self, mut shutdown: impl ShutdownSignal) -> RunSummary {
        while !shutdown.requested() {
            self.summary.polls = self.summary.polls.saturating_add(1);
            self.poll_once();
            self.hw.delay_ms(self.config.poll_interval_ms);
        }
        info!(
            "Main loop stopped after {} polls ({} jobs)",
            self.summary.polls,
            self.summary.jobs_total()
        );
        self.summary
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Tear down, handing the ports back.
    pub fn into_parts(self) -> (H, L, S) {
        (self.hw, self.link, self.sink)
    }
}
