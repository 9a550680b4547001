//! Channel-backed host link adapter.
//!
//! Uses `embassy-sync` bounded channels to bridge the host transport
//! task (USB-CDC console, UART, network) with the synchronous control
//! loop.  The transport side decodes its own framing into [`HostFrame`]s
//! and drains status lines; the control loop only sees [`HostLink`].
//!
//! ```text
//! ┌──────────────┐  HostFrame   ┌──────────────┐
//! │  Transport   │────────────▶│  Control Loop │
//! │  task        │◀────────────│  (sync)       │
//! └──────────────┘  StatusLine  └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use futures_lite::future::{block_on, or};
use heapless::{String, Vec};
use log::{debug, info, warn};

use crate::app::ports::HostLink;
use crate::signal::CancelFlag;

/// Largest print line carried in one frame.
pub const LINE_CAPACITY: usize = 128;

/// Longest status message the link will carry.
pub const STATUS_CAPACITY: usize = 48;

/// One status line queued for the host.
pub type StatusLine = String<STATUS_CAPACITY>;

/// Inbound unit from the host transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostFrame {
    /// A new job begins.
    JobStart,
    /// One line of print data.
    Line(Vec<u8, LINE_CAPACITY>),
    /// The current job has no more data.
    JobEnd,
}

impl HostFrame {
    /// Console bridge: `JOB` opens a job, `END` closes it, anything else is
    /// a data line (truncated to [`LINE_CAPACITY`]).
    pub fn from_console_line(line: &str) -> Self {
        match line.trim_end_matches(['\r', '\n']) {
            "JOB" => Self::JobStart,
            "END" => Self::JobEnd,
            data => {
                let bytes = data.as_bytes();
                let take = bytes.len().min(LINE_CAPACITY);
                let mut buf = Vec::new();
                // Cannot fail: `take` is bounded by the capacity.
                let _ = buf.extend_from_slice(&bytes[..take]);
                Self::Line(buf)
            }
        }
    }
}

pub type FrameChannel<const N: usize> = Channel<CriticalSectionRawMutex, HostFrame, N>;
pub type StatusChannel<const N: usize> = Channel<CriticalSectionRawMutex, StatusLine, N>;

/// [`HostLink`] over a pair of channels.
///
/// `has_more_data` blocks until the transport delivers the next frame of
/// the open job, or until the attached cancel flag is raised.  Frames
/// that arrive outside a job are discarded.
pub struct ChannelHostLink<'a, const IN: usize, const OUT: usize> {
    inbound: &'a FrameChannel<IN>,
    outbound: &'a StatusChannel<OUT>,
    cancel: Option<&'a CancelFlag>,
    in_job: bool,
    /// A `JobStart` arrived while the previous job was still open.
    queued_start: bool,
    dropped_status: u32,
}

impl<'a, const IN: usize, const OUT: usize> ChannelHostLink<'a, IN, OUT> {
    pub fn new(inbound: &'a FrameChannel<IN>, outbound: &'a StatusChannel<OUT>) -> Self {
        Self {
            inbound,
            outbound,
            cancel: None,
            in_job: false,
            queued_start: false,
            dropped_status: 0,
        }
    }

    /// Stop waiting for data when `flag` is raised.  The flag is left
    /// raised for the job processor to act on.
    #[must_use]
    pub fn with_cancel(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Next frame of the open job, or `None` if a cancel arrived first.
    fn next_frame(&self) -> Option<HostFrame> {
        let inbound = self.inbound;
        match self.cancel {
            Some(flag) => block_on(or(async { Some(inbound.receive().await) }, async {
                flag.raised().await;
                None
            })),
            None => Some(block_on(inbound.receive())),
        }
    }

    /// Status lines lost because the outbound channel was full.
    pub fn dropped_status(&self) -> u32 {
        self.dropped_status
    }

    pub fn in_job(&self) -> bool {
        self.in_job
    }
}

impl<const IN: usize, const OUT: usize> HostLink for ChannelHostLink<'_, IN, OUT> {
    fn has_pending_job(&mut self) -> bool {
        // Only polled between jobs; a job aborted on a precondition never
        // read its data, so whatever is left of it is stale.
        self.in_job = false;
        if self.queued_start {
            self.queued_start = false;
            self.in_job = true;
            return true;
        }
        while let Ok(frame) = self.inbound.try_receive() {
            match frame {
                HostFrame::JobStart => {
                    self.in_job = true;
                    return true;
                }
                other => debug!("Discarding frame outside a job: {:?}", other),
            }
        }
        false
    }

    fn has_more_data(&mut self) -> bool {
        if !self.in_job {
            return false;
        }
        let Some(frame) = self.next_frame() else {
            info!("Cancel raised while waiting for job data");
            return false;
        };
        match frame {
            HostFrame::Line(_) => true,
            HostFrame::JobEnd => {
                self.in_job = false;
                false
            }
            HostFrame::JobStart => {
                warn!("New job started before END, closing current job");
                self.in_job = false;
                self.queued_start = true;
                false
            }
        }
    }

    fn send_status(&mut self, message: &str) {
        let mut line = StatusLine::new();
        for ch in message.chars() {
            if line.push(ch).is_err() {
                warn!("Status truncated: {}", message);
                break;
            }
        }
        if self.outbound.try_send(line).is_err() {
            self.dropped_status += 1;
            warn!("Status channel full, dropped: {}", message);
        }
    }
}
