//! Port traits — the boundary between the controller core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ JobProcessor / Controller (core)
//! ```
//!
//! Driven adapters (GPIO + delay, host link, event sinks) implement these
//! traits.  The core consumes them via generics, so it never touches
//! hardware registers or the host transport directly.
//!
//! None of the ports return errors.  The hardware and host link are
//! treated as infallible; adapters log what goes wrong on their side.

use crate::lines::{DigitalLine, Direction, Level};

// ───────────────────────────────────────────────────────────────
// Hardware capability (driven adapter: core ↔ GPIO + timer)
// ───────────────────────────────────────────────────────────────

/// Raw access to the four digital lines plus a blocking delay.
pub trait HardwarePort {
    /// Set the direction of a line.  Called once per line at init.
    fn configure(&mut self, line: DigitalLine, direction: Direction);

    /// Drive an output line to `level`.
    fn write(&mut self, line: DigitalLine, level: Level);

    /// Sample the current level of an input line.
    fn read(&mut self, line: DigitalLine) -> Level;

    /// Block for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Host link (driven adapter: core ↔ host transport)
// ───────────────────────────────────────────────────────────────

/// Job signalling from the host and status reporting back to it.
///
/// Framing, acknowledgement and retry all live in the adapter.
pub trait HostLink {
    /// A new job is waiting to be processed.
    fn has_pending_job(&mut self) -> bool;

    /// The current job has at least one more line to print.
    fn has_more_data(&mut self) -> bool;

    /// Fire-and-forget status line to the host.
    fn send_status(&mut self, message: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: core → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`ControllerEvent`](super::events::ControllerEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ControllerEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::ControllerEvent) {}
}
