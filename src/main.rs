//! Printer controller firmware — main entry point.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                    │
//! │                                                             │
//! │  EmbeddedHalBoard     ChannelHostLink      LogEventSink     │
//! │  (PinDriver+FreeRtos) (console bridge)     (serial log)     │
//! │                                                             │
//! │  ─────────────── Port Trait Boundary ──────────────────     │
//! │                                                             │
//! │  ┌───────────────────────────────────────────────────┐      │
//! │  │        Controller (poll) · JobProcessor (FSM)     │      │
//! │  └───────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use futures_lite::future::block_on;
use log::{info, warn};

use printctl::adapters::hardware::EmbeddedHalBoard;
use printctl::adapters::host_link::{ChannelHostLink, FrameChannel, HostFrame, StatusChannel};
use printctl::adapters::log_sink::LogEventSink;
use printctl::config::PrinterConfig;
use printctl::controller::Controller;
use printctl::signal::{CancelFlag, ShutdownFlag};

// ── Shared state ──────────────────────────────────────────────

static INBOUND: FrameChannel<16> = FrameChannel::<16>::new();
static OUTBOUND: StatusChannel<8> = StatusChannel::<8>::new();
static SHUTDOWN: ShutdownFlag = ShutdownFlag::new();
static CANCEL: CancelFlag = CancelFlag::new();

/// Console command that cancels the job in progress.
const CANCEL_COMMAND: &str = "CANCEL";

const BRIDGE_STACK_BYTES: usize = 4096;

// ── Console bridge ────────────────────────────────────────────
//
// Reads host lines from the USB-CDC console and forwards them to the
// control loop; writes status lines back.  `CANCEL` bypasses the frame
// queue so it also releases a job blocked waiting for host data.

fn spawn_console_bridge() -> Result<()> {
    std::thread::Builder::new()
        .name("host-rx".into())
        .stack_size(BRIDGE_STACK_BYTES)
        .spawn(|| {
            for line in std::io::stdin().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        warn!("Console read failed: {}", e);
                        continue;
                    }
                };
                if line.trim() == CANCEL_COMMAND {
                    CANCEL.cancel();
                    continue;
                }
                block_on(INBOUND.send(HostFrame::from_console_line(&line)));
            }
        })
        .context("spawning host-rx thread")?;

    std::thread::Builder::new()
        .name("host-tx".into())
        .stack_size(BRIDGE_STACK_BYTES)
        .spawn(|| {
            loop {
                let status = block_on(OUTBOUND.receive());
                println!("{}", status);
            }
        })
        .context("spawning host-tx thread")?;

    Ok(())
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("printctl v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = PrinterConfig::default();
    config.validate().context("invalid printer configuration")?;

    // ── 3. GPIO ───────────────────────────────────────────────
    // Claim the peripheral singleton so no other driver owns the pins.
    let _peripherals = Peripherals::take().context("peripherals already taken")?;
    let lines = &config.lines;

    // SAFETY: the peripheral singleton is held for the life of `main` and
    // the line map has been validated to use four distinct pins.
    let (head, feed, paper, ink) = unsafe {
        (
            AnyOutputPin::new(i32::from(lines.print_head_motor.pin)),
            AnyOutputPin::new(i32::from(lines.paper_feed_motor.pin)),
            AnyInputPin::new(i32::from(lines.paper_sensor.pin)),
            AnyInputPin::new(i32::from(lines.ink_sensor.pin)),
        )
    };

    let board = EmbeddedHalBoard::new(
        PinDriver::output(head)?,
        PinDriver::output(feed)?,
        PinDriver::input(paper)?,
        PinDriver::input(ink)?,
        FreeRtos,
    );

    // ── 4. Host link ──────────────────────────────────────────
    spawn_console_bridge()?;
    let link = ChannelHostLink::new(&INBOUND, &OUTBOUND).with_cancel(&CANCEL);

    // ── 5. Controller ─────────────────────────────────────────
    let mut controller =
        Controller::new(config, board, link, LogEventSink::new()).with_cancel(&CANCEL);
    controller.init();

    info!("System ready. Entering main loop.");
    let summary = controller.run(&SHUTDOWN);
    info!("Main loop exited: {:?}", summary);

    Ok(())
}
