//! Mock adapters for integration tests.
//!
//! Records every hardware operation, host-link query and controller
//! event so tests can assert on the full history without real GPIO.

use std::collections::VecDeque;

use printctl::app::events::ControllerEvent;
use printctl::app::ports::{EventSink, HardwarePort, HostLink};
use printctl::lines::{DigitalLine, Direction, Level};

// ── Hardware op record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwOp {
    Configure(DigitalLine, Direction),
    Write(DigitalLine, Level),
    Read(DigitalLine),
    Delay(u32),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub paper: Level,
    pub ink: Level,
    pub ops: Vec<HwOp>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(paper: bool, ink: bool) -> Self {
        Self {
            paper: Level::from(paper),
            ink: Level::from(ink),
            ops: Vec::new(),
        }
    }

    pub fn ready() -> Self {
        Self::new(true, true)
    }

    pub fn writes(&self) -> Vec<(DigitalLine, Level)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                HwOp::Write(line, level) => Some((*line, *level)),
                _ => None,
            })
            .collect()
    }

    /// Logical on/off sequence written to `line` (active-high wiring).
    pub fn transitions(&self, line: DigitalLine) -> Vec<bool> {
        self.writes()
            .into_iter()
            .filter(|(l, _)| *l == line)
            .map(|(_, level)| level == Level::High)
            .collect()
    }

    /// Last level written to `line`, if any.
    pub fn last_level(&self, line: DigitalLine) -> Option<Level> {
        self.writes()
            .into_iter()
            .rev()
            .find(|(l, _)| *l == line)
            .map(|(_, level)| level)
    }

    /// Total delay between each head-on write and the following head-off.
    pub fn head_dwells(&self) -> Vec<u32> {
        let mut dwells = Vec::new();
        let mut current: Option<u32> = None;
        for op in &self.ops {
            match *op {
                HwOp::Write(DigitalLine::PrintHeadMotor, Level::High) => current = Some(0),
                HwOp::Delay(ms) => {
                    if let Some(acc) = current.as_mut() {
                        *acc += ms;
                    }
                }
                HwOp::Write(DigitalLine::PrintHeadMotor, Level::Low) => {
                    if let Some(acc) = current.take() {
                        dwells.push(acc);
                    }
                }
                _ => {}
            }
        }
        dwells
    }

    pub fn total_delay_ms(&self) -> u32 {
        self.ops
            .iter()
            .map(|op| match op {
                HwOp::Delay(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

impl HardwarePort for MockHardware {
    fn configure(&mut self, line: DigitalLine, direction: Direction) {
        self.ops.push(HwOp::Configure(line, direction));
    }

    fn write(&mut self, line: DigitalLine, level: Level) {
        self.ops.push(HwOp::Write(line, level));
    }

    fn read(&mut self, line: DigitalLine) -> Level {
        self.ops.push(HwOp::Read(line));
        match line {
            DigitalLine::PaperSensor => self.paper,
            DigitalLine::InkSensor => self.ink,
            _ => Level::Low,
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ops.push(HwOp::Delay(ms));
    }
}

// ── ScriptedHost ──────────────────────────────────────────────

/// Host link driven by fixed answer scripts.  Once a script runs out
/// the host answers `false`, unless it is endless.
pub struct ScriptedHost {
    pub pending: VecDeque<bool>,
    pub more_data: VecDeque<bool>,
    pub endless: bool,
    pub more_data_queries: u32,
    pub status: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedHost {
    pub fn new(pending: &[bool], more_data: &[bool]) -> Self {
        Self {
            pending: pending.iter().copied().collect(),
            more_data: more_data.iter().copied().collect(),
            endless: false,
            more_data_queries: 0,
            status: Vec::new(),
        }
    }

    /// One pending job with `lines` lines of data.
    pub fn job_with_lines(lines: usize) -> Self {
        let mut script = vec![true; lines];
        script.push(false);
        Self::new(&[true], &script)
    }

    /// One pending job whose data never runs out.
    pub fn endless() -> Self {
        Self {
            endless: true,
            ..Self::new(&[true], &[])
        }
    }
}

impl HostLink for ScriptedHost {
    fn has_pending_job(&mut self) -> bool {
        self.pending.pop_front().unwrap_or(false)
    }

    fn has_more_data(&mut self) -> bool {
        self.more_data_queries += 1;
        self.more_data.pop_front().unwrap_or(self.endless)
    }

    fn send_status(&mut self, message: &str) {
        self.status.push(message.to_owned());
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ControllerEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for event in &self.events {
            if let ControllerEvent::StateChanged { from, to } = event {
                if names.is_empty() {
                    names.push(from.name());
                }
                names.push(to.name());
            }
        }
        names
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ControllerEvent) {
        self.events.push(*event);
    }
}
