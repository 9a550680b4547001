//! Digital line identities, logic levels and the board line map.
//!
//! The controller touches exactly four physical lines.  Each one has a
//! fixed direction and an asserted level; the pin number and polarity are
//! assigned once from [`LineMap`] at initialisation and never change.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::pins;

// ---------------------------------------------------------------------------
// Line identity
// ---------------------------------------------------------------------------

/// One of the four physical lines the controller drives or samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DigitalLine {
    PrintHeadMotor = 0,
    PaperFeedMotor = 1,
    PaperSensor = 2,
    InkSensor = 3,
}

impl DigitalLine {
    /// Total number of lines.
    pub const COUNT: usize = 4;

    /// Every line, in configuration order (outputs first).
    pub const ALL: [DigitalLine; Self::COUNT] = [
        Self::PrintHeadMotor,
        Self::PaperFeedMotor,
        Self::PaperSensor,
        Self::InkSensor,
    ];

    /// Fixed direction of this line.
    pub const fn direction(self) -> Direction {
        match self {
            Self::PrintHeadMotor | Self::PaperFeedMotor => Direction::Output,
            Self::PaperSensor | Self::InkSensor => Direction::Input,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::PrintHeadMotor => "print-head motor",
            Self::PaperFeedMotor => "paper-feed motor",
            Self::PaperSensor => "paper sensor",
            Self::InkSensor => "ink sensor",
        }
    }
}

impl fmt::Display for DigitalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

// ---------------------------------------------------------------------------
// Logic level
// ---------------------------------------------------------------------------

/// Electrical level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The opposite level.
    pub const fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<Level> for embedded_hal::digital::PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => Self::Low,
            Level::High => Self::High,
        }
    }
}

// ---------------------------------------------------------------------------
// Line map
// ---------------------------------------------------------------------------

/// Board assignment for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAssignment {
    /// GPIO number on the controller board.
    pub pin: u8,
    /// Level that means "true" (motor energised / paper present / ink OK).
    pub asserted: Level,
}

impl LineAssignment {
    pub const fn active_high(pin: u8) -> Self {
        Self {
            pin,
            asserted: Level::High,
        }
    }

    /// Level to drive or expect for a logical value.
    pub const fn level_for(&self, on: bool) -> Level {
        if on { self.asserted } else { self.asserted.inverted() }
    }

    /// Logical value of a sampled level.
    pub fn is_asserted(&self, level: Level) -> bool {
        level == self.asserted
    }
}

/// Pin and polarity for all four lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMap {
    pub print_head_motor: LineAssignment,
    pub paper_feed_motor: LineAssignment,
    pub paper_sensor: LineAssignment,
    pub ink_sensor: LineAssignment,
}

impl LineMap {
    pub fn get(&self, line: DigitalLine) -> &LineAssignment {
        match line {
            DigitalLine::PrintHeadMotor => &self.print_head_motor,
            DigitalLine::PaperFeedMotor => &self.paper_feed_motor,
            DigitalLine::PaperSensor => &self.paper_sensor,
            DigitalLine::InkSensor => &self.ink_sensor,
        }
    }

    /// `true` if two lines share a pin number.
    pub fn has_duplicate_pins(&self) -> bool {
        let pins = DigitalLine::ALL.map(|l| self.get(l).pin);
        pins.iter()
            .enumerate()
            .any(|(i, p)| pins[i + 1..].contains(p))
    }
}

impl Default for LineMap {
    fn default() -> Self {
        Self {
            print_head_motor: LineAssignment::active_high(pins::PRINT_HEAD_MOTOR_GPIO),
            paper_feed_motor: LineAssignment::active_high(pins::PAPER_FEED_MOTOR_GPIO),
            paper_sensor: LineAssignment::active_high(pins::PAPER_SENSOR_GPIO),
            ink_sensor: LineAssignment::active_high(pins::INK_SENSOR_GPIO),
        }
    }
}
