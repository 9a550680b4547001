//! Print-head and paper-feed motor control.
//!
//! Open-loop enable lines: `true` drives the asserted level, `false` the
//! deasserted one.  Exactly one write per call and no readback, so a
//! stalled or disconnected motor is not detected here.
//!
//! ## Safety contract
//!
//! Both motors must be de-energised whenever no job is active.  The job
//! processor and controller enforce this; this driver is a dumb actuator.

use log::debug;

use crate::app::ports::HardwarePort;
use crate::lines::{DigitalLine, LineMap};

pub struct ActuatorController<'a> {
    lines: &'a LineMap,
}

impl<'a> ActuatorController<'a> {
    pub fn new(lines: &'a LineMap) -> Self {
        Self { lines }
    }

    pub fn set_print_head_motor(&self, hw: &mut impl HardwarePort, on: bool) {
        self.drive(hw, DigitalLine::PrintHeadMotor, on);
    }

    pub fn set_feed_motor(&self, hw: &mut impl HardwarePort, on: bool) {
        self.drive(hw, DigitalLine::PaperFeedMotor, on);
    }

    /// De-energise both motors.
    pub fn all_off(&self, hw: &mut impl HardwarePort) {
        self.set_print_head_motor(hw, false);
        self.set_feed_motor(hw, false);
    }

    fn drive(&self, hw: &mut impl HardwarePort, line: DigitalLine, on: bool) {
        let level = self.lines.get(line).level_for(on);
        debug!("{} -> {}", line, if on { "on" } else { "off" });
        hw.write(line, level);
    }
}
