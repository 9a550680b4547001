//! Sensor evaluator: maps raw line samples to job preconditions.
//!
//! Each query performs exactly one read of its line and compares it
//! against the configured asserted level.  No debouncing, no caching:
//! every precondition check sees fresh hardware state.

use crate::app::ports::HardwarePort;
use crate::error::PreconditionFault;
use crate::lines::{DigitalLine, LineMap};

pub struct SensorEvaluator<'a> {
    lines: &'a LineMap,
}

impl<'a> SensorEvaluator<'a> {
    pub fn new(lines: &'a LineMap) -> Self {
        Self { lines }
    }

    pub fn paper_present(&self, hw: &mut impl HardwarePort) -> bool {
        self.sample(hw, DigitalLine::PaperSensor)
    }

    pub fn ink_sufficient(&self, hw: &mut impl HardwarePort) -> bool {
        self.sample(hw, DigitalLine::InkSensor)
    }

    /// Check both preconditions, paper strictly before ink.
    ///
    /// Short-circuits: when paper is missing the ink line is not read.
    pub fn check_preconditions(
        &self,
        hw: &mut impl HardwarePort,
    ) -> Result<(), PreconditionFault> {
        if !self.paper_present(hw) {
            return Err(PreconditionFault::NoPaper);
        }
        if !self.ink_sufficient(hw) {
            return Err(PreconditionFault::LowInk);
        }
        Ok(())
    }

    fn sample(&self, hw: &mut impl HardwarePort, line: DigitalLine) -> bool {
        let level = hw.read(line);
        self.lines.get(line).is_asserted(level)
    }
}
