//! GPIO pin assignments for the printer controller board.
//!
//! Single source of truth: the default [`LineMap`](crate::lines::LineMap)
//! and the firmware entry point reference this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Motor drivers (digital enable, active HIGH)
// ---------------------------------------------------------------------------

/// Digital output: print-head motor enable.
pub const PRINT_HEAD_MOTOR_GPIO: u8 = 1;
/// Digital output: paper-feed motor enable.
pub const PAPER_FEED_MOTOR_GPIO: u8 = 2;

// ---------------------------------------------------------------------------
// Sensors (digital inputs, active HIGH)
// ---------------------------------------------------------------------------

/// Optical paper-present sensor. HIGH = paper loaded.
pub const PAPER_SENSOR_GPIO: u8 = 3;
/// Ink-level switch. HIGH = ink above the low mark.
pub const INK_SENSOR_GPIO: u8 = 4;
