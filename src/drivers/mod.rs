//! Actuator drivers.

pub mod motors;
