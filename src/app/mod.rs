//! Application boundary — port traits and the events that cross them.
//!
//! All interaction with GPIO, timers and the host connection happens
//! through the traits in [`ports`], keeping the controller core fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
