//! Printer controller firmware library.
//!
//! Exposes the controller core and its adapters for the firmware binary
//! and for host-side integration testing.  Nothing here depends on a
//! specific chip; the ESP-IDF wiring lives in `main.rs` behind the
//! `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod controller;
pub mod drivers;
pub mod error;
pub mod job;
pub mod lines;
pub mod pins;
pub mod sensors;
pub mod signal;
