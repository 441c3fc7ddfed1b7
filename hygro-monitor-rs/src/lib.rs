//! Humidity/temperature reading monitor.
//!
//! The [`monitor`] module holds the poll → classify → render/log → sleep
//! cycle and the consecutive-error state machine that decides between the
//! reading, retry and diagnostic views. Hardware is reached only through the
//! [`SensorSource`](monitor::SensorSource), [`OutputSink`](monitor::OutputSink)
//! and [`Clock`](monitor::Clock) traits, so the whole crate runs on the host.
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging of state transitions and
//!   [`defmt::Format`] on public types.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod monitor;

pub use monitor::{ReadingMonitor, SensorError};
