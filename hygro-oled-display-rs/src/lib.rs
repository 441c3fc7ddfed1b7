//! Blocking OLED output for the SSD1306 (128×64).
//!
//! This crate provides [`OledDriver`], a wrapper around the [`ssd1306`]
//! crate in buffered-graphics mode, [`render_lines`] for laying out text
//! rows, and [`OledSink`], which plugs the panel into
//! [`hygro::monitor::ReadingMonitor`] as its [`OutputSink`].
//!
//! # Quick Start
//!
//! ```ignore
//! use hygro_oled_display_rs::{DisplayConfig, OledDriver, OledSink, DEFAULT_ADDRESS};
//!
//! let mut oled = OledDriver::new(i2c, DEFAULT_ADDRESS);
//! oled.init()?; // fatal: nothing to show readings on
//! let sink = OledSink::new(oled, DisplayConfig::default());
//! let mut monitor = ReadingMonitor::new(sensor, sink, Delay);
//! monitor.run();
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`]; also routes
//!   [`OutputSink::log`] lines to the `defmt` transport.
//!
//! [`OutputSink`]: hygro::monitor::OutputSink
//! [`OutputSink::log`]: hygro::monitor::OutputSink::log

#![no_std]

pub mod driver;
pub mod error;
pub mod layout;
pub mod sink;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::{OledDriver, DEFAULT_ADDRESS};
pub use error::OledError;
pub use layout::{render_lines, DisplayConfig};
pub use sink::OledSink;
