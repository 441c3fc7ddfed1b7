//! Sensor polling with transient-fault retry and recovery.
//!
//! [`ReadingMonitor`] drives one poll cycle at a time:
//!
//! ```text
//! read ──► classify ──► update counter ──► render + log ──► sleep
//! ```
//!
//! # Error classification
//!
//! A poll fails if the sensor returns a [`SensorError`] or a [`Reading`]
//! with NaN in either field. Failures bump a consecutive-error counter held
//! in [`MonitorState`]; the first success afterwards resets it.
//!
//! ```text
//!               failure (n < threshold)        failure (n >= threshold)
//!   Nominal ───────────────────────► Retrying ─────────────────────► Degraded
//!      ▲                                 │                               │
//!      └──────────── success ────────────┴────────── success ────────────┘
//! ```
//!
//! Retrying shows `Retry: n/threshold`; Degraded shows a static wiring
//! checklist. Both keep polling at the same [`POLL_INTERVAL_MS`] cadence,
//! there is no backoff, and neither state is terminal.
//!
//! # Configuration
//!
//! [`ERROR_THRESHOLD`] and [`POLL_INTERVAL_MS`] are fixed. The only
//! construction-time setting is [`MonitorConfig::data_pin`], so firmware can
//! name its actual data pin in the checklist.

mod error;
mod ports;
mod reading;
mod reading_monitor;
mod state;
mod view;

pub use error::SensorError;
pub use ports::{Clock, OutputSink, SensorSource};
pub use reading::Reading;
pub use reading_monitor::{PollOutcome, ReadingMonitor};
pub use state::{Health, MonitorState};
pub use view::{Line, Lines, StatusView, LINE_CAPACITY, MAX_LINES};

/// Consecutive failures at which the retry view turns into the diagnostic view.
pub const ERROR_THRESHOLD: u8 = 3;

/// Pause after every poll cycle. DHT22 parts need at least 2 s between reads.
pub const POLL_INTERVAL_MS: u32 = 2000;

/// Data pin named in the diagnostic checklist when none is configured.
pub const DATA_PIN_LABEL: &str = "Pin 2";

/// Construction-time settings for [`ReadingMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Label for the sensor data pin in the diagnostic view. Default: `"Pin 2"`.
    pub data_pin: &'static str,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            data_pin: DATA_PIN_LABEL,
        }
    }
}
