use super::ERROR_THRESHOLD;

/// Consecutive-error bookkeeping carried between poll cycles.
///
/// This is the only state that survives from one cycle to the next. The
/// counter equals the number of failed polls since the last success (or
/// since startup), saturating at `u8::MAX` so a long outage can never wrap
/// back to zero and look like a recovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorState {
    consecutive_errors: u8,
}

/// Health derived from the consecutive-error count and [`ERROR_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Health {
    /// Last poll succeeded (or nothing has failed yet).
    Nominal,
    /// Below the threshold; shown as retry progress.
    Retrying { attempt: u8 },
    /// At or above the threshold; shown as the diagnostic view.
    Degraded { count: u8 },
}

impl MonitorState {
    pub const fn new() -> Self {
        Self {
            consecutive_errors: 0,
        }
    }

    pub fn consecutive_errors(&self) -> u8 {
        self.consecutive_errors
    }

    /// Count one more failed poll and return the new count.
    pub fn record_failure(&mut self) -> u8 {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
        self.consecutive_errors
    }

    /// Reset after a successful poll.
    ///
    /// Returns `true` if this success ended a run of failures.
    pub fn record_success(&mut self) -> bool {
        let recovered = self.consecutive_errors > 0;
        self.consecutive_errors = 0;
        recovered
    }

    /// Classify the current count against [`ERROR_THRESHOLD`].
    pub fn health(&self) -> Health {
        match self.consecutive_errors {
            0 => Health::Nominal,
            n if n < ERROR_THRESHOLD => Health::Retrying { attempt: n },
            n => Health::Degraded { count: n },
        }
    }
}
