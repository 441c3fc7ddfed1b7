use embedded_hal::delay::DelayNs;

use super::{Reading, SensorError};

/// Source of humidity/temperature readings.
///
/// Implementations wrap a concrete sensor driver. A driver that signals an
/// unreadable measurement with NaN may return it as an `Ok` reading; the
/// monitor classifies it as a failure.
pub trait SensorSource {
    fn read(&mut self) -> Result<Reading, SensorError>;
}

/// Where the monitor sends its output.
///
/// Both methods are infallible from the monitor's point of view. A sink
/// whose hardware can fail is expected to report that through its own
/// logging and carry on.
pub trait OutputSink {
    /// Replace everything on the display with `lines`, top to bottom.
    fn render(&mut self, lines: &[&str]);

    /// Emit one human-readable log line.
    fn log(&mut self, line: &str);
}

/// Blocking pause between poll cycles.
///
/// Implemented for every [`DelayNs`], so HAL delay providers can be passed
/// straight in.
pub trait Clock {
    fn sleep_ms(&mut self, ms: u32);
}

impl<D: DelayNs> Clock for D {
    fn sleep_ms(&mut self, ms: u32) {
        self.delay_ms(ms);
    }
}
