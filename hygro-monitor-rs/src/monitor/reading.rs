/// One humidity/temperature measurement.
///
/// Produced fresh by every successful poll and discarded once it has been
/// rendered and logged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity in percent.
    pub humidity_pct: f32,
}

impl Reading {
    pub const fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
        }
    }

    /// Returns `false` if either field carries the NaN sentinel that sensor
    /// drivers use for an unreadable measurement.
    pub fn is_valid(&self) -> bool {
        !self.temperature_c.is_nan() && !self.humidity_pct.is_nan()
    }
}
