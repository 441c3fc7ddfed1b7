use core::fmt;

/// Reasons a single sensor poll can fail.
///
/// Every variant is treated as recoverable by the monitor: the next poll is
/// attempted at the normal cadence regardless of which one occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The sensor did not answer the start signal, or a level change never
    /// arrived while clocking in data bits.
    Timeout,
    /// The checksum byte did not match the four data bytes.
    ChecksumMismatch,
    /// The data pin itself reported an error.
    Bus,
    /// A frame was received but decoded to the NaN sentinel.
    InvalidReading,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensorError::Timeout => write!(f, "timeout"),
            SensorError::ChecksumMismatch => write!(f, "checksum mismatch"),
            SensorError::Bus => write!(f, "pin error"),
            SensorError::InvalidReading => write!(f, "invalid reading"),
        }
    }
}
