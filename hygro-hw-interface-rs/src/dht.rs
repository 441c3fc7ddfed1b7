//! DHT22 adapter for the monitor's [`SensorSource`] seam.
//!
//! The single-wire protocol itself lives in the `dht-sensor` crate. This
//! module only owns the data pin, keeps interrupts off while the frame is
//! clocked in, and maps driver errors onto [`SensorError`].

use dht_sensor::{dht22, DhtError, DhtReading};
use embassy_rp::gpio::OutputOpenDrain;
use embassy_time::Delay;

use hygro::monitor::{Reading, SensorError, SensorSource};

/// DHT22 (AM2302) on an open-drain GPIO with the line idling high.
pub struct Dht22Source {
    pin: OutputOpenDrain<'static>,
    delay: Delay,
}

impl Dht22Source {
    /// Take ownership of the data pin. The pin must already be driven high
    /// (released) so the sensor sees an idle line.
    pub fn new(pin: OutputOpenDrain<'static>) -> Self {
        Self { pin, delay: Delay }
    }
}

impl SensorSource for Dht22Source {
    fn read(&mut self) -> Result<Reading, SensorError> {
        // Bit timings are ~26/70 µs; an interrupt in the middle corrupts the frame.
        let result = cortex_m::interrupt::free(|_| {
            dht22::Reading::read(&mut self.delay, &mut self.pin)
        });

        match result {
            Ok(dht22::Reading {
                temperature,
                relative_humidity,
            }) => Ok(Reading::new(temperature, relative_humidity)),
            Err(e) => Err(map_error(e)),
        }
    }
}

fn map_error<E>(error: DhtError<E>) -> SensorError {
    match error {
        DhtError::PinError(_) => SensorError::Bus,
        DhtError::ChecksumMismatch => SensorError::ChecksumMismatch,
        DhtError::Timeout => SensorError::Timeout,
    }
}
