//! [`OutputSink`] backed by the OLED panel and `defmt`.

use embedded_hal::i2c::I2c;
use hygro::monitor::OutputSink;

use crate::driver::OledDriver;
use crate::layout::{render_lines, DisplayConfig};

/// Sends monitor views to the OLED and log lines to `defmt`.
///
/// Every [`render`](OutputSink::render) is a full repaint: the frame buffer
/// is cleared, all lines are drawn, and the whole frame is flushed. Draw and
/// flush failures are logged and dropped so the poll loop keeps running;
/// the next cycle repaints from scratch anyway.
pub struct OledSink<I2C> {
    driver: OledDriver<I2C>,
    config: DisplayConfig,
}

impl<I2C> OledSink<I2C>
where
    I2C: I2c,
{
    /// Wrap an already initialised driver.
    pub fn new(driver: OledDriver<I2C>, config: DisplayConfig) -> Self {
        Self { driver, config }
    }

    pub fn driver_mut(&mut self) -> &mut OledDriver<I2C> {
        &mut self.driver
    }

    pub fn into_driver(self) -> OledDriver<I2C> {
        self.driver
    }
}

impl<I2C> OutputSink for OledSink<I2C>
where
    I2C: I2c,
{
    fn render(&mut self, lines: &[&str]) {
        self.driver.clear_buffer();

        let Some(display) = self.driver.display_mut() else {
            #[cfg(feature = "defmt")]
            defmt::error!("Render skipped: OLED not initialised");
            return;
        };

        if let Err(_e) = render_lines(display, lines, &self.config) {
            #[cfg(feature = "defmt")]
            defmt::error!("Render failed");
            return;
        }

        if let Err(_e) = self.driver.flush() {
            #[cfg(feature = "defmt")]
            defmt::error!("Flush failed: {}", _e);
        }
    }

    fn log(&mut self, _line: &str) {
        #[cfg(feature = "defmt")]
        defmt::info!("{=str}", _line);
    }
}
