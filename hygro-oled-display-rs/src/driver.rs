//! Core OLED driver wrapping the `ssd1306` crate in blocking buffered graphics mode.
//!
//! [`OledDriver`] manages the SSD1306 display lifecycle: construction without
//! I2C traffic, explicit initialisation, and frame buffer flush.

use display_interface_i2c::I2CInterface;
use embedded_hal::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use crate::error::OledError;

/// Standard SSD1306 I2C address.
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Concrete display type used internally by [`OledDriver`].
pub type Display<I2C> = Ssd1306<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Blocking driver for an SSD1306 128×64 OLED display over I2C.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`] — constructs the driver without any I2C traffic.
/// 2. [`OledDriver::init()`] — sends the SSD1306 initialisation sequence.
/// 3. Draw into the frame buffer via [`OledDriver::display_mut()`].
/// 4. [`OledDriver::flush()`] — transfers the frame buffer to hardware.
///
/// # Example
///
/// ```no_run
/// use hygro_oled_display_rs::OledDriver;
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().unwrap();
/// oled.clear_buffer();
/// oled.flush().unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    display: Display<I2C>,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver.
    ///
    /// No I2C traffic is generated. You **must** call [`init()`](Self::init)
    /// before any display operations.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access).
    /// * `address` — 7-bit I2C device address (typically `0x3C` or `0x3D`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self {
            display,
            initialized: false,
        }
    }

    /// Initialise the SSD1306 hardware.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::InitializationFailed`] if the display does not
    /// acknowledge the initialisation sequence.
    pub fn init(&mut self) -> Result<(), OledError> {
        self.display
            .init()
            .map_err(|_| OledError::InitializationFailed)?;
        self.initialized = true;
        Ok(())
    }

    /// Clear the in-memory frame buffer. No I2C traffic.
    pub fn clear_buffer(&mut self) {
        self.display.clear_buffer();
    }

    /// Transfer the frame buffer to the display.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] if [`init()`](Self::init) has
    /// not succeeded, or [`OledError::Display`] on a bus-level failure.
    pub fn flush(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.flush()?;
        Ok(())
    }

    /// Returns the underlying `ssd1306` display for drawing with
    /// `embedded-graphics`, or `None` before a successful `init()`.
    pub fn display_mut(&mut self) -> Option<&mut Display<I2C>> {
        if self.initialized {
            Some(&mut self.display)
        } else {
            None
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
