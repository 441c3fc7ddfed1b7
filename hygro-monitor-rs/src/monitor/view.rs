//! Text views pushed to the display on every poll cycle.
//!
//! A view is turned into at most [`MAX_LINES`] lines, each a fixed-capacity
//! [`heapless::String`], so rendering never allocates. On the 128×64 panel
//! with a 6×9 font that is seven rows of 21 glyphs.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use super::Reading;

/// Maximum number of lines any view produces.
pub const MAX_LINES: usize = 7;

/// Byte capacity of a single line. Leaves headroom past the 21 glyphs the
/// panel shows so a long data-pin label is clipped by the display, not here.
pub const LINE_CAPACITY: usize = 24;

/// Readings at or beyond this magnitude are shown as [`OUT_OF_RANGE`].
const DISPLAY_LIMIT: f32 = 10_000.0;

/// Placeholder for a value too wide for its line.
const OUT_OF_RANGE: &str = "----";

pub type Line = String<LINE_CAPACITY>;
pub type Lines = Vec<Line, MAX_LINES>;

/// What the display shows after one poll.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusView {
    /// A valid reading with an "OK" status line. Values outside
    /// ±10000 print as `----` so the unit still fits on the line.
    Reading(Reading),
    /// A failure below the threshold: retry progress only.
    Retrying { attempt: u8, threshold: u8 },
    /// The threshold has been reached: static wiring checklist.
    Diagnostic { data_pin: &'static str },
}

impl StatusView {
    /// Lay the view out as display lines, top to bottom.
    ///
    /// ```
    /// use hygro::monitor::{Reading, StatusView};
    ///
    /// let lines = StatusView::Reading(Reading::new(21.5, 60.0)).lines();
    /// assert_eq!(lines[0].as_str(), "Temp: 21.5 C");
    /// assert_eq!(lines[3].as_str(), "Status: OK");
    /// ```
    pub fn lines(&self) -> Lines {
        let mut lines = Lines::new();
        match self {
            StatusView::Reading(reading) => {
                let (t, h) = (reading.temperature_c, reading.humidity_pct);
                push_fmt(&mut lines, format_args!("Temp: {} C", OneDecimal(t)));
                push_fmt(&mut lines, format_args!("Humidity: {} %", OneDecimal(h)));
                push_str(&mut lines, "");
                push_str(&mut lines, "Status: OK");
            }
            StatusView::Retrying { attempt, threshold } => {
                push_str(&mut lines, "Sensor Reading...");
                push_str(&mut lines, "Please wait...");
                push_str(&mut lines, "");
                push_fmt(&mut lines, format_args!("Retry: {}/{}", attempt, threshold));
            }
            StatusView::Diagnostic { data_pin } => {
                push_str(&mut lines, "SENSOR ERROR!");
                push_str(&mut lines, "");
                push_str(&mut lines, "Check:");
                push_str(&mut lines, "- GND connection");
                push_str(&mut lines, "- VCC (3.3-5V)");
                push_fmt(&mut lines, format_args!("- DATA pin ({})", data_pin));
                push_str(&mut lines, "- Pull-up resistor");
            }
        }
        lines
    }
}

/// `{:.1}` for values the panel can show, [`OUT_OF_RANGE`] otherwise.
struct OneDecimal(f32);

impl fmt::Display for OneDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.abs() < DISPLAY_LIMIT {
            write!(f, "{:.1}", self.0)
        } else {
            f.write_str(OUT_OF_RANGE)
        }
    }
}

// Lines that overflow LINE_CAPACITY keep whatever fitted.
fn push_fmt(lines: &mut Lines, args: fmt::Arguments) {
    let mut line = Line::new();
    let _ = line.write_fmt(args);
    let _ = lines.push(line);
}

fn push_str(lines: &mut Lines, text: &str) {
    push_fmt(lines, format_args!("{}", text));
}
