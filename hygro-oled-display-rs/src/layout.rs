//! Text layout for the monitor views.
//!
//! [`render_lines`] draws a list of text rows top-down with `FONT_6X9`, one
//! row per [`DisplayConfig::line_height`] pixels. Rows that would not fit the
//! panel are dropped rather than clipped mid-glyph.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X9, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Layout geometry for the text views.
///
/// [`DisplayConfig::default()`] matches the 128×64 SSD1306 panel: seven
/// 9 px rows of 21 glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Total display width in pixels. Default: 128.
    pub display_width: u32,
    /// Total display height in pixels. Default: 64.
    pub display_height: u32,
    /// Vertical distance between rows in pixels. Default: 9.
    pub line_height: u32,
    /// X coordinate of the first glyph column. Default: 0.
    pub left_margin: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            display_width: 128,
            display_height: 64,
            line_height: 9,
            left_margin: 0,
        }
    }
}

impl DisplayConfig {
    /// Number of whole rows that fit on the panel.
    pub fn max_lines(&self) -> usize {
        if self.line_height == 0 {
            return 0;
        }
        (self.display_height / self.line_height) as usize
    }

    /// Number of whole glyphs that fit on one row.
    pub fn max_columns(&self) -> usize {
        let usable = self.display_width.saturating_sub(self.left_margin.max(0) as u32);
        (usable / FONT_6X9.character_size.width) as usize
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Draw `lines` top to bottom. Empty strings leave a blank row.
///
/// Returns the number of rows drawn, which is less than `lines.len()` when
/// the view has more rows than [`DisplayConfig::max_lines()`].
///
/// # Layout
///
/// ```text
/// ┌────────────────────────────┐
/// │Temp: 21.5 C                │  ← row 0, y = 0
/// │Humidity: 60.0 %            │  ← row 1, y = line_height
/// │                            │
/// │Status: OK                  │
/// └────────────────────────────┘
/// ```
pub fn render_lines<D>(
    display: &mut D,
    lines: &[&str],
    config: &DisplayConfig,
) -> Result<usize, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let text_style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
    let visible = lines.len().min(config.max_lines());

    for (row, line) in lines.iter().take(visible).enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = (row as u32 * config.line_height) as i32;
        Text::with_baseline(line, Point::new(config.left_margin, y), text_style, Baseline::Top)
            .draw(display)?;
    }

    Ok(visible)
}

// ── Tests ────────────────────────────────────────────────────────────────
