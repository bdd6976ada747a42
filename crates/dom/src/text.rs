/// Abstracts text measurement for canvas contexts.
pub trait TextMeasurer {
    /// Return the advance width of `text` in CSS px when drawn with the CSS
    /// `font` shorthand (e.g. `"16px sans-serif"`).
    fn measure(&self, text: &str, font: &str) -> f32;
}

/// Fixed-advance measurer: every char is `advance_em` times the font size.
///
/// Used when no real font backend is attached; good enough for layout of
/// debug overlays and deterministic in tests.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasurer {
    pub advance_em: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &str) -> f32 {
        text.chars().count() as f32 * font_px(font) * self.advance_em
    }
}

pub const DEFAULT_FONT_PX: f32 = 10.0;

/// Extract the pixel size from a CSS font shorthand; falls back to 10px.
pub fn font_px(font: &str) -> f32 {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px"))
        .and_then(|px| px.parse::<f32>().ok())
        .filter(|px| px.is_finite() && *px > 0.0)
        .unwrap_or(DEFAULT_FONT_PX)
}
