/// Measures rendered text width so label boxes can be laid out without a
/// font backend.
pub trait TextMetrics {
    fn text_width(&self, text: &str, font_size_px: f64) -> f64;
}

/// Every character advances by a fixed fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    pub advance_ratio: f64,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMetrics for FixedAdvanceMetrics {
    fn text_width(&self, text: &str, font_size_px: f64) -> f64 {
        text.chars().count() as f64 * font_size_px * self.advance_ratio
    }
}
