use unicode_width::UnicodeWidthStr;

/// Fixed-pitch text measurement used for text runs.
///
/// Every display column is `char_width` pixels wide and every run occupies one
/// line of `line_height` pixels. Wide glyphs (CJK, emoji) count as two columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
        }
    }
}

impl TextMetrics {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    pub fn width(&self, text: &str) -> f32 {
        text.width() as f32 * self.char_width
    }

    pub fn height(&self, text: &str) -> f32 {
        if text.is_empty() {
            0.0
        } else {
            self.line_height
        }
    }
}
