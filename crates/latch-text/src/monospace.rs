use latch_core::{Size, text_scale};
use unicode_segmentation::UnicodeSegmentation;

use crate::{StyledText, TextMeasurer};

/// Fixed-advance text measurement that needs no fonts.
///
/// Every grapheme advances `advance * font_size`; wide clusters (CJK,
/// Hangul, fullwidth forms, emoji) advance twice that. Lines break on `\n`
/// and hard-wrap at the bound's width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance of a narrow grapheme as a fraction of the font size.
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl MonospaceMeasurer {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

fn is_wide(grapheme: &str) -> bool {
    let Some(c) = grapheme.chars().next() else {
        return false;
    };
    let code = c as u32;
    (0x1100..=0x115F).contains(&code)
        || (0x2E80..=0x9FFF).contains(&code)
        || (0xAC00..=0xD7A3).contains(&code)
        || (0xF900..=0xFAFF).contains(&code)
        || (0xFE30..=0xFE6F).contains(&code)
        || (0xFF00..=0xFF60).contains(&code)
        || (0xFFE0..=0xFFE6).contains(&code)
        || (0x1F300..=0x1F9FF).contains(&code)
        || (0x20000..=0x2FFFF).contains(&code)
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &StyledText, max: Size) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let px = text.font_size * text_scale().0;
        let narrow = px * self.advance;

        let mut lines = 1usize;
        let mut line_w = 0.0f32;
        let mut widest = 0.0f32;
        for g in text.text.graphemes(true) {
            if g == "\n" || g == "\r\n" {
                widest = widest.max(line_w);
                line_w = 0.0;
                lines += 1;
                continue;
            }
            let w = if is_wide(g) { narrow * 2.0 } else { narrow };
            if line_w > 0.0 && line_w + w > max.width {
                widest = widest.max(line_w);
                line_w = 0.0;
                lines += 1;
            }
            line_w += w;
        }
        widest = widest.max(line_w);

        if let Some(n) = text.max_lines {
            lines = lines.min(n);
        }
        Size::new(widest, lines as f32 * px * text.line_height).min(max)
    }
}
