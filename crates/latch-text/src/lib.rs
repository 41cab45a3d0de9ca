//! Styled text values and the measurement seam used by layout.
//!
//! Layout never shapes text itself: it hands a `StyledText` and a bounding
//! size to a `TextMeasurer` and keeps the returned size. Two measurers ship
//! here: `CosmicMeasurer` shapes with real fonts, `MonospaceMeasurer` is a
//! headless fixed‑advance approximation.

mod cosmic;
mod monospace;

pub use cosmic::CosmicMeasurer;
pub use monospace::MonospaceMeasurer;

use latch_core::{Color, Size};

/// Default line height as a multiple of the font size.
pub const DEFAULT_LINE_HEIGHT: f32 = 1.3;

/// A run of text with a single style. Compared by value.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledText {
    pub text: String,
    /// Font size in logical units, before `TextScale` is applied.
    pub font_size: f32,
    pub color: Color,
    /// Line height as a multiple of `font_size`.
    pub line_height: f32,
    pub max_lines: Option<usize>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 16.0,
            color: Color::WHITE,
            line_height: DEFAULT_LINE_HEIGHT,
            max_lines: None,
        }
    }

    pub fn styled(text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self::new(text).size(font_size).color(color)
    }

    pub fn size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn color(mut self, c: Color) -> Self {
        self.color = c;
        self
    }

    pub fn line_height(mut self, factor: f32) -> Self {
        self.line_height = factor;
        self
    }

    pub fn max_lines(mut self, n: usize) -> Self {
        self.max_lines = Some(n);
        self
    }

    pub fn single_line(self) -> Self {
        self.max_lines(1)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for StyledText {
    fn from(s: &str) -> Self {
        StyledText::new(s)
    }
}

impl From<String> for StyledText {
    fn from(s: String) -> Self {
        StyledText::new(s)
    }
}

/// Measures rendered text under a bounding size.
///
/// Implementations must be deterministic for a given text and bound, and the
/// result must not exceed `max` on either axis. Empty text measures as zero.
pub trait TextMeasurer {
    fn measure(&self, text: &StyledText, max: Size) -> Size;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &StyledText, max: Size) -> Size {
        (**self).measure(text, max)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for std::rc::Rc<M> {
    fn measure(&self, text: &StyledText, max: Size) -> Size {
        (**self).measure(text, max)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&self, text: &StyledText, max: Size) -> Size {
        (**self).measure(text, max)
    }
}
