use latch_core::EdgeInsets;
use serde::{Deserialize, Serialize};

/// Axis along which the title and image are stacked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Title and image side by side.
    #[default]
    Horizontal,
    /// Image above title.
    Vertical,
}

/// Placement of the content along the horizontal axis. Ignored by vertical
/// layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Layout parameters of a button, loadable from any serde format. Missing
/// fields take their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    pub content_insets: EdgeInsets,
    pub horizontal_alignment: HorizontalAlignment,
    pub orientation: Orientation,
    /// Gap between title and image.
    pub spacing: f32,
}
