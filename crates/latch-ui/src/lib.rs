//! Button layout engine: state-keyed content, a measure pass and a layout
//! pass that positions five visual parts.

pub mod bitmap;
pub mod button;
pub mod error;
pub mod pair;
pub mod style;

pub use bitmap::{Image, ImageProvider};
pub use button::{ButtonNode, ButtonPart};
pub use error::{Error, Result};
pub use pair::StatePair;
pub use style::{ButtonStyle, HorizontalAlignment, Orientation};
