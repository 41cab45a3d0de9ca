//! # Core types
//!
//! Plain value types shared by the text and ui crates:
//!
//! - `Size`, `Rect`, `Vec2`, `EdgeInsets` — layout geometry in logical units.
//! - `Color` — 8‑bit RGBA.
//! - `ControlState` / `StateSlot` — how state‑keyed properties are addressed.
//! - `TextScale` — a composition local read during text measurement.
//!
//! Geometry types derive `serde` traits when the `serde` feature is on.

pub mod color;
pub mod geometry;
pub mod locals;
pub mod state;

pub use color::*;
pub use geometry::*;
pub use locals::*;
pub use state::*;
