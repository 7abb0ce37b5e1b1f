//! Shared value types for the gallery workspace.
//!
//! Everything here is plain `Copy` data with no behavior beyond trivial
//! helpers, so every crate can depend on it without pulling in the engine.

mod types;

pub use types::{Axis, CameraParams, PixelRect, Screen, TextureId};
