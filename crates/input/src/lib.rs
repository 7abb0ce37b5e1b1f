//! Input: pointer, touch and wheel events normalized for the gallery engine.
//!
//! # Invariants
//! - Mouse and touch produce the same event stream.
//! - Wheel deltas reach the engine in pixels, whatever the device reports.
//! - Events only mutate engine targets; nothing is placed until the next frame.

pub mod event;
pub mod wheel;

pub use event::{InputEvent, TouchPhase, TouchTracker};
pub use wheel::WheelDelta;

pub fn crate_info() -> &'static str {
    "gallery-input v0.1.0"
}
