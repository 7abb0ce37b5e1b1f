//! Gallery Kernel: the infinite-tiling scroll engine.
//!
//! Maps laid-out tiles from screen pixels onto the camera plane, eases two
//! independent scroll axes toward their input targets, and wraps tiles that
//! leave the view by one gallery span so the grid never ends.
//!
//! # Invariants
//! - Screen and viewport change together, inside one [`ViewportMapper`].
//! - A tile's wrap offset only ever moves by whole spans and is cleared only
//!   by a resize.
//! - At most one wrap per tile per axis per frame.
//! - Input handlers never place tiles; only [`Gallery::update`] does.

pub mod config;
pub mod events;
pub mod gallery;
pub mod layout;
pub mod scroll;
pub mod tile;
pub mod viewport;

pub use config::{ConfigError, GalleryConfig};
pub use events::{GalleryEvent, ViewMode};
pub use gallery::{Gallery, GallerySummary};
pub use layout::{GalleryExtent, LayoutSource};
pub use scroll::{Direction, DragPhase, ScrollAxis, ScrollConfig};
pub use tile::{GallerySpan, ScrollFrame, Tile, TileProjection, TileSet, Wrap};
pub use viewport::{Viewport, ViewportMapper};

pub fn crate_info() -> &'static str {
    "gallery-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
