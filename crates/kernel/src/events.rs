use gallery_common::{Axis, Screen};
use serde::{Deserialize, Serialize};

use crate::tile::GallerySpan;
use crate::viewport::Viewport;

/// Which presentation the gallery is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Overview,
    /// One tile pulled to the vertical center of the screen.
    Detail { tile: usize },
}

/// A record of every discrete state change in the gallery.
///
/// Per-frame easing is continuous and not logged; only resizes, wraps and mode
/// toggles are. The log makes wrap behavior observable to tests and tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GalleryEvent {
    /// Layout was re-measured for a new screen.
    Resized {
        screen: Screen,
        viewport: Viewport,
        span: GallerySpan,
    },
    /// A tile jumped one span on one axis.
    Wrapped {
        frame: u64,
        tile: usize,
        axis: Axis,
        delta: f32,
    },
    /// Overview/detail toggle after a click on a tile.
    ModeChanged { frame: u64, mode: ViewMode },
}
