use gallery_common::{PixelRect, Screen};

/// Pixel size of the whole gallery container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GalleryExtent {
    /// Height of one full column stack, including trailing gap.
    pub height: f32,
    /// Width of one full row, including trailing gap.
    pub content_width: f32,
}

/// Where tiles sit on screen before any scrolling.
///
/// Stands in for the document layout: the engine never computes tile
/// placement itself, it only measures it on resize.
pub trait LayoutSource {
    /// Recompute placement for a new screen size.
    fn relayout(&mut self, screen: Screen);

    /// Bounding rectangle of tile `index`, or `None` if it has no layout.
    fn tile_rect(&self, index: usize) -> Option<PixelRect>;

    /// Container measurements used to size one wrap period.
    fn extent(&self) -> GalleryExtent;
}

#[cfg(test)]
pub(crate) mod fixed {
    use super::*;

    /// Hand-placed layout for engine tests.
    #[derive(Debug, Clone, Default)]
    pub struct FixedLayout {
        pub rects: Vec<Option<PixelRect>>,
        pub extent: GalleryExtent,
    }

    impl LayoutSource for FixedLayout {
        fn relayout(&mut self, _screen: Screen) {}

        fn tile_rect(&self, index: usize) -> Option<PixelRect> {
            self.rects.get(index).copied().flatten()
        }

        fn extent(&self) -> GalleryExtent {
            self.extent
        }
    }
}
