use gallery_common::{Axis, PixelRect};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::layout::{GalleryExtent, LayoutSource};
use crate::scroll::Direction;
use crate::viewport::ViewportMapper;

/// Camera-unit length of one repeat period of the grid on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GallerySpan {
    pub width: f32,
    pub height: f32,
}

impl GallerySpan {
    pub fn measure(mapper: &ViewportMapper, extent: GalleryExtent) -> Self {
        Self {
            width: mapper.to_viewport_x(extent.content_width),
            height: mapper.to_viewport_y(extent.height),
        }
    }

    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Scroll state sampled once per frame and handed to every tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollFrame {
    /// Smoothed scroll offset in pixels.
    pub scroll: Vec2,
    pub direction_x: Direction,
    pub direction_y: Direction,
    /// Extra vertical pixel translation of the whole gallery (detail view).
    pub offset_y: f32,
}

/// What the renderer gets for one tile: center and size on the tile plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileProjection {
    pub index: usize,
    pub position: Vec2,
    pub scale: Vec2,
}

/// A tile jumped by one span on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wrap {
    pub tile: usize,
    pub axis: Axis,
    /// Signed camera-unit jump, always plus or minus one span.
    pub delta: f32,
}

/// One media item placed on the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    index: usize,
    /// Layout rectangle with the scroll at measure time folded back in.
    bounds: Option<PixelRect>,
    /// Accumulated wrap correction in camera units.
    extra: Vec2,
    position: Vec2,
    scale: Vec2,
}

impl Tile {
    fn new(index: usize) -> Self {
        Self {
            index,
            bounds: None,
            extra: Vec2::ZERO,
            position: Vec2::ZERO,
            scale: Vec2::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bounds(&self) -> Option<PixelRect> {
        self.bounds
    }

    pub fn extra_offset(&self) -> Vec2 {
        self.extra
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// `None` when the layout never placed this tile.
    pub fn projection(&self) -> Option<TileProjection> {
        self.bounds.map(|_| TileProjection {
            index: self.index,
            position: self.position,
            scale: self.scale,
        })
    }

    fn contains(&self, point: Vec2) -> bool {
        let half = self.scale / 2.0;
        let d = (point - self.position).abs();
        d.x <= half.x && d.y <= half.y
    }

    fn place(&mut self, mapper: &ViewportMapper, frame: &ScrollFrame) {
        let Some(b) = self.bounds else {
            return;
        };
        let half_vp = mapper.viewport().half();
        self.scale = mapper.scale_of(&b);
        self.position.x = -half_vp.x
            + self.scale.x / 2.0
            + mapper.to_viewport_x(b.left - frame.scroll.x)
            + self.extra.x;
        self.position.y = half_vp.y
            - self.scale.y / 2.0
            - mapper.to_viewport_y(b.top + frame.offset_y - frame.scroll.y)
            + self.extra.y;
    }

    /// Jump needed on each axis to bring a fully hidden tile back around.
    ///
    /// Increasing vertical scroll moves content up, so the tile leaves past the
    /// top edge; increasing horizontal scroll moves content left.
    fn wrap_step(&self, half_vp: Vec2, span: GallerySpan, frame: &ScrollFrame) -> Vec2 {
        let half = self.scale / 2.0;
        let p = self.position;

        let dx = match frame.direction_x {
            Direction::Increasing if p.x + half.x < -half_vp.x => span.width,
            Direction::Decreasing if p.x - half.x > half_vp.x => -span.width,
            _ => 0.0,
        };
        let dy = match frame.direction_y {
            Direction::Decreasing if p.y + half.y < -half_vp.y => span.height,
            Direction::Increasing if p.y - half.y > half_vp.y => -span.height,
            _ => 0.0,
        };
        Vec2::new(dx, dy)
    }

    fn overlaps_view_y(&self, half_vp: Vec2) -> bool {
        self.position.y.abs() - self.scale.y / 2.0 < half_vp.y
    }
}

/// Every tile of the gallery plus the current wrap period.
///
/// Wrapping assumes a single frame never scrolls further than one span. Very
/// large input (a huge synthetic wheel delta) can carry a tile past the
/// boundary in one frame; it is then corrected one span per frame, which shows
/// as a visible jump. No clamp is applied.
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
    span: Option<GallerySpan>,
}

impl TileSet {
    pub fn new(count: usize) -> Self {
        Self {
            tiles: (0..count).map(Tile::new).collect(),
            span: None,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// `None` until the first relayout.
    pub fn span(&self) -> Option<GallerySpan> {
        self.span
    }

    /// Re-measure every tile against a fresh layout.
    ///
    /// Wrap offsets from the previous layout are meaningless afterwards and are
    /// cleared. Tiles the layout does not place are left without bounds.
    pub fn relayout(
        &mut self,
        mapper: &ViewportMapper,
        layout: &dyn LayoutSource,
        frame: &ScrollFrame,
    ) -> GallerySpan {
        let span = GallerySpan::measure(mapper, layout.extent());
        self.span = Some(span);

        for tile in &mut self.tiles {
            tile.bounds = layout
                .tile_rect(tile.index)
                .map(|r| r.translated(frame.scroll.x, frame.scroll.y));
            tile.extra = Vec2::ZERO;
            if tile.bounds.is_none() {
                tracing::debug!(tile = tile.index, "tile has no layout, skipping");
            }
            tile.place(mapper, frame);
        }
        span
    }

    /// Place every tile for this frame and wrap the ones that left the view.
    ///
    /// Does nothing before the first relayout. Returns the wraps applied.
    pub fn update(&mut self, mapper: &ViewportMapper, frame: &ScrollFrame) -> Vec<Wrap> {
        let Some(span) = self.span else {
            return Vec::new();
        };
        let half_vp = mapper.viewport().half();
        let mut wraps = Vec::new();

        for tile in &mut self.tiles {
            if tile.bounds.is_none() {
                continue;
            }
            tile.place(mapper, frame);

            let step = tile.wrap_step(half_vp, span, frame);
            if step == Vec2::ZERO {
                continue;
            }
            tile.extra += step;
            tile.place(mapper, frame);

            if step.x != 0.0 {
                wraps.push(Wrap {
                    tile: tile.index,
                    axis: Axis::X,
                    delta: step.x,
                });
            }
            if step.y != 0.0 {
                wraps.push(Wrap {
                    tile: tile.index,
                    axis: Axis::Y,
                    delta: step.y,
                });
            }
        }
        wraps
    }

    /// Vertical wrap pass after an instant jump of `frame.offset_y`.
    ///
    /// `heading` is the way the content moved, expressed as the scroll
    /// direction that would have moved it the same way. A hidden tile is only
    /// wrapped when that brings it back into view, so the band the jump
    /// exposed fills in and nothing bounces against the scroll heading later.
    pub fn refill(
        &mut self,
        mapper: &ViewportMapper,
        frame: &ScrollFrame,
        heading: Direction,
    ) -> Vec<Wrap> {
        let Some(span) = self.span else {
            return Vec::new();
        };
        let half_vp = mapper.viewport().half();
        let shifted = ScrollFrame {
            direction_x: Direction::Unchanged,
            direction_y: heading,
            ..*frame
        };
        let mut wraps = Vec::new();

        for tile in &mut self.tiles {
            if tile.bounds.is_none() {
                continue;
            }
            tile.place(mapper, frame);

            let dy = tile.wrap_step(half_vp, span, &shifted).y;
            if dy == 0.0 {
                continue;
            }
            tile.extra.y += dy;
            tile.place(mapper, frame);
            if tile.overlaps_view_y(half_vp) {
                wraps.push(Wrap {
                    tile: tile.index,
                    axis: Axis::Y,
                    delta: dy,
                });
            } else {
                tile.extra.y -= dy;
                tile.place(mapper, frame);
            }
        }
        wraps
    }

    /// Projections of every placed tile, in index order.
    pub fn projections(&self) -> impl Iterator<Item = TileProjection> + '_ {
        self.tiles.iter().filter_map(Tile::projection)
    }

    /// First placed tile under a point on the tile plane.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        self.tiles
            .iter()
            .filter(|t| t.bounds.is_some())
            .find(|t| t.contains(point))
            .map(|t| t.index)
    }
}
