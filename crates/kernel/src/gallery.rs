use gallery_common::{CameraParams, Screen};
use glam::Vec2;

use crate::config::GalleryConfig;
use crate::events::{GalleryEvent, ViewMode};
use crate::layout::LayoutSource;
use crate::scroll::{Direction, ScrollAxis};
use crate::tile::{GallerySpan, ScrollFrame, TileProjection, TileSet, Wrap};
use crate::viewport::ViewportMapper;

/// The whole scroll engine: two axes, the tile set and the detail toggle.
///
/// Input handlers only move targets and pointer bookkeeping. Visible state
/// changes happen in [`Gallery::update`], once per frame. Nothing is placed
/// until the first [`Gallery::resize`].
#[derive(Debug, Clone)]
pub struct Gallery {
    config: GalleryConfig,
    mapper: Option<ViewportMapper>,
    x: ScrollAxis,
    y: ScrollAxis,
    tiles: TileSet,
    mode: ViewMode,
    /// Vertical pixel translation applied while in detail mode.
    detail_offset: f32,
    /// Tile under the pointer when it went down.
    pressed: Option<usize>,
    hovered: Option<usize>,
    frame: u64,
    event_log: Vec<GalleryEvent>,
}

impl Gallery {
    /// One tile per media source.
    pub fn new(config: GalleryConfig, tile_count: usize) -> Self {
        Self {
            config,
            mapper: None,
            x: ScrollAxis::new(config.scroll),
            y: ScrollAxis::new(config.scroll),
            tiles: TileSet::new(tile_count),
            mode: ViewMode::Overview,
            detail_offset: 0.0,
            pressed: None,
            hovered: None,
            frame: 0,
            event_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Mapper of the current resize epoch, `None` before the first resize.
    pub fn mapper(&self) -> Option<&ViewportMapper> {
        self.mapper.as_ref()
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn axis_x(&self) -> &ScrollAxis {
        &self.x
    }

    pub fn axis_y(&self) -> &ScrollAxis {
        &self.y
    }

    /// Smoothed scroll offset in pixels.
    pub fn scroll(&self) -> Vec2 {
        Vec2::new(self.x.current(), self.y.current())
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn detail_offset(&self) -> f32 {
        self.detail_offset
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Number of updates that actually ran.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn events(&self) -> &[GalleryEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GalleryEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Adopt a new screen size. Authoritative: re-measures every tile and
    /// clears all wrap offsets regardless of any drag in progress.
    ///
    /// `screen` must have positive dimensions.
    pub fn resize(&mut self, screen: Screen, camera: CameraParams, layout: &mut dyn LayoutSource) {
        let _span = tracing::debug_span!("gallery_resize").entered();
        let mapper = ViewportMapper::new(screen, camera);
        layout.relayout(screen);

        // Detail mode is re-derived from the fresh layout below.
        self.detail_offset = 0.0;
        let frame = self.scroll_frame();
        let span = self.tiles.relayout(&mapper, layout, &frame);
        self.mapper = Some(mapper);

        tracing::debug!(
            width = screen.width,
            height = screen.height,
            span_w = span.width,
            span_h = span.height,
            "gallery resized"
        );
        self.event_log.push(GalleryEvent::Resized {
            screen,
            viewport: mapper.viewport(),
            span,
        });

        if let ViewMode::Detail { tile } = self.mode {
            self.recenter(tile);
        }
    }

    /// Pointer or touch went down at screen pixel `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.x.press(x);
        self.y.press(y);
        self.pressed = self.hit_test(x, y);
        self.hovered = self.pressed;
    }

    /// Pointer or touch moved. Drags when pressed, always refreshes hover.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.x.drag(x);
        self.y.drag(y);
        self.hovered = self.hit_test(x, y);
    }

    /// Pointer or touch released. Toggles the view mode when the release lands
    /// on the same tile the press did. Returns whether the mode changed.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.x.release();
        self.y.release();

        let released = self.hit_test(x, y);
        let pressed = self.pressed.take();
        match (pressed, released) {
            (Some(down), Some(up)) if down == up => {
                self.toggle(up);
                true
            }
            _ => false,
        }
    }

    /// Normalized wheel delta in pixels. Scrolls vertically.
    pub fn wheel(&mut self, delta_y: f32) {
        self.y.wheel(delta_y);
    }

    /// Advance one frame: ease both axes, place every tile, wrap the ones that
    /// left the view. A no-op until the first resize.
    pub fn update(&mut self) {
        let Some(mapper) = self.mapper else {
            tracing::trace!("update before first resize, skipping");
            return;
        };
        self.frame += 1;
        let _span = tracing::trace_span!("gallery_update", frame = self.frame).entered();

        self.x.update();
        self.y.update();

        let frame = self.scroll_frame();
        let wraps = self.tiles.update(&mapper, &frame);
        self.log_wraps(wraps);
    }

    /// Read-only projection of every placed tile.
    pub fn projections(&self) -> impl Iterator<Item = TileProjection> + '_ {
        self.tiles.projections()
    }

    /// Tile under a screen pixel, using the positions of the last frame.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        let mapper = self.mapper.as_ref()?;
        self.tiles.hit_test(mapper.pointer_to_viewport(x, y))
    }

    pub fn span(&self) -> Option<GallerySpan> {
        self.tiles.span()
    }

    pub fn summary(&self) -> GallerySummary {
        GallerySummary {
            frame: self.frame,
            scroll: self.scroll(),
            target: Vec2::new(self.x.target(), self.y.target()),
            direction_x: self.x.direction(),
            direction_y: self.y.direction(),
            mode: self.mode,
            tile_count: self.tiles.len(),
            placed: self.tiles.projections().count(),
            pending_events: self.event_log.len(),
        }
    }

    fn scroll_frame(&self) -> ScrollFrame {
        ScrollFrame {
            scroll: self.scroll(),
            direction_x: self.x.direction(),
            direction_y: self.y.direction(),
            offset_y: self.detail_offset,
        }
    }

    fn toggle(&mut self, tile: usize) {
        self.mode = match self.mode {
            ViewMode::Overview => {
                self.recenter(tile);
                ViewMode::Detail { tile }
            }
            ViewMode::Detail { .. } => {
                self.shift_to(0.0);
                ViewMode::Overview
            }
        };
        tracing::info!(mode = ?self.mode, offset = self.detail_offset, "view mode changed");
        self.event_log.push(GalleryEvent::ModeChanged {
            frame: self.frame,
            mode: self.mode,
        });
    }

    /// Shift the gallery so `tile` sits at the vertical screen center.
    fn recenter(&mut self, tile: usize) {
        let (Some(mapper), Some(t)) = (self.mapper, self.tiles.get(tile)) else {
            return;
        };
        if t.bounds().is_none() {
            return;
        }
        // Positive y is above center; pushing content down by that many pixels centers it.
        let offset = self.detail_offset + mapper.to_pixels_y(t.position().y);
        self.shift_to(offset);
    }

    /// Jump the detail offset. The jump is not eased, so the band it exposes
    /// is filled by wrapping right away instead of on the next scroll.
    fn shift_to(&mut self, offset: f32) {
        // Content moving down looks like scrolling back.
        let heading = if offset > self.detail_offset {
            Direction::Decreasing
        } else if offset < self.detail_offset {
            Direction::Increasing
        } else {
            return;
        };
        self.detail_offset = offset;
        let Some(mapper) = self.mapper else {
            return;
        };
        let frame = self.scroll_frame();
        let wraps = self.tiles.refill(&mapper, &frame, heading);
        self.log_wraps(wraps);
    }

    fn log_wraps(&mut self, wraps: Vec<Wrap>) {
        for wrap in wraps {
            tracing::trace!(tile = wrap.tile, axis = %wrap.axis, delta = wrap.delta, "tile wrapped");
            self.event_log.push(GalleryEvent::Wrapped {
                frame: self.frame,
                tile: wrap.tile,
                axis: wrap.axis,
                delta: wrap.delta,
            });
        }
    }
}

/// Snapshot of engine state for overlays and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySummary {
    pub frame: u64,
    pub scroll: Vec2,
    pub target: Vec2,
    pub direction_x: Direction,
    pub direction_y: Direction,
    pub mode: ViewMode,
    pub tile_count: usize,
    pub placed: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for GallerySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gallery: frame={} scroll=({:.1}, {:.1}) target=({:.1}, {:.1}) dir=({:?}, {:?}) mode={:?} tiles={}/{} pending_events={}",
            self.frame,
            self.scroll.x,
            self.scroll.y,
            self.target.x,
            self.target.y,
            self.direction_x,
            self.direction_y,
            self.mode,
            self.placed,
            self.tile_count,
            self.pending_events
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GalleryExtent;
    use crate::layout::fixed::FixedLayout;
    use crate::scroll::ScrollConfig;
    use gallery_common::{Axis, PixelRect};

    const SCREEN: Screen = Screen {
        width: 1920.0,
        height: 1080.0,
    };

    /// Three columns of 400px tiles, four rows, 100px gaps.
    fn grid_layout() -> FixedLayout {
        let mut rects = Vec::new();
        for i in 0..12 {
            let col = (i % 3) as f32;
            let row = (i / 3) as f32;
            rects.push(Some(PixelRect::new(row * 500.0, col * 500.0, 400.0, 400.0)));
        }
        FixedLayout {
            rects,
            extent: GalleryExtent {
                height: 4.0 * 500.0,
                content_width: 3.0 * 500.0 + 1000.0,
            },
        }
    }

    fn gallery(ease: f32) -> (Gallery, FixedLayout) {
        let config = GalleryConfig {
            scroll: ScrollConfig {
                ease,
                ..ScrollConfig::default()
            },
            ..GalleryConfig::default()
        };
        let mut layout = grid_layout();
        let mut g = Gallery::new(config, 12);
        g.resize(SCREEN, CameraParams::default(), &mut layout);
        (g, layout)
    }

    fn wraps(g: &Gallery) -> Vec<(usize, Axis, f32)> {
        g.events()
            .iter()
            .filter_map(|e| match e {
                GalleryEvent::Wrapped {
                    tile, axis, delta, ..
                } => Some((*tile, *axis, *delta)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn update_before_resize_does_nothing() {
        let mut g = Gallery::new(GalleryConfig::default(), 4);
        g.wheel(500.0);
        g.update();
        assert_eq!(g.frame(), 0);
        assert_eq!(g.scroll(), Vec2::ZERO);
        assert_eq!(g.projections().count(), 0);
        assert!(g.hit_test(10.0, 10.0).is_none());
    }

    #[test]
    fn resize_logs_event_and_places_tiles() {
        let (g, _) = gallery(0.1);
        assert_eq!(g.projections().count(), 12);
        assert!(matches!(g.events()[0], GalleryEvent::Resized { .. }));
        assert!(g.span().is_some());
    }

    #[test]
    fn resize_is_idempotent() {
        let (mut g, mut layout) = gallery(1.0);
        g.wheel(300.0);
        for _ in 0..3 {
            g.update();
        }

        g.resize(SCREEN, CameraParams::default(), &mut layout);
        let first: Vec<_> = g.tiles().tiles().to_vec();
        let first_span = g.span();

        g.resize(SCREEN, CameraParams::default(), &mut layout);
        assert_eq!(g.tiles().tiles(), &first[..]);
        assert_eq!(g.span(), first_span);
        assert!(g.tiles().tiles().iter().all(|t| t.extra_offset() == Vec2::ZERO));
    }

    #[test]
    fn resize_clears_wrap_offsets_mid_drag() {
        let (mut g, mut layout) = gallery(1.0);
        g.pointer_down(960.0, 900.0);
        g.pointer_move(960.0, 100.0);
        for _ in 0..2 {
            g.update();
        }
        assert!(!wraps(&g).is_empty());

        g.resize(Screen::new(1280.0, 720.0), CameraParams::default(), &mut layout);
        assert!(g.tiles().tiles().iter().all(|t| t.extra_offset() == Vec2::ZERO));
        assert!(g.axis_y().is_dragging());
    }

    #[test]
    fn wheel_scrolls_and_wraps_vertically() {
        let (mut g, _) = gallery(0.1);
        for _ in 0..200 {
            g.wheel(40.0);
            g.update();
        }
        let w = wraps(&g);
        assert!(!w.is_empty());
        let span = g.span().unwrap();
        for (_, axis, delta) in &w {
            assert_eq!(*axis, Axis::Y);
            assert!((delta + span.height).abs() < 1e-4);
        }
    }

    #[test]
    fn at_most_one_wrap_per_tile_axis_frame() {
        let (mut g, _) = gallery(0.3);
        g.pointer_down(1000.0, 1000.0);
        for step in 0..120 {
            g.pointer_move(1000.0 - step as f32 * 8.0, 1000.0 - step as f32 * 8.0);
            g.update();
        }

        let mut seen = std::collections::HashSet::new();
        for e in g.events() {
            if let GalleryEvent::Wrapped {
                frame, tile, axis, ..
            } = e
            {
                assert!(seen.insert((*frame, *tile, *axis)), "double wrap");
            }
        }
        assert!(!seen.is_empty());
    }

    #[test]
    fn click_on_same_tile_toggles_detail() {
        let (mut g, _) = gallery(0.1);
        g.update();

        // Tile 4 is the middle of the second row: rect (500, 500, 400, 400).
        let (x, y) = (700.0, 700.0);
        assert_eq!(g.hit_test(x, y), Some(4));

        g.pointer_down(x, y);
        assert!(g.pointer_up(x, y));
        assert_eq!(g.mode(), ViewMode::Detail { tile: 4 });

        // Center y of tile 4 is 700px; screen center is 540px.
        assert!((g.detail_offset() + 160.0).abs() < 1e-2, "{}", g.detail_offset());
        g.update();
        let centered = g.tiles().get(4).unwrap().position().y;
        assert!(centered.abs() < 1e-3, "{centered}");

        // Any same-tile click returns to the overview.
        let (x, y) = (100.0, 100.0);
        let hit = g.hit_test(x, y);
        assert!(hit.is_some());
        g.pointer_down(x, y);
        assert!(g.pointer_up(x, y));
        assert_eq!(g.mode(), ViewMode::Overview);
        assert_eq!(g.detail_offset(), 0.0);
    }

    #[test]
    fn resize_in_detail_keeps_tile_centered() {
        let (mut g, mut layout) = gallery(0.1);
        g.update();
        g.pointer_down(700.0, 700.0);
        assert!(g.pointer_up(700.0, 700.0));
        g.update();
        assert!(g.tiles().get(4).unwrap().position().y.abs() < 1e-3);

        g.resize(SCREEN, CameraParams::default(), &mut layout);
        assert!((g.detail_offset() + 160.0).abs() < 1e-2, "{}", g.detail_offset());
        g.update();
        let y = g.tiles().get(4).unwrap().position().y;
        assert!(y.abs() < 1e-3, "tile 4 at {y} after resize");

        // A different screen still centers the selected tile.
        g.resize(Screen::new(1280.0, 720.0), CameraParams::default(), &mut layout);
        g.update();
        let y = g.tiles().get(4).unwrap().position().y;
        assert!(y.abs() < 1e-3, "tile 4 at {y} after shrink");
        assert_eq!(g.mode(), ViewMode::Detail { tile: 4 });
    }

    #[test]
    fn entering_detail_fills_the_exposed_band() {
        let (mut g, _) = gallery(0.1);
        g.update();
        g.drain_events();
        // Tile 1 sits in the top row, 0..400px, so centering pushes content
        // 340px down and uncovers the top of the screen.
        assert_eq!(g.hit_test(700.0, 100.0), Some(1));
        g.pointer_down(700.0, 200.0);
        assert!(g.pointer_up(700.0, 200.0));
        assert!((g.detail_offset() - 340.0).abs() < 1e-2);

        // The bottom row comes around a span early to fill it.
        let span = g.span().unwrap().height;
        let mut w = wraps(&g);
        w.sort_by_key(|(tile, _, _)| *tile);
        let tiles: Vec<usize> = w.iter().map(|(t, _, _)| *t).collect();
        assert_eq!(tiles, vec![9, 10, 11]);
        for (_, axis, delta) in &w {
            assert_eq!(*axis, Axis::Y);
            assert!((delta - span).abs() < 1e-4);
        }
        assert_eq!(g.hit_test(700.0, 100.0), Some(10));

        // Nothing bounces back on a still frame.
        g.drain_events();
        g.update();
        assert!(wraps(&g).is_empty());
        assert_eq!(g.hit_test(700.0, 100.0), Some(10));
    }

    #[test]
    fn press_and_release_on_different_tiles_is_not_a_click() {
        let (mut g, _) = gallery(0.1);
        g.update();
        g.pointer_down(100.0, 100.0);
        assert!(!g.pointer_up(700.0, 700.0));
        assert_eq!(g.mode(), ViewMode::Overview);
    }

    #[test]
    fn release_on_empty_space_is_not_a_click() {
        let (mut g, _) = gallery(0.1);
        g.update();
        // The gap between columns.
        g.pointer_down(450.0, 100.0);
        assert!(!g.pointer_up(450.0, 100.0));
        assert_eq!(g.mode(), ViewMode::Overview);
    }

    #[test]
    fn drag_targets_match_multiplier() {
        let (mut g, _) = gallery(0.1);
        g.pointer_down(500.0, 500.0);
        g.pointer_move(480.0, 450.0);
        g.pointer_up(480.0, 450.0);
        assert_eq!(g.axis_x().target(), 60.0);
        assert_eq!(g.axis_y().target(), 150.0);
    }

    #[test]
    fn drain_events_clears_log() {
        let (mut g, _) = gallery(0.1);
        let events = g.drain_events();
        assert_eq!(events.len(), 1);
        assert!(g.events().is_empty());
    }

    #[test]
    fn summary_display() {
        let (g, _) = gallery(0.1);
        let s = format!("{}", g.summary());
        assert!(s.contains("frame=0"));
        assert!(s.contains("tiles=12/12"));
    }
}
