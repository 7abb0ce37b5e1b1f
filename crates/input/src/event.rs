use gallery_kernel::Gallery;

use crate::wheel::WheelDelta;

/// A backend-independent input event in screen pixels.
///
/// Mouse and touch collapse onto the same down/move/up triple, so the engine
/// never needs to know which device produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Wheel(WheelDelta),
}

impl InputEvent {
    /// Feed this event to the gallery. Returns `true` when it toggled the view mode.
    pub fn apply(self, gallery: &mut Gallery) -> bool {
        match self {
            Self::Down { x, y } => {
                gallery.pointer_down(x, y);
                false
            }
            Self::Move { x, y } => {
                gallery.pointer_move(x, y);
                false
            }
            Self::Up { x, y } => {
                let toggled = gallery.pointer_up(x, y);
                if toggled {
                    tracing::debug!(x, y, "click toggled view mode");
                }
                toggled
            }
            Self::Wheel(delta) => {
                gallery.wheel(delta.pixel_y());
                false
            }
        }
    }
}

/// Lifecycle of a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Follows the first finger down and ignores the rest until it lifts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTracker {
    active: Option<u64>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<u64> {
        self.active
    }

    /// Translate one touch report, or `None` if it belongs to a secondary finger.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started if self.active.is_none() => {
                self.active = Some(id);
                Some(InputEvent::Down { x, y })
            }
            TouchPhase::Moved if self.active == Some(id) => Some(InputEvent::Move { x, y }),
            TouchPhase::Ended | TouchPhase::Cancelled if self.active == Some(id) => {
                self.active = None;
                Some(InputEvent::Up { x, y })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_common::{CameraParams, PixelRect, Screen};
    use gallery_kernel::{GalleryConfig, GalleryExtent, LayoutSource, ViewMode};

    struct OneTile;

    impl LayoutSource for OneTile {
        fn relayout(&mut self, _screen: Screen) {}

        fn tile_rect(&self, index: usize) -> Option<PixelRect> {
            (index == 0).then(|| PixelRect::new(100.0, 100.0, 400.0, 300.0))
        }

        fn extent(&self) -> GalleryExtent {
            GalleryExtent {
                height: 3000.0,
                content_width: 3000.0,
            }
        }
    }

    fn gallery() -> Gallery {
        let mut g = Gallery::new(GalleryConfig::default(), 1);
        g.resize(Screen::new(1280.0, 720.0), CameraParams::default(), &mut OneTile);
        g
    }

    #[test]
    fn wheel_lines_reach_vertical_target() {
        let mut g = gallery();
        InputEvent::Wheel(WheelDelta::Lines { x: 0.0, y: 2.0 }).apply(&mut g);
        assert_eq!(g.axis_y().target(), 80.0);
        assert_eq!(g.axis_x().target(), 0.0);
    }

    #[test]
    fn drag_sequence_moves_both_axes() {
        let mut g = gallery();
        for e in [
            InputEvent::Down { x: 600.0, y: 600.0 },
            InputEvent::Move { x: 590.0, y: 580.0 },
            InputEvent::Up { x: 590.0, y: 580.0 },
        ] {
            e.apply(&mut g);
        }
        assert_eq!(g.axis_x().target(), 30.0);
        assert_eq!(g.axis_y().target(), 60.0);
    }

    #[test]
    fn click_through_events_toggles_mode() {
        let mut g = gallery();
        InputEvent::Down { x: 200.0, y: 200.0 }.apply(&mut g);
        assert!(InputEvent::Up { x: 200.0, y: 200.0 }.apply(&mut g));
        assert_eq!(g.mode(), ViewMode::Detail { tile: 0 });
    }

    #[test]
    fn touch_tracker_follows_first_finger() {
        let mut t = TouchTracker::new();
        assert_eq!(
            t.touch(7, TouchPhase::Started, 1.0, 2.0),
            Some(InputEvent::Down { x: 1.0, y: 2.0 })
        );
        assert_eq!(t.touch(8, TouchPhase::Started, 5.0, 5.0), None);
        assert_eq!(t.touch(8, TouchPhase::Moved, 6.0, 6.0), None);
        assert_eq!(
            t.touch(7, TouchPhase::Moved, 3.0, 4.0),
            Some(InputEvent::Move { x: 3.0, y: 4.0 })
        );
        assert_eq!(
            t.touch(7, TouchPhase::Cancelled, 3.0, 4.0),
            Some(InputEvent::Up { x: 3.0, y: 4.0 })
        );
        assert_eq!(t.active(), None);
    }
}
