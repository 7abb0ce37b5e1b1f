use gallery_common::{Axis, CameraParams, PixelRect, Screen};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the visible plane at the tile depth, in camera units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Visible plane of a perspective camera looking down -Z at `camera.distance`.
    ///
    /// `height = 2 * tan(fov / 2) * distance`, `width = height * aspect`.
    pub fn from_camera(screen: Screen, camera: CameraParams) -> Self {
        let fov = camera.fov_degrees.to_radians();
        let height = 2.0 * (fov / 2.0).tan() * camera.distance;
        Self {
            width: height * screen.aspect(),
            height,
        }
    }

    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Converts pixel measurements into camera units for one resize epoch.
///
/// The screen and the viewport derived from it are stored together and the
/// mapper is replaced wholesale on resize, so a stale pairing cannot exist.
///
/// # Precondition
/// Screen dimensions must be positive. A zero-sized screen divides by zero;
/// this is not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMapper {
    screen: Screen,
    camera: CameraParams,
    viewport: Viewport,
}

impl ViewportMapper {
    pub fn new(screen: Screen, camera: CameraParams) -> Self {
        Self {
            screen,
            camera,
            viewport: Viewport::from_camera(screen, camera),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn camera(&self) -> CameraParams {
        self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Horizontal pixel length in camera units.
    pub fn to_viewport_x(&self, px: f32) -> f32 {
        (px / self.screen.width) * self.viewport.width
    }

    /// Vertical pixel length in camera units.
    pub fn to_viewport_y(&self, px: f32) -> f32 {
        (px / self.screen.height) * self.viewport.height
    }

    pub fn to_viewport(&self, axis: Axis, px: f32) -> f32 {
        match axis {
            Axis::X => self.to_viewport_x(px),
            Axis::Y => self.to_viewport_y(px),
        }
    }

    /// Inverse of [`Self::to_viewport_x`].
    pub fn to_pixels_x(&self, units: f32) -> f32 {
        (units / self.viewport.width) * self.screen.width
    }

    /// Inverse of [`Self::to_viewport_y`].
    pub fn to_pixels_y(&self, units: f32) -> f32 {
        (units / self.viewport.height) * self.screen.height
    }

    /// Camera-unit size of a pixel rectangle.
    pub fn scale_of(&self, rect: &PixelRect) -> Vec2 {
        Vec2::new(self.to_viewport_x(rect.width), self.to_viewport_y(rect.height))
    }

    /// Screen pointer position to a point on the tile plane, origin at the
    /// view center, y up.
    pub fn pointer_to_viewport(&self, x: f32, y: f32) -> Vec2 {
        let half = self.viewport.half();
        Vec2::new(-half.x + self.to_viewport_x(x), half.y - self.to_viewport_y(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hd() -> ViewportMapper {
        ViewportMapper::new(Screen::new(1920.0, 1080.0), CameraParams::default())
    }

    #[test]
    fn full_hd_viewport_dimensions() {
        let vp = hd().viewport();
        assert!((vp.height - 4.142).abs() < 1e-3, "height = {}", vp.height);
        assert!((vp.width - 7.363).abs() < 1e-2, "width = {}", vp.width);
    }

    #[test]
    fn full_screen_maps_to_full_viewport() {
        let m = hd();
        assert!((m.to_viewport_x(1920.0) - m.viewport().width).abs() < 1e-5);
        assert!((m.to_viewport_y(1080.0) - m.viewport().height).abs() < 1e-5);
        assert_eq!(m.to_viewport(Axis::Y, 0.0), 0.0);
    }

    #[test]
    fn pixel_round_trip() {
        let m = hd();
        let px = 333.0;
        assert!((m.to_pixels_x(m.to_viewport_x(px)) - px).abs() < 1e-3);
        assert!((m.to_pixels_y(m.to_viewport_y(px)) - px).abs() < 1e-3);
    }

    #[test]
    fn pointer_corners() {
        let m = hd();
        let half = m.viewport().half();

        let top_left = m.pointer_to_viewport(0.0, 0.0);
        assert!((top_left - Vec2::new(-half.x, half.y)).length() < 1e-5);

        let center = m.pointer_to_viewport(960.0, 540.0);
        assert!(center.length() < 1e-5);
    }

    #[test]
    fn scale_of_rect() {
        let m = hd();
        let s = m.scale_of(&PixelRect::new(0.0, 0.0, 960.0, 540.0));
        assert!((s.x - m.viewport().width / 2.0).abs() < 1e-5);
        assert!((s.y - m.viewport().height / 2.0).abs() < 1e-5);
    }

    #[test]
    fn wider_fov_grows_viewport() {
        let screen = Screen::new(800.0, 600.0);
        let narrow = Viewport::from_camera(screen, CameraParams::default());
        let wide = Viewport::from_camera(
            screen,
            CameraParams {
                fov_degrees: 90.0,
                ..CameraParams::default()
            },
        );
        assert!(wide.height > narrow.height);
        assert!((wide.height - 10.0).abs() < 1e-4);
    }
}
