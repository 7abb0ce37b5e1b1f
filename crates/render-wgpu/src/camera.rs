use gallery_common::{CameraParams, Screen};
use gallery_kernel::Viewport;
use glam::{Mat4, Vec3};

/// Fixed perspective camera on the +Z axis looking at the tile plane (z = 0).
///
/// With the same field of view and distance, the visible plane matches the
/// kernel's [`Viewport`] exactly, so tile positions need no further mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryCamera {
    pub params: CameraParams,
    pub screen: Screen,
    pub near: f32,
    pub far: f32,
}

impl Default for GalleryCamera {
    fn default() -> Self {
        Self {
            params: CameraParams::default(),
            screen: Screen::new(1920.0, 1080.0),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl GalleryCamera {
    pub fn new(params: CameraParams, screen: Screen) -> Self {
        Self {
            params,
            screen,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.params.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            self.screen.aspect(),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Visible extent of the tile plane.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_camera(self.screen, self.params)
    }
}
