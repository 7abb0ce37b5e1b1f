/// Pixels per line for line-based wheel devices.
pub const LINE_HEIGHT: f32 = 40.0;
/// Pixels per page for page-based wheel devices.
pub const PAGE_HEIGHT: f32 = 800.0;

/// A raw wheel reading as reported by the platform.
///
/// Sign convention: positive `y` scrolls toward the end of the content
/// (content moves up). Backends that report the opposite must flip it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Precise devices (trackpads) report pixels directly.
    Pixels { x: f32, y: f32 },
    /// Notched mouse wheels report lines.
    Lines { x: f32, y: f32 },
    /// Rare page-step devices.
    Pages { x: f32, y: f32 },
}

impl WheelDelta {
    /// Vertical scroll distance in pixels.
    pub fn pixel_y(self) -> f32 {
        self.pixels().1
    }

    /// Scroll distance in pixels on both axes.
    pub fn pixels(self) -> (f32, f32) {
        match self {
            Self::Pixels { x, y } => (x, y),
            Self::Lines { x, y } => (x * LINE_HEIGHT, y * LINE_HEIGHT),
            Self::Pages { x, y } => (x * PAGE_HEIGHT, y * PAGE_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_pass_through() {
        let d = WheelDelta::Pixels { x: 3.0, y: -12.5 };
        assert_eq!(d.pixels(), (3.0, -12.5));
    }

    #[test]
    fn lines_scale_by_line_height() {
        assert_eq!(WheelDelta::Lines { x: 0.0, y: 3.0 }.pixel_y(), 120.0);
    }

    #[test]
    fn pages_scale_by_page_height() {
        assert_eq!(WheelDelta::Pages { x: 1.0, y: -1.0 }.pixels(), (800.0, -800.0));
    }
}
