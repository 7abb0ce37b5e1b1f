use gallery_common::{PixelRect, Screen};
use gallery_kernel::{GalleryExtent, LayoutSource};
use serde::{Deserialize, Serialize};

/// Errors from building a layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("columns must be at least 1")]
    NoColumns,
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

/// Grid proportions, all relative to the screen so the layout scales with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayoutConfig {
    pub columns: usize,
    /// Tile width as a fraction of screen width.
    pub tile_width_ratio: f32,
    /// Tile height over tile width.
    pub tile_aspect: f32,
    /// Gap between tiles as a fraction of screen height.
    pub gap_ratio: f32,
}

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self {
            columns: 6,
            tile_width_ratio: 0.25,
            tile_aspect: 1.25,
            gap_ratio: 0.07,
        }
    }
}

impl GridLayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 {
            return Err(LayoutError::NoColumns);
        }
        for (field, value) in [
            ("tile_width_ratio", self.tile_width_ratio),
            ("tile_aspect", self.tile_aspect),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::NotPositive { field, value });
            }
        }
        if !(self.gap_ratio.is_finite() && self.gap_ratio >= 0.0) {
            return Err(LayoutError::NotPositive {
                field: "gap_ratio",
                value: self.gap_ratio,
            });
        }
        Ok(())
    }
}

/// Pixel sizes of one grid cell for a given screen.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    width: f32,
    height: f32,
    gap: f32,
}

impl Cell {
    fn pitch_x(&self) -> f32 {
        self.width + self.gap
    }

    fn pitch_y(&self) -> f32 {
        self.height + self.gap
    }
}

/// Row-major grid of equally sized tiles.
///
/// Each cell carries half a gap on every side, so the seam where the grid
/// wraps onto itself looks like any interior gap.
#[derive(Debug, Clone)]
pub struct GridLayout {
    config: GridLayoutConfig,
    tile_count: usize,
    cell: Option<Cell>,
}

impl GridLayout {
    pub fn new(config: GridLayoutConfig, tile_count: usize) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            config,
            tile_count,
            cell: None,
        })
    }

    pub fn config(&self) -> &GridLayoutConfig {
        &self.config
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn rows(&self) -> usize {
        self.tile_count.div_ceil(self.config.columns)
    }

    /// Grid cell `(column, row)` of a tile index.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index % self.config.columns, index / self.config.columns)
    }
}

impl LayoutSource for GridLayout {
    fn relayout(&mut self, screen: Screen) {
        let width = self.config.tile_width_ratio * screen.width;
        let cell = Cell {
            width,
            height: width * self.config.tile_aspect,
            gap: self.config.gap_ratio * screen.height,
        };
        self.cell = Some(cell);

        let extent = self.extent();
        if extent.content_width < screen.width + cell.width {
            tracing::warn!(
                content_width = extent.content_width,
                screen_width = screen.width,
                "grid narrower than screen plus one tile, horizontal wrap will be visible"
            );
        }
        if extent.height < screen.height + cell.height {
            tracing::warn!(
                height = extent.height,
                screen_height = screen.height,
                "grid shorter than screen plus one tile, vertical wrap will be visible"
            );
        }
        tracing::debug!(
            tile_w = cell.width,
            tile_h = cell.height,
            gap = cell.gap,
            rows = self.rows(),
            "grid laid out"
        );
    }

    fn tile_rect(&self, index: usize) -> Option<PixelRect> {
        let cell = self.cell?;
        if index >= self.tile_count {
            return None;
        }
        let (col, row) = self.cell_of(index);
        Some(PixelRect::new(
            row as f32 * cell.pitch_y() + cell.gap / 2.0,
            col as f32 * cell.pitch_x() + cell.gap / 2.0,
            cell.width,
            cell.height,
        ))
    }

    fn extent(&self) -> GalleryExtent {
        let Some(cell) = self.cell else {
            return GalleryExtent::default();
        };
        GalleryExtent {
            height: self.rows() as f32 * cell.pitch_y(),
            content_width: self.config.columns as f32 * cell.pitch_x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(columns: usize) -> GridLayoutConfig {
        GridLayoutConfig {
            columns,
            tile_width_ratio: 0.1,
            tile_aspect: 1.0,
            gap_ratio: 0.1,
        }
    }

    #[test]
    fn config_defaults() {
        let config = GridLayoutConfig::default();
        assert_eq!(config.columns, 6);
        assert_eq!(config.gap_ratio, 0.07);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_columns() {
        let err = GridLayout::new(square(0), 4).unwrap_err();
        assert!(matches!(err, LayoutError::NoColumns));
    }

    #[test]
    fn rejects_non_positive_ratios() {
        let config = GridLayoutConfig {
            tile_aspect: 0.0,
            ..GridLayoutConfig::default()
        };
        assert!(matches!(
            GridLayout::new(config, 1),
            Err(LayoutError::NotPositive { field: "tile_aspect", .. })
        ));
    }

    #[test]
    fn no_rects_before_relayout() {
        let grid = GridLayout::new(square(3), 6).unwrap();
        assert!(grid.tile_rect(0).is_none());
        assert_eq!(grid.extent(), GalleryExtent::default());
    }

    #[test]
    fn rects_are_row_major_with_half_gap_margin() {
        let mut grid = GridLayout::new(square(3), 7).unwrap();
        grid.relayout(Screen::new(1000.0, 1000.0));

        // Tile 100px, gap 100px, pitch 200px.
        assert_eq!(grid.tile_rect(0), Some(PixelRect::new(50.0, 50.0, 100.0, 100.0)));
        assert_eq!(grid.tile_rect(2), Some(PixelRect::new(50.0, 450.0, 100.0, 100.0)));
        assert_eq!(grid.tile_rect(4), Some(PixelRect::new(250.0, 250.0, 100.0, 100.0)));
        assert_eq!(grid.tile_rect(6), Some(PixelRect::new(450.0, 50.0, 100.0, 100.0)));
        assert!(grid.tile_rect(7).is_none());
    }

    #[test]
    fn extent_covers_every_row_and_column() {
        let mut grid = GridLayout::new(square(3), 7).unwrap();
        grid.relayout(Screen::new(1000.0, 1000.0));
        assert_eq!(grid.rows(), 3);
        assert_eq!(
            grid.extent(),
            GalleryExtent {
                height: 600.0,
                content_width: 600.0,
            }
        );
    }

    #[test]
    fn relayout_scales_with_screen() {
        let mut grid = GridLayout::new(square(2), 2).unwrap();
        grid.relayout(Screen::new(1000.0, 1000.0));
        let small = grid.tile_rect(1).unwrap();
        grid.relayout(Screen::new(2000.0, 2000.0));
        let big = grid.tile_rect(1).unwrap();
        assert_eq!(big.width, small.width * 2.0);
        assert_eq!(big.left, small.left * 2.0);
    }

    #[test]
    fn config_from_partial_json() {
        let config: GridLayoutConfig = serde_json::from_str(r#"{ "columns": 4 }"#).unwrap();
        assert_eq!(config.columns, 4);
        assert_eq!(config.tile_width_ratio, 0.25);
    }
}
