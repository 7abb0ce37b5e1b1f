use gallery_assets::TextureStore;
use gallery_common::TextureId;
use gallery_kernel::Gallery;
use glam::Vec2;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The texture a tile shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureBinding {
    pub texture: TextureId,
    pub size: ImageSize,
}

/// Tile index to texture mapping. Tiles without an entry are not drawn.
#[derive(Debug, Clone, Default)]
pub struct TextureBindings {
    slots: Vec<Option<TextureBinding>>,
}

impl TextureBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every tile of the store that has a texture.
    pub fn from_store(store: &TextureStore) -> Self {
        let mut bindings = Self::new();
        for (tile, id) in store.tile_textures() {
            if let Some(image) = store.get(id) {
                bindings.bind(tile, id, ImageSize::new(image.width, image.height));
            }
        }
        bindings
    }

    pub fn bind(&mut self, tile: usize, texture: TextureId, size: ImageSize) {
        if self.slots.len() <= tile {
            self.slots.resize(tile + 1, None);
        }
        self.slots[tile] = Some(TextureBinding { texture, size });
    }

    pub fn unbind(&mut self, tile: usize) {
        if let Some(slot) = self.slots.get_mut(tile) {
            *slot = None;
        }
    }

    pub fn get(&self, tile: usize) -> Option<&TextureBinding> {
        self.slots.get(tile)?.as_ref()
    }

    /// Number of tiles with a texture.
    pub fn bound_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

/// Texture coordinate transform: `uv' = uv * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTransform {
    pub scale: Vec2,
    pub offset: Vec2,
}

impl UvTransform {
    pub const IDENTITY: Self = Self {
        scale: Vec2::ONE,
        offset: Vec2::ZERO,
    };

    pub fn apply(&self, uv: Vec2) -> Vec2 {
        uv * self.scale + self.offset
    }
}

/// Crop an image so it covers a plane without distortion, centered.
///
/// Whichever side of the image is relatively too long gets sampled over a
/// sub-range of `[0, 1]`; the other side keeps the full range.
pub fn cover_uv(plane: Vec2, image: Vec2) -> UvTransform {
    let ratio = Vec2::new(
        ((plane.x / plane.y) / (image.x / image.y)).min(1.0),
        ((plane.y / plane.x) / (image.y / image.x)).min(1.0),
    );
    UvTransform {
        scale: ratio,
        offset: (Vec2::ONE - ratio) * 0.5,
    }
}

/// Everything a backend needs to draw one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub tile: usize,
    pub texture: TextureId,
    /// Center on the camera plane.
    pub position: Vec2,
    /// Full width and height on the camera plane.
    pub scale: Vec2,
    pub uv: UvTransform,
}

/// One quad per tile that has both a layout position and a texture.
pub fn project_quads(gallery: &Gallery, bindings: &TextureBindings) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(gallery.tiles().len());
    for projection in gallery.projections() {
        let Some(binding) = bindings.get(projection.index) else {
            tracing::debug!(tile = projection.index, "no texture bound, skipping tile");
            continue;
        };
        quads.push(Quad {
            tile: projection.index,
            texture: binding.texture,
            position: projection.position,
            scale: projection.scale,
            uv: cover_uv(projection.scale, binding.size.as_vec2()),
        });
    }
    quads
}
