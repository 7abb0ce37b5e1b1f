use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gallery_common::TextureId;
use sha2::{Digest, Sha256};

use crate::AssetError;

/// Decoded RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Decode any format the `image` crate recognizes.
    pub fn decode_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let rgba = image::open(path.as_ref())?.into_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    /// Diagonal two-tone gradient, tinted per index, for running without media.
    pub fn placeholder(index: usize, width: u32, height: u32) -> Self {
        const PALETTE: [[u8; 3]; 6] = [
            [231, 111, 81],
            [244, 162, 97],
            [233, 196, 106],
            [42, 157, 143],
            [38, 70, 83],
            [131, 56, 236],
        ];
        let base = PALETTE[index % PALETTE.len()];
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let t = (x + y) as f32 / (width + height).max(1) as f32;
                let checker = ((x / 32) + (y / 32)) % 2 == 0;
                let shade = if checker { 1.0 } else { 0.85 };
                for c in base {
                    rgba.push((c as f32 * (0.6 + 0.4 * t) * shade) as u8);
                }
                rgba.push(255);
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Content hash of dimensions and pixels.
    pub fn texture_id(&self) -> TextureId {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.rgba);
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        TextureId(u64::from_le_bytes(bytes))
    }
}

/// A source that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub tile: usize,
    pub path: PathBuf,
    pub reason: String,
}

/// Decoded textures, deduplicated by content, plus the tile to texture mapping.
#[derive(Debug, Clone, Default)]
pub struct TextureStore {
    textures: BTreeMap<TextureId, ImageData>,
    tiles: Vec<Option<TextureId>>,
    failures: Vec<LoadFailure>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every source before returning. A bad source leaves its tile
    /// without a texture and is recorded; the rest still load.
    pub fn load_all(sources: &[PathBuf]) -> Self {
        let _span = tracing::info_span!("load_textures", count = sources.len()).entered();
        let mut store = Self::new();
        for (tile, path) in sources.iter().enumerate() {
            match ImageData::decode_file(path) {
                Ok(image) => {
                    tracing::debug!(
                        tile,
                        path = %path.display(),
                        width = image.width,
                        height = image.height,
                        "texture decoded"
                    );
                    store.push(Some(image));
                }
                Err(e) => {
                    tracing::warn!(tile, path = %path.display(), error = %e, "texture failed to load");
                    store.failures.push(LoadFailure {
                        tile,
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                    store.push(None);
                }
            }
        }
        tracing::info!(
            loaded = store.loaded_count(),
            failed = store.failures.len(),
            unique = store.textures.len(),
            "textures ready"
        );
        store
    }

    /// `count` tiles with generated placeholder images.
    pub fn placeholders(count: usize, width: u32, height: u32) -> Self {
        let mut store = Self::new();
        for tile in 0..count {
            store.push(Some(ImageData::placeholder(tile, width, height)));
        }
        store
    }

    /// Append one tile, optionally with an image.
    pub fn push(&mut self, image: Option<ImageData>) -> Option<TextureId> {
        let id = image.map(|image| {
            let id = image.texture_id();
            self.textures.entry(id).or_insert(image);
            id
        });
        self.tiles.push(id);
        id
    }

    pub fn get(&self, id: TextureId) -> Option<&ImageData> {
        self.textures.get(&id)
    }

    pub fn tile_texture(&self, tile: usize) -> Option<TextureId> {
        self.tiles.get(tile).copied().flatten()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tiles that ended up with a texture.
    pub fn loaded_count(&self) -> usize {
        self.tiles.iter().flatten().count()
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Distinct textures.
    pub fn textures(&self) -> impl Iterator<Item = (TextureId, &ImageData)> {
        self.textures.iter().map(|(id, image)| (*id, image))
    }

    /// `(tile, texture)` for every tile that has one.
    pub fn tile_textures(&self) -> impl Iterator<Item = (usize, TextureId)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(tile, id)| id.map(|id| (tile, id)))
    }
}
