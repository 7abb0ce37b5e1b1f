//! Gallery media: which images to show and their decoded pixels.
//!
//! Textures are identified by content-addressed hashes. Renderers consume
//! them by [`TextureId`], never by file path.
//!
//! # Invariants
//! - Every source is attempted before [`TextureStore::load_all`] returns.
//! - A failed source never aborts the batch; its tile simply has no texture.

mod manifest;
mod texture;

use std::path::PathBuf;

pub use gallery_common::TextureId;
pub use manifest::{IMAGE_EXTENSIONS, SourceManifest};
pub use texture::{ImageData, LoadFailure, TextureStore};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("media source not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub fn crate_info() -> &'static str {
    "gallery-assets v0.1.0"
}
