//! Rendering Adapter: turns tile projections into drawable quads.
//!
//! # Invariants
//! - Renderers cannot mutate the gallery.
//! - A tile is drawn only when it has both a layout position and a texture.
//! - Textures are cropped to cover their tile, never stretched.

mod quad;
mod renderer;

pub use quad::{
    ImageSize, Quad, TextureBinding, TextureBindings, UvTransform, cover_uv, project_quads,
};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "gallery-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
