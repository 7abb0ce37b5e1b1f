//! wgpu render backend for the gallery.
//!
//! Draws each projected tile as a textured quad on the z = 0 plane, seen by a
//! fixed perspective camera whose visible plane equals the kernel viewport.
//!
//! # Invariants
//! - Renderer never mutates gallery state.
//! - A quad whose texture was never uploaded is skipped, not drawn blank.

mod camera;
mod gpu;
mod shaders;

pub use camera::GalleryCamera;
pub use gpu::WgpuRenderer;
