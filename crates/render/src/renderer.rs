use gallery_kernel::Gallery;

use crate::quad::{TextureBindings, project_quads};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the gallery and the texture bindings and produces output.
/// It never mutates the gallery; tile placement is engine-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the current tile projections.
    fn render(&self, gallery: &Gallery, bindings: &TextureBindings) -> Self::Output;
}

/// Text dump of one frame, for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, gallery: &Gallery, bindings: &TextureBindings) -> String {
        let quads = project_quads(gallery, bindings);
        let scroll = gallery.scroll();

        let mut out = String::new();
        out.push_str(&format!(
            "=== Gallery Frame (frame={}, mode={:?}) ===\n",
            gallery.frame(),
            gallery.mode()
        ));
        out.push_str(&format!("Quads: {}/{}\n", quads.len(), gallery.tiles().len()));
        out.push_str(&format!(
            "Scroll: ({:.1}, {:.1}) detail_offset={:.1}\n",
            scroll.x,
            scroll.y,
            gallery.detail_offset()
        ));
        if let Some(span) = gallery.span() {
            out.push_str(&format!("Span: {:.3} x {:.3}\n", span.width, span.height));
        }

        for q in &quads {
            out.push_str(&format!(
                "  [{:03}] tex={} pos=({:.3}, {:.3}) scale=({:.3}, {:.3}) uv=({:.2}, {:.2})+({:.2}, {:.2})\n",
                q.tile,
                q.texture,
                q.position.x,
                q.position.y,
                q.scale.x,
                q.scale.y,
                q.uv.scale.x,
                q.uv.scale.y,
                q.uv.offset.x,
                q.uv.offset.y
            ));
        }

        out
    }
}
