use crate::{
    core::config::PathOptions,
    rendering::path::{PathEmitter, RendererKind},
};

/// A path produced for one layer during a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    pub layer_id: String,
    /// Backend path description; empty means nothing to draw
    pub data: String,
    pub style: PathOptions,
    pub opacity: f32,
}

impl RenderedPath {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Collects path descriptions for the renderer backend chosen at construction
pub struct RenderContext {
    emitter: Box<dyn PathEmitter>,
    /// Paths queued this pass, in render order
    pub drawing_queue: Vec<RenderedPath>,
}

impl RenderContext {
    pub fn new(kind: RendererKind) -> Self {
        Self::with_emitter(kind.emitter())
    }

    pub fn with_emitter(emitter: Box<dyn PathEmitter>) -> Self {
        Self {
            emitter,
            drawing_queue: Vec::new(),
        }
    }

    pub fn renderer_kind(&self) -> RendererKind {
        self.emitter.kind()
    }

    pub fn emitter(&self) -> &dyn PathEmitter {
        self.emitter.as_ref()
    }

    /// Queue a path for drawing. Empty paths are queued too so the backend can
    /// clear whatever it drew for the layer last time.
    pub fn push_path(&mut self, path: RenderedPath) {
        self.drawing_queue.push(path);
    }

    /// Drops every queued path, ready for the next pass
    pub fn clear(&mut self) {
        self.drawing_queue.clear();
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(RendererKind::default())
    }
}
