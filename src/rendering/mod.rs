pub mod context;
pub mod path;

pub use context::{RenderContext, RenderedPath};
pub use path::{PathEmitter, RendererKind, SvgPathEmitter, VmlPathEmitter};
