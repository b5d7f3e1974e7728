//! Path description emitters.
//!
//! A renderer backend consumes shapes as a single path string. The two
//! backends speak different syntaxes, so each gets its own [`PathEmitter`];
//! the host picks one when it builds its [`RenderContext`](super::context::RenderContext)
//! and every overlay emits through it.

use crate::core::{
    constants::{ARC_CLOSE_OFFSET, CLIP_PADDING, VML_CLIP_PADDING, VML_FULL_SWEEP},
    geo::Point,
};
use serde::{Deserialize, Serialize};

/// Renderer backends an overlay can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Scalable Vector Graphics `d` attribute syntax
    #[default]
    Svg,
    /// Legacy VML `path` attribute syntax
    Vml,
}

impl RendererKind {
    /// Builds the emitter for this backend
    pub fn emitter(self) -> Box<dyn PathEmitter> {
        match self {
            RendererKind::Svg => Box::new(SvgPathEmitter),
            RendererKind::Vml => Box::new(VmlPathEmitter),
        }
    }

    /// Clip padding this backend expects around the viewport
    pub fn clip_padding(self) -> f64 {
        match self {
            RendererKind::Svg => CLIP_PADDING,
            RendererKind::Vml => VML_CLIP_PADDING,
        }
    }
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererKind::Svg => write!(f, "svg"),
            RendererKind::Vml => write!(f, "vml"),
        }
    }
}

/// Turns screen-space shapes into a backend-specific path string
pub trait PathEmitter: Send + Sync {
    fn kind(&self) -> RendererKind;

    /// Closed circle around `center` with a radius in pixels
    fn circle(&self, center: &Point, radius: f64) -> String;
}

/// SVG path emitter.
///
/// A single arc whose endpoints coincide draws nothing, so the circle is two
/// half arcs through the bottom point, ending just left of the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPathEmitter;

impl PathEmitter for SvgPathEmitter {
    fn kind(&self) -> RendererKind {
        RendererKind::Svg
    }

    fn circle(&self, center: &Point, radius: f64) -> String {
        let (x, y, r) = (center.x, center.y, radius);
        format!(
            "M{},{}A{r},{r},0,1,1,{},{}A{r},{r},0,1,1,{},{} z",
            x,
            y - r,
            x,
            y + r,
            x - ARC_CLOSE_OFFSET,
            y - r,
        )
    }
}

/// VML path emitter. VML only accepts integer device coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct VmlPathEmitter;

impl PathEmitter for VmlPathEmitter {
    fn kind(&self) -> RendererKind {
        RendererKind::Vml
    }

    fn circle(&self, center: &Point, radius: f64) -> String {
        let p = center.round();
        let r = radius.round();
        format!("AL {},{} {r},{r} 0,{VML_FULL_SWEEP}", p.x, p.y)
    }
}
