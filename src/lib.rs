//! # mapcircle
//!
//! Geographic circle overlays for a Leaflet-style map engine.
//!
//! A [`CircleOverlay`] is defined by a center coordinate and a radius in
//! meters. On every render pass it is projected to a pixel-space circle,
//! culled against the map's padded viewport and turned into a path string
//! for the active vector backend (SVG or VML).

pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod spatial;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{CircleOptions, PathOptions},
    geo::{LatLng, LatLngBounds, Point, SphericalEarth},
    map::{Map, MapOptions},
    viewport::Viewport,
};

pub use crate::layers::{
    base::LayerTrait,
    circle::{circle, CircleOverlay, ScreenProjection},
};

pub use crate::input::handler::{CircleHandler, CircleHandlers};

pub use crate::rendering::{
    context::{RenderContext, RenderedPath},
    path::{PathEmitter, RendererKind},
};

pub use crate::spatial::index::SpatialIndex;

pub use crate::traits::{MetersToDegrees, PathProjection};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
