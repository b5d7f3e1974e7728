//! Prelude module for common mapcircle types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapcircle::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{CircleOptions, PathOptions},
    geo::{LatLng, LatLngBounds, Point, SphericalEarth},
    map::{Map, MapOptions},
    viewport::Viewport,
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    circle::{circle, limit_radius, CircleOverlay, ScreenProjection},
};

pub use crate::input::handler::{CircleHandler, CircleHandlers, HandlerFactory};

pub use crate::rendering::{
    context::{RenderContext, RenderedPath},
    path::{PathEmitter, RendererKind, SvgPathEmitter, VmlPathEmitter},
};

pub use crate::spatial::{
    culling::Culling,
    index::{SpatialIndex, SpatialItem},
};

pub use crate::traits::{MetersToDegrees, PathProjection};

pub use fxhash::FxHashMap as HashMap;

pub use crate::{Error as MapError, Result};
