//! Shared trait abstractions
//!
//! The seams between overlays and the map that hosts them: the projection
//! service an overlay reads from, the metric conversion it uses, and the
//! capability set every overlay exposes to the map.

use crate::{
    core::{
        bounds::Bounds,
        geo::{LatLng, LatLngBounds, Point},
    },
    rendering::context::RenderContext,
    Result,
};

/// Geodetic to pixel conversion as seen by overlays during a render pass
pub trait PathProjection {
    /// Project a coordinate into layer-point space
    fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point;

    /// Rectangle (in layer points) outside of which paths are culled
    fn path_viewport(&self) -> Bounds;
}

/// Conversion from a metric distance to degree deltas at a given latitude
pub trait MetersToDegrees: Send + Sync {
    /// Latitude delta covered by `meters` going north or south
    fn lat_degrees(&self, meters: f64) -> f64;

    /// Longitude delta covered by `meters` going east or west at `latitude`
    fn lng_degrees(&self, meters: f64, latitude: f64) -> f64 {
        self.lat_degrees(meters) / latitude.to_radians().cos()
    }
}

/// Trait for layer-like objects the map can hold and render
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> crate::layers::base::LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Layer lifecycle events
    fn on_add(&mut self, _projection: &dyn PathProjection) -> Result<()> {
        Ok(())
    }

    fn on_remove(&mut self, _projection: &dyn PathProjection) -> Result<()> {
        Ok(())
    }

    /// Render the layer
    fn render(&mut self, context: &mut RenderContext, projection: &dyn PathProjection)
        -> Result<()>;

    /// Ask the host to render this layer again on its next pass
    fn redraw(&mut self);

    /// Consume a pending redraw request
    fn take_redraw(&mut self) -> bool;

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Check if layer intersects with given bounds
    fn intersects_bounds(&self, bounds: &LatLngBounds) -> bool {
        if let Some(layer_bounds) = self.bounds() {
            layer_bounds.intersects(bounds)
        } else {
            true
        }
    }

    /// Get layer options
    fn options(&self) -> serde_json::Value;

    /// Set layer options
    fn set_options(&mut self, options: serde_json::Value) -> Result<()>;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
