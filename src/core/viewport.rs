use crate::core::{
    bounds::Bounds,
    constants::{CLIP_PADDING, TILE_SIZE},
    geo::{LatLng, Point},
};
use crate::traits::PathProjection;
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Fraction of the size kept around the visible area before paths are culled
    pub clip_padding: f64,
    /// Pixel origin for coordinate transformations (to avoid precision issues)
    pixel_origin: Option<Point>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
            clip_padding: CLIP_PADDING,
            pixel_origin: None,
        };
        viewport.update_pixel_origin();
        viewport
    }

    /// Sets the center of the viewport, clamped to the Web Mercator world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(LatLng::clamp_lat(center.lat), center.lng.clamp(-180.0, 180.0));
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the padding fraction used by [`Viewport::path_viewport`]
    pub fn set_clip_padding(&mut self, padding: f64) {
        self.clip_padding = padding.max(0.0);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = f64::from(TILE_SIZE) * 2_f64.powf(z);
        let half_world = std::f64::consts::PI * crate::core::constants::EARTH_RADIUS_METERS;

        let mercator = lat_lng.to_mercator();
        let pixel_x = (mercator.x + half_world) / (2.0 * half_world) * scale;
        let pixel_y = (-mercator.y + half_world) / (2.0 * half_world) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Gets or calculates the pixel origin for this viewport
    pub fn get_pixel_origin(&self) -> Point {
        self.pixel_origin
            .unwrap_or_else(|| self.project(&self.center, None).floor())
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = Some(self.project(&self.center, None).floor());
    }

    /// Converts LatLng to layer point (relative to pixel origin)
    pub fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng, None).subtract(&self.get_pixel_origin())
    }

    /// Visible area in layer-point coordinates
    pub fn pixel_bounds(&self) -> Bounds {
        let half = self.size.multiply(0.5);
        Bounds::new(Point::new(-half.x, -half.y), half)
    }

    /// Visible area grown by `clip_padding` on each side, rounded to whole pixels.
    /// Paths entirely outside this rectangle are not drawn.
    pub fn path_viewport(&self) -> Bounds {
        let visible = self.pixel_bounds();
        let pad = self.size.multiply(self.clip_padding).round();
        let min = visible.min.subtract(&pad);
        let max = min.add(&self.size.multiply(1.0 + self.clip_padding * 2.0).round());
        Bounds::new(min, max)
    }
}

impl PathProjection for Viewport {
    fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        Viewport::lat_lng_to_layer_point(self, lat_lng)
    }

    fn path_viewport(&self) -> Bounds {
        Viewport::path_viewport(self)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(40.7128, -74.0060),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, 40.7128);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_center_projects_near_layer_origin() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));
        let layer_point = viewport.lat_lng_to_layer_point(&LatLng::new(0.0, 0.0));
        assert!(layer_point.x.abs() < 1.0);
        assert!(layer_point.y.abs() < 1.0);
    }

    #[test]
    fn test_world_width_at_zoom_zero() {
        let viewport = Viewport::default();
        let west = viewport.project(&LatLng::new(0.0, -180.0), Some(0.0));
        let east = viewport.project(&LatLng::new(0.0, 180.0), Some(0.0));
        assert!((east.x - west.x - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.min_zoom = 2.0;
        viewport.max_zoom = 15.0;

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_path_viewport_padding() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(800.0, 600.0));
        assert_eq!(viewport.path_viewport(), Bounds::from_coords(-800.0, -600.0, 800.0, 600.0));

        viewport.set_clip_padding(0.0);
        assert_eq!(viewport.path_viewport(), viewport.pixel_bounds());
    }
}
