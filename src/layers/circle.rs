//! Circle overlay with a radius in meters.
//!
//! The overlay owns a geographic center and a metric radius. Everything
//! screen-related is derived per render pass: [`CircleOverlay::project`]
//! returns a [`ScreenProjection`] that the caller threads into
//! [`CircleOverlay::path_string`], so nothing stale is kept between passes.

use crate::{
    core::{
        bounds::Bounds,
        config::CircleOptions,
        geo::{LatLng, LatLngBounds, Point, SphericalEarth},
    },
    input::handler::{CircleHandler, CircleHandlers},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::{
        context::{RenderContext, RenderedPath},
        path::PathEmitter,
    },
    spatial::culling::Culling,
    traits::{MetersToDegrees, PathProjection},
    Error, Result,
};
use geo::HaversineDistance;

/// Screen-space circle for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    /// Center in layer points
    pub center: Point,
    /// Radius in whole pixels, never below 1
    pub pixel_radius: u32,
}

impl ScreenProjection {
    /// Bounding square in layer points
    pub fn pixel_bounds(&self) -> Bounds {
        Bounds::around(self.center, f64::from(self.pixel_radius))
    }
}

/// Clamp `radius` into the optional `[min_limit, max_limit]` range.
///
/// The upper limit is checked first, so an inverted pair yields `max_limit`.
/// A NaN radius falls back to `min_limit`, or zero when there is none.
pub fn limit_radius(radius: f64, min_limit: Option<f64>, max_limit: Option<f64>) -> f64 {
    if radius.is_nan() {
        return min_limit.unwrap_or(0.0);
    }
    match (min_limit, max_limit) {
        (_, Some(max)) if radius > max => max,
        (Some(min), _) if radius < min => min,
        _ => radius,
    }
}

/// A geographic circle drawn as a path overlay
pub struct CircleOverlay {
    properties: LayerProperties,
    options: CircleOptions,
    lat_lng: LatLng,
    radius: f64,
    metric: Box<dyn MetersToDegrees>,
    dragging: Option<Box<dyn CircleHandler>>,
    resizing: Option<Box<dyn CircleHandler>>,
}

impl CircleOverlay {
    /// Creates a circle without interaction handlers
    pub fn new(
        id: impl Into<String>,
        lat_lng: impl Into<LatLng>,
        radius: f64,
        options: CircleOptions,
    ) -> Self {
        Self::with_handlers(id, lat_lng, radius, options, CircleHandlers::default())
    }

    /// Creates a circle and instantiates whichever handlers were injected.
    /// Each handler is enabled only when its option flag is set.
    pub fn with_handlers(
        id: impl Into<String>,
        lat_lng: impl Into<LatLng>,
        radius: f64,
        options: CircleOptions,
        handlers: CircleHandlers,
    ) -> Self {
        let id = id.into();
        let properties = LayerProperties::new(id.clone(), "Circle".to_string(), LayerType::Vector);

        let dragging = handlers.drag.map(|factory| {
            let mut handler = factory(&id, &options);
            if options.draggable {
                handler.enable();
            }
            handler
        });

        let resizing = handlers.resize.map(|factory| {
            let mut handler = factory(&id, &options);
            if options.resizable {
                handler.enable();
            }
            handler
        });

        let mut circle = Self {
            properties,
            options,
            lat_lng: lat_lng.into(),
            radius: 0.0,
            metric: Box::new(SphericalEarth),
            dragging,
            resizing,
        };
        circle.radius = circle.limit_radius(radius);
        circle
    }

    /// Replaces the meters-to-degrees conversion
    pub fn with_metric(mut self, metric: Box<dyn MetersToDegrees>) -> Self {
        self.metric = metric;
        self.properties.redraw_requested = true;
        self
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.properties.name = name.into();
        self
    }

    /// Typed options this circle was built with
    pub fn circle_options(&self) -> &CircleOptions {
        &self.options
    }

    /// Clamp a radius to this circle's configured limits
    pub fn limit_radius(&self, radius: f64) -> f64 {
        let limited = limit_radius(radius, self.options.min_limit, self.options.max_limit);
        if limited.to_bits() != radius.to_bits() {
            log::debug!(
                "circle {}: radius {} clamped to {}",
                self.properties.id,
                radius,
                limited
            );
        }
        limited
    }

    /// Center of the circle
    pub fn get_lat_lng(&self) -> LatLng {
        self.lat_lng
    }

    /// Radius in meters after clamping
    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    /// Moves the circle and requests a redraw
    pub fn set_lat_lng(&mut self, lat_lng: impl Into<LatLng>) -> &mut Self {
        self.lat_lng = lat_lng.into();
        self.redraw();
        self
    }

    /// Sets the radius in meters, clamped to the limits, and requests a redraw
    pub fn set_radius(&mut self, radius: f64) -> &mut Self {
        self.radius = self.limit_radius(radius);
        self.redraw();
        self
    }

    /// Latitude delta spanned by the radius
    pub fn lat_radius(&self) -> f64 {
        self.metric.lat_degrees(self.radius)
    }

    /// Longitude delta spanned by the radius at the circle's latitude
    pub fn lng_radius(&self) -> f64 {
        self.metric.lng_degrees(self.radius, self.lat_lng.lat)
    }

    /// Geographic bounding box, independent of any view
    pub fn get_bounds(&self) -> LatLngBounds {
        let lat_radius = self.lat_radius();
        let lng_radius = self.lng_radius();
        let LatLng { lat, lng } = self.lat_lng;

        LatLngBounds::new(
            LatLng::new(lat - lat_radius, lng - lng_radius),
            LatLng::new(lat + lat_radius, lng + lng_radius),
        )
    }

    /// Projects the circle for the current view.
    ///
    /// The pixel radius is measured horizontally between the center and a
    /// point `lng_radius` to the west. Fails when the geometry degenerates to
    /// non-finite pixels (e.g. at or past the poles).
    pub fn project(&self, projection: &dyn PathProjection) -> Result<ScreenProjection> {
        let west = LatLng::new(self.lat_lng.lat, self.lat_lng.lng - self.lng_radius());
        let center = projection.lat_lng_to_layer_point(&self.lat_lng);
        let west_point = projection.lat_lng_to_layer_point(&west);

        let radius = (center.x - west_point.x).round();
        if !center.is_finite() || !radius.is_finite() {
            return Err(Error::InvalidCoordinates(format!(
                "circle {} at ({}, {}) with radius {}m does not project to finite pixels",
                self.properties.id, self.lat_lng.lat, self.lat_lng.lng, self.radius
            ))
            .into());
        }

        // `as` saturates, so enormous radii near the poles stay finite.
        let pixel_radius = radius.max(1.0) as u32;

        Ok(ScreenProjection {
            center,
            pixel_radius,
        })
    }

    /// Whether the projected circle lies entirely outside the path viewport.
    /// A circle that is not on a map is never considered empty.
    pub fn is_empty(&self, screen: &ScreenProjection, projection: &dyn PathProjection) -> bool {
        if !self.properties.attached {
            return false;
        }

        Culling::circle_outside(
            &projection.path_viewport(),
            &screen.center,
            f64::from(screen.pixel_radius),
        )
    }

    /// Path description for `screen`, or an empty string when culled
    pub fn path_string(
        &self,
        screen: &ScreenProjection,
        projection: &dyn PathProjection,
        emitter: &dyn PathEmitter,
    ) -> String {
        if self.is_empty(screen, projection) {
            return String::new();
        }
        emitter.circle(&screen.center, f64::from(screen.pixel_radius))
    }

    /// Whether `lat_lng` is within the radius, by great-circle distance
    pub fn contains(&self, lat_lng: &LatLng) -> bool {
        let center = geo::Point::from(self.lat_lng);
        center.haversine_distance(&geo::Point::from(*lat_lng)) <= self.radius
    }

    /// Drag handler, if one was injected
    pub fn dragging(&self) -> Option<&dyn CircleHandler> {
        self.dragging.as_deref()
    }

    pub fn dragging_mut(&mut self) -> Option<&mut (dyn CircleHandler + 'static)> {
        self.dragging.as_deref_mut()
    }

    /// Resize handler, if one was injected
    pub fn resizing(&self) -> Option<&dyn CircleHandler> {
        self.resizing.as_deref()
    }

    pub fn resizing_mut(&mut self) -> Option<&mut (dyn CircleHandler + 'static)> {
        self.resizing.as_deref_mut()
    }

    /// Whether the circle is currently on a map
    pub fn is_attached(&self) -> bool {
        self.properties.attached
    }
}

impl std::fmt::Debug for CircleOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircleOverlay")
            .field("id", &self.properties.id)
            .field("lat_lng", &self.lat_lng)
            .field("radius", &self.radius)
            .field("attached", &self.properties.attached)
            .finish()
    }
}

/// Shorthand for [`CircleOverlay::new`]
pub fn circle(
    id: impl Into<String>,
    lat_lng: impl Into<LatLng>,
    radius: f64,
    options: CircleOptions,
) -> CircleOverlay {
    CircleOverlay::new(id, lat_lng, radius, options)
}

impl LayerTrait for CircleOverlay {
    crate::impl_layer_trait!(CircleOverlay, properties);

    fn on_add(&mut self, _projection: &dyn PathProjection) -> Result<()> {
        self.properties.attached = true;
        self.redraw();

        if let Some(dragging) = self.dragging.as_mut().filter(|h| h.enabled()) {
            dragging.add_hooks();
        }
        if let Some(resizing) = self.resizing.as_mut().filter(|h| h.enabled()) {
            resizing.add_hooks();
        }
        Ok(())
    }

    fn on_remove(&mut self, _projection: &dyn PathProjection) -> Result<()> {
        if let Some(resizing) = self.resizing.as_mut().filter(|h| h.enabled()) {
            resizing.remove_hooks();
        }
        if let Some(dragging) = self.dragging.as_mut().filter(|h| h.enabled()) {
            dragging.remove_hooks();
        }

        self.properties.attached = false;
        Ok(())
    }

    fn render(&mut self, context: &mut RenderContext, projection: &dyn PathProjection) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }

        let data = match self.project(projection) {
            Ok(screen) => self.path_string(&screen, projection, context.emitter()),
            Err(err) => {
                log::warn!("skipping circle {}: {}", self.properties.id, err);
                String::new()
            }
        };

        context.push_path(RenderedPath {
            layer_id: self.properties.id.clone(),
            data,
            style: self.options.path.clone(),
            opacity: self.properties.opacity,
        });
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(self.get_bounds())
    }

    fn options(&self) -> serde_json::Value {
        self.options.to_json()
    }

    /// Replaces the options and re-applies the radius limits to the current radius.
    /// Handlers keep the state they were constructed with.
    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        self.options = CircleOptions::from_json(options)?;
        self.radius = self.limit_radius(self.radius);
        self.redraw();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;
    use crate::rendering::path::{SvgPathEmitter, VmlPathEmitter};
    use std::sync::{Arc, Mutex};

    /// Fixed-scale projection: one degree is `scale` pixels, no Mercator stretch.
    struct LinearProjection {
        scale: f64,
        viewport: Bounds,
    }

    impl PathProjection for LinearProjection {
        fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
            Point::new(lat_lng.lng * self.scale, -lat_lng.lat * self.scale)
        }

        fn path_viewport(&self) -> Bounds {
            self.viewport.clone()
        }
    }

    fn linear(scale: f64) -> LinearProjection {
        LinearProjection {
            scale,
            viewport: Bounds::from_coords(-100.0, -100.0, 100.0, 100.0),
        }
    }

    fn limited() -> CircleOptions {
        CircleOptions::default().with_limits(100.0, 2000.0)
    }

    #[derive(Clone, Default)]
    struct Journal(Arc<Mutex<Vec<String>>>);

    impl Journal {
        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct RecordingHandler {
        label: &'static str,
        enabled: bool,
        journal: Journal,
    }

    impl CircleHandler for RecordingHandler {
        fn enabled(&self) -> bool {
            self.enabled
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn add_hooks(&mut self) {
            self.journal.0.lock().unwrap().push(format!("{}:add", self.label));
        }

        fn remove_hooks(&mut self) {
            self.journal.0.lock().unwrap().push(format!("{}:remove", self.label));
        }
    }

    fn handlers(journal: &Journal) -> CircleHandlers {
        let drag_journal = journal.clone();
        let resize_journal = journal.clone();
        CircleHandlers::new()
            .with_drag(move |_, _| {
                Box::new(RecordingHandler {
                    label: "drag",
                    enabled: false,
                    journal: drag_journal.clone(),
                })
            })
            .with_resize(move |_, _| {
                Box::new(RecordingHandler {
                    label: "resize",
                    enabled: false,
                    journal: resize_journal.clone(),
                })
            })
    }

    #[test]
    fn test_limit_radius_policy() {
        assert_eq!(limit_radius(1000.0, Some(100.0), Some(2000.0)), 1000.0);
        assert_eq!(limit_radius(5000.0, Some(100.0), Some(2000.0)), 2000.0);
        assert_eq!(limit_radius(10.0, Some(100.0), Some(2000.0)), 100.0);
        assert_eq!(limit_radius(100.0, Some(100.0), Some(2000.0)), 100.0);
        assert_eq!(limit_radius(2000.0, Some(100.0), Some(2000.0)), 2000.0);
        assert_eq!(limit_radius(5.0, None, None), 5.0);
        assert_eq!(limit_radius(50.0, Some(10.0), Some(1.0)), 1.0);
    }

    #[test]
    fn test_limit_radius_non_finite() {
        assert_eq!(limit_radius(f64::NAN, Some(100.0), Some(2000.0)), 100.0);
        assert_eq!(limit_radius(f64::NAN, None, Some(2000.0)), 0.0);
        assert_eq!(limit_radius(f64::INFINITY, Some(100.0), Some(2000.0)), 2000.0);
        assert_eq!(limit_radius(f64::NEG_INFINITY, Some(100.0), Some(2000.0)), 100.0);

        let mut circle = CircleOverlay::new("c", (0.0, 0.0), f64::NAN, limited());
        assert_eq!(circle.get_radius(), 100.0);
        assert!(circle.get_bounds().is_finite());

        circle.set_radius(f64::NAN);
        assert_eq!(circle.get_radius(), 100.0);
    }

    #[test]
    fn test_radius_clamped_on_construction_and_set() {
        let mut circle = CircleOverlay::new("c", (0.0, 0.0), 5000.0, limited());
        assert_eq!(circle.get_radius(), 2000.0);

        circle.set_radius(1.0);
        assert_eq!(circle.get_radius(), 100.0);

        circle.set_radius(1000.0);
        assert_eq!(circle.get_radius(), 1000.0);
    }

    #[test]
    fn test_setters_chain_and_request_redraw() {
        let mut circle = CircleOverlay::new("c", (0.0, 0.0), 1000.0, limited());
        assert!(!circle.take_redraw());

        circle.set_lat_lng([10.0, 20.0]).set_radius(1500.0);
        assert_eq!(circle.get_lat_lng(), LatLng::new(10.0, 20.0));
        assert_eq!(circle.get_radius(), 1500.0);
        assert!(circle.take_redraw());
        assert!(!circle.take_redraw());
    }

    #[test]
    fn test_bounds_symmetric_around_center() {
        let circle = CircleOverlay::new("c", (45.0, 10.0), 1000.0, CircleOptions::default());
        let LatLngBounds {
            south_west,
            north_east,
        } = circle.get_bounds();

        assert!(((south_west.lat + north_east.lat) / 2.0 - 45.0).abs() < 1e-12);
        assert!(((south_west.lng + north_east.lng) / 2.0 - 10.0).abs() < 1e-12);
        assert!((north_east.lat - south_west.lat - 2.0 * circle.lat_radius()).abs() < 1e-12);
        assert!((north_east.lng - south_west.lng - 2.0 * circle.lng_radius()).abs() < 1e-12);
    }

    #[test]
    fn test_longitude_compression_off_equator() {
        let circle = CircleOverlay::new("c", (45.0, 10.0), 1000.0, CircleOptions::default());
        let ratio = circle.lng_radius() / circle.lat_radius();
        assert!(circle.lng_radius() > circle.lat_radius());
        assert!((ratio - std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_project_pixel_radius() {
        let circle = CircleOverlay::new("c", (0.0, 0.0), 1000.0, CircleOptions::default());
        let projection = linear(10_000.0);
        let screen = circle.project(&projection).unwrap();

        let expected = (circle.lng_radius() * 10_000.0).round() as u32;
        assert_eq!(screen.center, Point::new(0.0, 0.0));
        assert_eq!(screen.pixel_radius, expected);
        assert_eq!(screen, circle.project(&projection).unwrap());
    }

    #[test]
    fn test_project_pixel_radius_floor() {
        let circle = CircleOverlay::new("c", (0.0, 0.0), 1.0, CircleOptions::default());
        let screen = circle.project(&linear(1.0)).unwrap();
        assert_eq!(screen.pixel_radius, 1);
    }

    #[test]
    fn test_project_past_pole_is_rejected() {
        let circle = CircleOverlay::new("c", (100.0, 0.0), 1000.0, CircleOptions::default());
        let viewport = Viewport::default();
        assert!(circle.project(&viewport).is_err());
    }

    #[test]
    fn test_detached_circle_is_never_empty() {
        let circle = CircleOverlay::new("c", (0.0, 50.0), 1000.0, CircleOptions::default());
        let projection = linear(10.0);
        let screen = circle.project(&projection).unwrap();
        assert!(screen.center.x > 400.0);
        assert!(!circle.is_empty(&screen, &projection));
        assert!(!circle.path_string(&screen, &projection, &SvgPathEmitter).is_empty());
    }

    #[test]
    fn test_attached_circle_culling() {
        let projection = linear(10.0);

        let mut far = CircleOverlay::new("far", (0.0, 50.0), 1000.0, CircleOptions::default());
        far.on_add(&projection).unwrap();
        let screen = far.project(&projection).unwrap();
        assert!(far.is_empty(&screen, &projection));
        assert_eq!(far.path_string(&screen, &projection, &SvgPathEmitter), "");

        let mut near = CircleOverlay::new("near", (0.0, 0.0), 1000.0, CircleOptions::default());
        near.on_add(&projection).unwrap();
        let screen = near.project(&projection).unwrap();
        assert!(!near.is_empty(&screen, &projection));
    }

    #[test]
    fn test_svg_and_vml_paths() {
        let circle = CircleOverlay::new("c", (0.0, 0.0), 1000.0, CircleOptions::default());
        let projection = linear(1.0);
        let screen = ScreenProjection {
            center: Point::new(10.25, 20.75),
            pixel_radius: 5,
        };

        let svg = circle.path_string(&screen, &projection, &SvgPathEmitter);
        assert_eq!(svg, "M10.25,15.75A5,5,0,1,1,10.25,25.75A5,5,0,1,1,10.15,15.75 z");

        let vml = circle.path_string(&screen, &projection, &VmlPathEmitter);
        assert_eq!(vml, "AL 10,21 5,5 0,23592600");
    }

    #[test]
    fn test_handlers_enabled_from_options() {
        let journal = Journal::default();
        let circle = CircleOverlay::with_handlers(
            "c",
            (0.0, 0.0),
            1000.0,
            CircleOptions::default().draggable(true),
            handlers(&journal),
        );

        assert!(circle.dragging().unwrap().enabled());
        assert!(!circle.resizing().unwrap().enabled());

        let bare = CircleOverlay::new("b", (0.0, 0.0), 1000.0, CircleOptions::default());
        assert!(bare.dragging().is_none());
        assert!(bare.resizing().is_none());
    }

    #[test]
    fn test_hook_order_on_add_and_remove() {
        let journal = Journal::default();
        let projection = linear(1.0);
        let mut circle = CircleOverlay::with_handlers(
            "c",
            (0.0, 0.0),
            1000.0,
            CircleOptions::default().draggable(true).resizable(true),
            handlers(&journal),
        );

        circle.on_add(&projection).unwrap();
        circle.on_remove(&projection).unwrap();

        assert_eq!(
            journal.entries(),
            vec!["drag:add", "resize:add", "resize:remove", "drag:remove"]
        );
        assert!(!circle.is_attached());
    }

    #[test]
    fn test_disabled_handlers_get_no_hooks() {
        let journal = Journal::default();
        let projection = linear(1.0);
        let mut circle = CircleOverlay::with_handlers(
            "c",
            (0.0, 0.0),
            1000.0,
            CircleOptions::default(),
            handlers(&journal),
        );

        circle.on_remove(&projection).unwrap();
        circle.on_add(&projection).unwrap();
        circle.on_remove(&projection).unwrap();
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn test_set_options_reclamps() {
        let mut circle = CircleOverlay::new("c", (0.0, 0.0), 1500.0, CircleOptions::default());
        circle
            .set_options(serde_json::json!({ "maxLimit": 1000.0 }))
            .unwrap();
        assert_eq!(circle.get_radius(), 1000.0);
        assert_eq!(circle.options()["max_limit"], 1000.0);
        assert!(circle.set_options(serde_json::json!({ "weight": "heavy" })).is_err());
    }

    #[test]
    fn test_contains() {
        let circle = CircleOverlay::new("c", (0.0, 0.0), 1000.0, CircleOptions::default());
        assert!(circle.contains(&LatLng::new(0.0, 0.005)));
        assert!(!circle.contains(&LatLng::new(0.0, 0.02)));
    }

    #[test]
    fn test_custom_metric() {
        struct Flat;
        impl MetersToDegrees for Flat {
            fn lat_degrees(&self, meters: f64) -> f64 {
                meters / 1000.0
            }
            fn lng_degrees(&self, meters: f64, _latitude: f64) -> f64 {
                meters / 1000.0
            }
        }

        let circle = CircleOverlay::new("c", (60.0, 0.0), 1000.0, CircleOptions::default())
            .with_metric(Box::new(Flat));
        assert_eq!(circle.get_bounds(), LatLngBounds::from_coords(59.0, -1.0, 61.0, 1.0));
    }
}
