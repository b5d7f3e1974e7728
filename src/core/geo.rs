use crate::core::constants::{EARTH_CIRCUMFERENCE_METERS, EARTH_RADIUS_METERS, MAX_LATITUDE};
use crate::traits::MetersToDegrees;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Clamps latitude to the Web Mercator range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let x = self.lng.to_radians() * EARTH_RADIUS_METERS;
        let y = (std::f64::consts::FRAC_PI_4 + self.lat.to_radians() / 2.0)
            .tan()
            .ln()
            * EARTH_RADIUS_METERS;
        Point::new(x, y)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// `(lat, lng)` pairs, the tuple form callers usually have at hand.
impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// `[lat, lng]` arrays, as found in GeoJSON-adjacent configs.
impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

// geo-types is x/y ordered, so x = lng and y = lat.
impl From<LatLng> for geo_types::Coord<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::coord! { x: lat_lng.lng, y: lat_lng.lat }
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::Point::new(lat_lng.lng, lat_lng.lat)
    }
}

impl From<geo_types::Coord<f64>> for LatLng {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }

    pub fn round(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Checks if the bounds intersect with another bounds
    pub fn intersects(&self, other: &LatLngBounds) -> bool {
        !(other.north_east.lat < self.south_west.lat
            || other.south_west.lat > self.north_east.lat
            || other.north_east.lng < self.south_west.lng
            || other.south_west.lng > self.north_east.lng)
    }

    /// Whether both corners are finite coordinates
    pub fn is_finite(&self) -> bool {
        [self.south_west, self.north_east]
            .iter()
            .all(|c| c.lat.is_finite() && c.lng.is_finite())
    }
}

impl From<LatLngBounds> for geo_types::Rect<f64> {
    fn from(bounds: LatLngBounds) -> Self {
        geo_types::Rect::new(
            geo_types::Coord::from(bounds.south_west),
            geo_types::Coord::from(bounds.north_east),
        )
    }
}

/// Meters to degrees on a sphere with the Earth's equatorial circumference.
///
/// Good enough for web maps; the longitude delta diverges towards the poles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SphericalEarth;

impl MetersToDegrees for SphericalEarth {
    fn lat_degrees(&self, meters: f64) -> f64 {
        (meters / EARTH_CIRCUMFERENCE_METERS) * 360.0
    }
}
