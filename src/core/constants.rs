//! Core constants derived from Leaflet defaults and common web-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Equatorial circumference of the Earth in meters, used to turn a metric
/// radius into degrees on a spherical Earth.
pub const EARTH_CIRCUMFERENCE_METERS: f64 = 40_075_017.0;

/// Web Mercator sphere radius (EPSG:3857).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Latitude where Web Mercator maps to a square world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Fraction of the map size added around the viewport before paths are clipped
/// (SVG renderer).
pub const CLIP_PADDING: f64 = 0.5;

/// The legacy VML renderer does not clip with padding.
pub const VML_CLIP_PADDING: f64 = 0.0;

/// Horizontal offset of the closing point of an SVG circle path, so the final
/// arc never has coincident endpoints.
pub const ARC_CLOSE_OFFSET: f64 = 0.1;

/// VML angles are fixed-point with 16 fractional bits; this is a full turn.
pub const VML_FULL_SWEEP: u32 = 65_535 * 360;
