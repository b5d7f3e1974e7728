use crate::core::{bounds::Bounds, geo::Point};

/// Simple axis-aligned culling helper.
///
/// The current implementation is 2-D (screen-space).
pub struct Culling;

impl Culling {
    /// Returns `true` if the supplied rectangle is at least partially inside the viewport.
    pub fn aabb_intersects(viewport: &Bounds, target: &Bounds) -> bool {
        viewport.intersects(target)
    }

    /// Returns `true` when the bounding square of a circle lies entirely outside
    /// the viewport. A square that merely touches an edge is kept.
    pub fn circle_outside(viewport: &Bounds, center: &Point, radius: f64) -> bool {
        !Self::aabb_intersects(viewport, &Bounds::around(*center, radius))
    }
}
