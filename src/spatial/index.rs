use crate::core::geo::LatLngBounds;

use rstar::{RTree, RTreeObject, AABB};

/// A spatial item that can be indexed via an R-tree.
///
/// Envelopes are stored x = lng, y = lat.
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub id: String,
    pub bounds: LatLngBounds,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(id: String, bounds: LatLngBounds, data: T) -> Self {
        Self { id, bounds, data }
    }
}

impl<T> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for SpatialItem<T> {}

// --- rstar integration -------------------------------------------------------------------------

fn envelope_of(bounds: &LatLngBounds) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [bounds.south_west.lng, bounds.south_west.lat],
        [bounds.north_east.lng, bounds.north_east.lat],
    )
}

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.bounds)
    }
}

/// R-tree index over the geographic bounds of map overlays
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T: Clone> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    /// Inserts an item, replacing any previous item with the same id
    pub fn insert(&mut self, item: SpatialItem<T>) {
        self.remove(&item.id);
        self.rtree.insert(item);
    }

    /// Items whose bounds intersect `bounds` (touching counts)
    pub fn query(&self, bounds: &LatLngBounds) -> Vec<&SpatialItem<T>> {
        self.rtree
            .locate_in_envelope_intersecting(&envelope_of(bounds))
            .collect()
    }

    pub fn remove(&mut self, id: &str) -> Option<SpatialItem<T>> {
        // First find the element immutably, clone it, then remove mutably.
        let found = self.rtree.iter().find(|obj| obj.id == id).cloned();
        found.and_then(|item| self.rtree.remove(&item))
    }

    /// Union of every indexed bounds
    pub fn bounds(&self) -> Option<LatLngBounds> {
        if self.rtree.size() == 0 {
            return None;
        }
        let env = self.rtree.root().envelope();
        Some(LatLngBounds::from_coords(
            env.lower()[1],
            env.lower()[0],
            env.upper()[1],
            env.upper()[0],
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn clear(&mut self) {
        self.rtree = RTree::new();
    }
}

impl<T: Clone> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
