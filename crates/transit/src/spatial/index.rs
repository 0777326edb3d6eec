//! R-tree over stop positions for region queries.
//!
//! ## Two-Stage Filtering
//!
//! Region queries run in two stages:
//! 1. **R-tree filter**: only stops within the circle around the region's
//!    bounding box are considered
//! 2. **Ray casting**: the exact containment test from
//!    [`containment`](crate::spatial::containment) decides the rest
//!
//! Results come back in the order the stops were indexed, so the answer is
//! identical to a linear [`stops_in_polygon`](crate::spatial::stops_in_polygon)
//! pass over the same slice.

use geo::{BoundingRect, Point, Polygon};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::models::traits::Located;
use crate::spatial::containment::polygon_contains;

// ============================================================================
// Stop Spatial Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct StopNode {
    /// Position of the stop in the indexed slice
    pub index: usize,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(location: Point, index: usize) -> Self {
        Self {
            index,
            point: [location.x(), location.y()],
        }
    }

    pub fn location(&self) -> Point {
        Point::new(self.point[0], self.point[1])
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// Stop Index
// ============================================================================

/// Spatial index over a borrowed slice of located records.
pub struct StopIndex<'a, T> {
    stops: &'a [T],
    tree: RTree<StopNode>,
}

impl<'a, T: Located> StopIndex<'a, T> {
    /// Stops with non-finite coordinates are left out of the tree; they can
    /// never be inside a region anyway.
    pub fn new(stops: &'a [T]) -> Self {
        let nodes: Vec<StopNode> = stops
            .iter()
            .enumerate()
            .map(|(index, stop)| StopNode::new(stop.location(), index))
            .filter(|node| node.point.iter().all(|c| c.is_finite()))
            .collect();

        let skipped = stops.len() - nodes.len();
        if skipped > 0 {
            tracing::warn!("skipped {skipped} stops with non-finite coordinates");
        }

        Self {
            stops,
            tree: RTree::bulk_load(nodes),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Stops inside `region`, in their original order.
    pub fn within(&self, region: &Polygon) -> Vec<&'a T> {
        let Some(rect) = region.bounding_rect() else {
            return Vec::new();
        };

        // Circle around the bounding box; everything in the box is in it
        let center = rect.center();
        let half_width = rect.width() / 2.0;
        let half_height = rect.height() / 2.0;
        let radius_2 = (half_width * half_width + half_height * half_height) * (1.0 + 1e-9)
            + f64::EPSILON;

        let mut hits: Vec<usize> = self
            .tree
            .locate_within_distance([center.x, center.y], radius_2)
            .filter(|node| polygon_contains(region, node.location()))
            .map(|node| node.index)
            .collect();
        hits.sort_unstable();

        tracing::debug!(
            candidates = self.tree.size(),
            matched = hits.len(),
            "region query"
        );

        hits.into_iter().map(|index| &self.stops[index]).collect()
    }

    /// The `n` stops closest to `point` (planar distance in degrees).
    pub fn nearest(&self, point: Point, n: usize) -> Vec<&'a T> {
        self.tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|node| &self.stops[node.index])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Stop;
    use crate::spatial::queries::stops_in_polygon;
    use geo::{polygon, LineString};
    use serde_json::json;

    fn grid() -> Vec<Stop> {
        let mut stops = Vec::new();
        for i in 0..12 {
            for j in 0..12 {
                stops.push(
                    Stop::new(i as f64 - 1.0, j as f64 - 1.0)
                        .with_attribute("stop_id", json!(format!("{i}-{j}"))),
                );
            }
        }
        stops
    }

    #[test]
    fn test_index_matches_linear_filter() {
        let stops = grid();
        let region = polygon![
            (x: 0.0, y: 0.0),
            (x: 8.0, y: 1.0),
            (x: 9.0, y: 7.0),
            (x: 3.0, y: 9.5),
        ];

        let index = StopIndex::new(&stops);
        let indexed = index.within(&region);
        let linear = stops_in_polygon(&stops, &region);

        assert!(!indexed.is_empty());
        assert_eq!(indexed, linear);
    }

    #[test]
    fn test_empty_region() {
        let stops = grid();
        let index = StopIndex::new(&stops);
        let empty = Polygon::new(LineString::new(Vec::new()), Vec::new());

        assert!(index.within(&empty).is_empty());
    }

    #[test]
    fn test_skips_non_finite_stops() {
        let stops = vec![
            Stop::new(1.0, 1.0),
            Stop::new(f64::NAN, 1.0),
            Stop::new(2.0, f64::INFINITY),
        ];
        let index = StopIndex::new(&stops);

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_nearest() {
        let stops = vec![Stop::new(0.0, 0.0), Stop::new(5.0, 5.0), Stop::new(1.0, 1.0)];
        let index = StopIndex::new(&stops);

        let nearest = index.nearest(Point::new(0.2, 0.2), 2);
        assert_eq!(nearest, vec![&stops[0], &stops[2]]);
    }
}
