//! Point-in-polygon test (ray casting, odd-even rule).
//!
//! Edges count as crossed only when the point's latitude lies in the
//! half-open interval between the edge's endpoints. Points on the boundary
//! therefore get a fixed but asymmetric answer: the south-west edges of a
//! square are inside, the north-east edges are not.

use geo::{Coord, LineString, Point, Polygon};

/// Whether `point` lies inside the ring formed by `vertices`.
///
/// The ring may or may not repeat its first vertex at the end. Rings with
/// fewer than three distinct vertices contain nothing.
pub fn ring_contains(vertices: &[Coord], point: Point) -> bool {
    let vertices = open_ring(vertices);
    if vertices.len() < 3 {
        return false;
    }

    let (x, y) = (point.x(), point.y());
    let mut inside = false;

    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);

        if (yi <= y && y < yj) || (yj <= y && y < yi) {
            let intercept = (xj - xi) * (y - yi) / (yj - yi) + xi;
            if x < intercept {
                inside = !inside;
            }
        }

        j = i;
    }

    inside
}

/// Tests against the exterior ring only; holes are ignored.
pub fn polygon_contains(polygon: &Polygon, point: Point) -> bool {
    line_string_contains(polygon.exterior(), point)
}

pub fn line_string_contains(ring: &LineString, point: Point) -> bool {
    ring_contains(&ring.0, point)
}

/// Drops the closing vertex if the ring repeats its start.
fn open_ring(vertices: &[Coord]) -> &[Coord] {
    match vertices {
        [first, .., last] if first == last => &vertices[..vertices.len() - 1],
        _ => vertices,
    }
}
