//! Region filtering and small geodesic helpers.

use geo::{Point, Polygon};

use crate::models::traits::Located;
use crate::spatial::containment::polygon_contains;

/// Stops inside `region`, preserving input order.
pub fn stops_in_polygon<'a, T: Located>(stops: &'a [T], region: &Polygon) -> Vec<&'a T> {
    stops
        .iter()
        .filter(|stop| polygon_contains(region, stop.location()))
        .collect()
}

/// Owned variant of [`stops_in_polygon`] for callers that hand the result on.
pub fn filter_stops<T: Located + Clone>(stops: &[T], region: &Polygon) -> Vec<T> {
    stops_in_polygon(stops, region).into_iter().cloned().collect()
}

/// Great-circle midpoint between two points, used to centre the map on a
/// journey.
pub fn spherical_midpoint(a: Point, b: Point) -> Point {
    let (lon1, lat1) = (a.x().to_radians(), a.y().to_radians());
    let (lon2, lat2) = (b.x().to_radians(), b.y().to_radians());

    let x = (lat1.cos() * lon1.cos() + lat2.cos() * lon2.cos()) / 2.0;
    let y = (lat1.cos() * lon1.sin() + lat2.cos() * lon2.sin()) / 2.0;
    let z = (lat1.sin() + lat2.sin()) / 2.0;

    let lon = y.atan2(x);
    let lat = z.atan2((x * x + y * y).sqrt());

    Point::new(lon.to_degrees(), lat.to_degrees())
}
