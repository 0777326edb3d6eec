//! Path parameters for the journey planner endpoint.

use geo::Point;

/// Encode origin and destination as the planner's path segment.
///
/// Produces `startLat%3A{lat}%2CstartLon%3A{lon}/endLat%3A{lat}%2CendLon%3A{lon}`.
pub fn encode_journey_params(from: Point, to: Point) -> String {
    format!(
        "startLat%3A{}%2CstartLon%3A{}/endLat%3A{}%2CendLon%3A{}",
        from.y(),
        from.x(),
        to.y(),
        to.x()
    )
}
