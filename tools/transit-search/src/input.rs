use anyhow::{Context, Result};
use geo::Polygon;
use std::path::Path;
use transit_search_core::models::{Stop, TripInput};
use transit_search_core::spatial::parse_region;
use transit_search_core::trips::parse_trip_payload;

/// Read a search region from a GeoJSON file
pub fn read_region(path: &Path) -> Result<Polygon<f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read region file: {}", path.display()))?;

    parse_region(&content)
        .with_context(|| format!("No valid region polygon in: {}", path.display()))
}

/// Read a JSON array of stops
pub fn read_stops(path: &Path) -> Result<Vec<Stop>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stops file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse stops from: {}", path.display()))
}

/// Read a trip search payload (nested arrays of trip segments, any depth)
pub fn read_trip_payload(path: &Path) -> Result<Vec<TripInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trips file: {}", path.display()))?;

    parse_trip_payload(&content)
        .with_context(|| format!("Failed to parse trips from: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_inputs() {
        let dir = tempfile::tempdir().unwrap();

        let region_path = dir.path().join("region.geojson");
        std::fs::write(
            &region_path,
            r#"{ "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]] } }"#,
        )
        .unwrap();
        assert_eq!(read_region(&region_path).unwrap().exterior().0.len(), 5);

        let stops_path = dir.path().join("stops.json");
        std::fs::write(
            &stops_path,
            r#"[{ "stop_id": "1", "stop_lon": 0.5, "stop_lat": 0.5 }]"#,
        )
        .unwrap();
        assert_eq!(read_stops(&stops_path).unwrap().len(), 1);

        let trips_path = dir.path().join("trips.json");
        std::fs::write(&trips_path, r#"{ "tripId": "1" }"#).unwrap();
        assert_eq!(read_trip_payload(&trips_path).unwrap().len(), 1);
    }

    #[test]
    fn test_read_deeply_nested_trips() {
        let dir = tempfile::tempdir().unwrap();
        let trips_path = dir.path().join("trips.json");

        let depth = 200;
        let payload = format!(
            "{}{{ \"tripId\": \"1\", \"tripHeadsign\": null }}{}",
            "[".repeat(depth),
            "]".repeat(depth)
        );
        std::fs::write(&trips_path, payload).unwrap();

        let trips = read_trip_payload(&trips_path).unwrap();
        assert_eq!(trips.len(), 1);
        assert!(matches!(&trips[0], TripInput::Segment(raw) if raw.trip_id.as_str() == "1"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = read_stops(Path::new("/nonexistent/stops.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read stops file"));
    }
}
