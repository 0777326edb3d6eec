use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde::Serialize;
use std::path::Path;
use transit_search_core::models::{Stop, Trip};

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write JSON to {}", output_path.display()))?;

    Ok(())
}

/// Convert a stop to a GeoJSON point feature carrying its attributes
fn stop_to_feature(stop: &Stop) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![stop.stop_lon, stop.stop_lat]))),
        id: None,
        properties: Some(stop.attributes.clone()),
        foreign_members: None,
    }
}

/// Write stops as a GeoJSON FeatureCollection of points
pub fn write_stops_geojson(stops: &[Stop], output_path: &Path) -> Result<()> {
    log::info!("Writing {} stops to {}", stops.len(), output_path.display());

    let feature_collection = FeatureCollection {
        bbox: None,
        features: stops.iter().map(stop_to_feature).collect(),
        foreign_members: None,
    };

    write_json(&GeoJson::from(feature_collection), output_path)
}

/// Write the trip graph
pub fn write_trip_graph(trips: &[Trip], output_path: &Path) -> Result<()> {
    let transfers: usize = trips.iter().map(|t| t.transfers.len()).sum();
    log::info!(
        "Writing {} trips ({} transfers) to {}",
        trips.len(),
        transfers,
        output_path.display()
    );

    write_json(trips, output_path)
}
