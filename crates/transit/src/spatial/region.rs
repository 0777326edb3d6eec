//! User-drawn search regions from GeoJSON.
//!
//! The map's draw tool hands back a GeoJSON Polygon; only its outer ring
//! (`coordinates[0]`) is used.

use geo::{Coord, LineString, Polygon};
use geojson::{GeoJson, Geometry};

use crate::models::types::{Result, TransitError};

/// Parse a region from GeoJSON text.
pub fn parse_region(text: &str) -> Result<Polygon> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| TransitError::InvalidRegion(e.to_string()))?;

    region_from_geojson(geojson)
}

/// Extract a region from a Geometry, a Feature, or the first polygon
/// feature of a FeatureCollection.
pub fn region_from_geojson(geojson: GeoJson) -> Result<Polygon> {
    match geojson {
        GeoJson::Geometry(geometry) => region_from_geometry(&geometry),
        GeoJson::Feature(feature) => match feature.geometry {
            Some(geometry) => region_from_geometry(&geometry),
            None => Err(TransitError::InvalidRegion("Feature has no geometry".into())),
        },
        GeoJson::FeatureCollection(collection) => collection
            .features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .find_map(|geometry| region_from_geometry(geometry).ok())
            .ok_or_else(|| {
                TransitError::InvalidRegion("No polygon found in FeatureCollection".into())
            }),
    }
}

pub fn region_from_geometry(geometry: &Geometry) -> Result<Polygon> {
    match &geometry.value {
        geojson::Value::Polygon(rings) => {
            let exterior = match rings.first() {
                Some(ring) => positions_to_ring(ring)?,
                None => LineString::new(Vec::new()),
            };
            Ok(Polygon::new(exterior, Vec::new()))
        }
        _ => Err(TransitError::InvalidRegion(
            "Geometry is not a Polygon".into(),
        )),
    }
}

fn positions_to_ring(positions: &[Vec<f64>]) -> Result<LineString> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(TransitError::InvalidRegion(format!(
                "Position needs a longitude and a latitude, got {:?}",
                position
            ))),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}
