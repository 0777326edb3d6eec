//! Address search results and typed-in coordinates.

use geo::Point;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::models::types::{Result, TransitError};

/// One geocoder hit, ready for the address picker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddressMatch {
    pub address: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl AddressMatch {
    pub fn location(&self) -> Point {
        Point::new(self.coordinates[0], self.coordinates[1])
    }
}

/// Flatten a geocoder response into address matches.
///
/// Features without a `label` property or without a point geometry are
/// skipped.
pub fn parse_search_results(results: Option<&FeatureCollection>) -> Vec<AddressMatch> {
    let Some(results) = results else {
        return Vec::new();
    };

    let matches: Vec<AddressMatch> = results
        .features
        .iter()
        .filter_map(|feature| {
            let address = feature.property("label")?.as_str()?.to_owned();
            let geometry = feature.geometry.as_ref()?;
            match &geometry.value {
                geojson::Value::Point(position) if position.len() >= 2 => Some(AddressMatch {
                    address,
                    coordinates: [position[0], position[1]],
                }),
                _ => None,
            }
        })
        .collect();

    let skipped = results.features.len() - matches.len();
    if skipped > 0 {
        tracing::warn!("skipped {skipped} search results without a label or point geometry");
    }

    matches
}

/// Parse `"lon,lat"` as typed into the search box.
pub fn parse_coordinates(text: &str) -> Result<Point> {
    let invalid = || TransitError::InvalidCoordinates(text.to_owned());

    let parts: Vec<f64> = text
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<_>>()?;

    match parts.as_slice() {
        [lon, lat] => Ok(Point::new(*lon, *lat)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_results() {
        let collection: FeatureCollection = serde_json::from_str(r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "label": "100 Queen St W, Toronto" },
                    "geometry": { "type": "Point", "coordinates": [-79.3841, 43.6525] }
                },
                {
                    "type": "Feature",
                    "properties": { "name": "no label" },
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
                },
                {
                    "type": "Feature",
                    "properties": { "label": "Union Station" },
                    "geometry": { "type": "Point", "coordinates": [-79.3806, 43.6453] }
                }
            ]
        }"#)
        .unwrap();

        let matches = parse_search_results(Some(&collection));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].address, "100 Queen St W, Toronto");
        assert_eq!(matches[0].coordinates, [-79.3841, 43.6525]);
        assert_eq!(matches[1].location(), Point::new(-79.3806, 43.6453));
    }

    #[test]
    fn test_missing_results() {
        assert!(parse_search_results(None).is_empty());
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            parse_coordinates("-79.38, 43.65").unwrap(),
            Point::new(-79.38, 43.65)
        );
        assert!(parse_coordinates("-79.38").is_err());
        assert!(parse_coordinates("1,2,3").is_err());
        assert!(matches!(
            parse_coordinates("abc,1"),
            Err(TransitError::InvalidCoordinates(_))
        ));
    }
}
