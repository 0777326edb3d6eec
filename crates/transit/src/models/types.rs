//! Core record types for stops and trips.
//!
//! Field names on the serialized forms are part of the client contract:
//! the map and itinerary views read them directly.

use geo::Point;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::identifiers::*;
use crate::models::traits::Located;

// ============================================================================
// Stops
// ============================================================================

/// A transit stop as delivered by the stop search endpoint.
///
/// Only the coordinates are interpreted; everything else is carried through
/// untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_lon: f64,
    pub stop_lat: f64,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Stop {
    pub fn new(stop_lon: f64, stop_lat: f64) -> Self {
        Self {
            stop_lon,
            stop_lat,
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Located for Stop {
    fn location(&self) -> Point {
        Point::new(self.stop_lon, self.stop_lat)
    }
}

// ============================================================================
// Trips
// ============================================================================

/// One trip segment between two stops, as returned by the live trip search.
///
/// `departure_times`/`arrival_times` list every upcoming run; only the first
/// one survives normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTripSegment {
    pub trip_id: TripIdentifier,
    #[serde(deserialize_with = "null_as_default")]
    pub trip_headsign: String,
    pub route_id: RouteIdentifier,
    pub start_stop_id: StopIdentifier,
    #[serde(deserialize_with = "null_as_default")]
    pub start_stop_name: String,
    pub end_stop_id: StopIdentifier,
    #[serde(deserialize_with = "null_as_default")]
    pub end_stop_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_stop_lon: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub start_stop_lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub end_stop_lon: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub end_stop_lat: f64,
    pub stop_coordinates: serde_json::Value,
    #[serde(deserialize_with = "null_as_default")]
    pub departure_times: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub arrival_times: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_delayed: bool,
    #[serde(
        deserialize_with = "null_as_default",
        serialize_with = "serialize_delay"
    )]
    pub delay_min: f64,
}

/// A consolidated trip with its directly connecting transfers.
///
/// `transfers` holds copies, never references back into the top-level
/// collection, so a trip graph is always a tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trip {
    pub trip_id: TripIdentifier,
    #[serde(deserialize_with = "null_as_default")]
    pub trip_headsign: String,
    pub route_id: RouteIdentifier,
    pub start_stop_id: StopIdentifier,
    #[serde(deserialize_with = "null_as_default")]
    pub start_stop_name: String,
    pub end_stop_id: StopIdentifier,
    #[serde(deserialize_with = "null_as_default")]
    pub end_stop_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_stop_lon: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub start_stop_lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub end_stop_lon: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub end_stop_lat: f64,
    pub stop_coordinates: serde_json::Value,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_delayed: bool,
    #[serde(
        deserialize_with = "null_as_default",
        serialize_with = "serialize_delay"
    )]
    pub delay_min: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub transfers: Vec<Trip>,
}

impl Trip {
    pub fn key(&self) -> TripKey {
        TripKey {
            start_stop_id: self.start_stop_id.clone(),
            end_stop_id: self.end_stop_id.clone(),
            route_id: self.route_id.clone(),
            trip_headsign: self.trip_headsign.clone(),
        }
    }

    pub fn start_location(&self) -> Point {
        Point::new(self.start_stop_lon, self.start_stop_lat)
    }

    /// Whether `transfers` already holds a leg between the same two stops.
    pub fn has_transfer_between(&self, start: &StopIdentifier, end: &StopIdentifier) -> bool {
        self.transfers
            .iter()
            .any(|t| &t.start_stop_id == start && &t.end_stop_id == end)
    }
}

impl Located for Trip {
    fn location(&self) -> Point {
        self.start_location()
    }
}

/// Identity of a trip for consolidation purposes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TripKey {
    pub start_stop_id: StopIdentifier,
    pub end_stop_id: StopIdentifier,
    pub route_id: RouteIdentifier,
    pub trip_headsign: String,
}

/// Trip search results arrive as arbitrarily nested arrays of segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TripInput {
    Group(Vec<TripInput>),
    Segment(Box<RawTripSegment>),
}

impl From<RawTripSegment> for TripInput {
    fn from(segment: RawTripSegment) -> Self {
        TripInput::Segment(Box::new(segment))
    }
}

impl From<Vec<TripInput>> for TripInput {
    fn from(items: Vec<TripInput>) -> Self {
        TripInput::Group(items)
    }
}

/// `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whole delays go back out as integers, the way the search payload sends them.
fn serialize_delay<S: Serializer>(
    delay: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if delay.fract() == 0.0 && delay.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*delay as i64)
    } else {
        serializer.serialize_f64(*delay)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TransitError>;
