//! Raw segment to canonical trip.

use crate::models::types::{RawTripSegment, Trip};

impl From<RawTripSegment> for Trip {
    /// Keeps only the next departure and arrival; every other field is
    /// carried over as-is and the transfer list starts empty.
    fn from(raw: RawTripSegment) -> Self {
        let RawTripSegment {
            trip_id,
            trip_headsign,
            route_id,
            start_stop_id,
            start_stop_name,
            end_stop_id,
            end_stop_name,
            start_stop_lon,
            start_stop_lat,
            end_stop_lon,
            end_stop_lat,
            stop_coordinates,
            departure_times,
            arrival_times,
            is_delayed,
            delay_min,
        } = raw;

        Trip {
            trip_id,
            trip_headsign,
            route_id,
            start_stop_id,
            start_stop_name,
            end_stop_id,
            end_stop_name,
            start_stop_lon,
            start_stop_lat,
            end_stop_lon,
            end_stop_lat,
            stop_coordinates,
            departure_time: departure_times.into_iter().next(),
            arrival_time: arrival_times.into_iter().next(),
            is_delayed,
            delay_min,
            transfers: Vec::new(),
        }
    }
}

pub fn normalize(raw: RawTripSegment) -> Trip {
    Trip::from(raw)
}
