//! # transit-search-core
//!
//! In-memory transforms behind the transit search screens.
//!
//! ## Features
//!
//! - **Region search**: keep the stops that fall inside a user-drawn polygon
//! - **Spatial index**: R-tree backed region and nearest-stop queries
//! - **Trip graph**: merge duplicate trip segments and nest connecting trips
//!   as transfers
//! - **Client helpers**: geocoder results, coordinates, service times, route
//!   colours
//!
//! ## Example
//!
//! ```
//! use transit_search_core::prelude::*;
//!
//! let region = parse_region(
//!     r#"{ "type": "Polygon", "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0]]] }"#,
//! )
//! .unwrap();
//!
//! let stops = vec![Stop::new(5.0, 5.0), Stop::new(15.0, 5.0)];
//! assert_eq!(stops_in_polygon(&stops, &region), vec![&stops[0]]);
//!
//! let first = RawTripSegment {
//!     trip_id: "1".into(),
//!     start_stop_id: "S1".into(),
//!     end_stop_id: "S2".into(),
//!     departure_times: vec!["08:00".into()],
//!     ..Default::default()
//! };
//! let second = RawTripSegment {
//!     trip_id: "2".into(),
//!     start_stop_id: "S2".into(),
//!     end_stop_id: "S3".into(),
//!     departure_times: vec!["08:15".into()],
//!     ..Default::default()
//! };
//!
//! let graph = build_trip_graph(
//!     vec![TripInput::from(first), TripInput::from(second)],
//!     &LinkerConfig::default(),
//! );
//! assert_eq!(graph.len(), 1);
//! assert_eq!(graph[0].transfers[0].trip_id.as_str(), "2");
//! ```

pub mod client;
pub mod identifiers;
pub mod models;
pub mod spatial;
pub mod trips;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{time::*, traits::*, types::*};
    pub use crate::spatial::{
        parse_region, polygon_contains, ring_contains, stops_in_polygon, StopIndex,
    };
    pub use crate::trips::{
        build_trip_graph, consolidate, link_transfers, parse_trip_payload, LinkerConfig,
    };
}

pub use prelude::*;
