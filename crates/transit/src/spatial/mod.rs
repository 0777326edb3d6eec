//! Region containment, stop filtering and spatial indexing.

pub mod containment;
pub mod index;
pub mod queries;
pub mod region;

pub use containment::{line_string_contains, polygon_contains, ring_contains};
pub use index::StopIndex;
pub use queries::{filter_stops, spherical_midpoint, stops_in_polygon};
pub use region::{parse_region, region_from_geojson};
