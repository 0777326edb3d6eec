//! Small helpers the search screens share with the core.

pub mod journey;
pub mod palette;
pub mod search;

pub use journey::encode_journey_params;
pub use palette::{random_route_color, ROUTE_COLORS};
pub use search::{parse_coordinates, parse_search_results, AddressMatch};
