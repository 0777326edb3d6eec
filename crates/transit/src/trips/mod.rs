//! Trip search results to a compact trip graph.
//!
//! [`build_trip_graph`] runs the two stages back to back:
//! [`consolidate`] collapses duplicate segments, then [`link_transfers`]
//! nests connecting trips one level deep.

pub mod consolidate;
pub mod link;
pub mod normalize;
pub mod payload;

pub use consolidate::{consolidate, is_preferred, TripConsolidator};
pub use link::{link_transfers, LinkerConfig};
pub use normalize::normalize;
pub use payload::{flatten_payload, parse_trip_payload};

use crate::models::types::{Trip, TripInput};

pub fn build_trip_graph<I>(inputs: I, config: &LinkerConfig) -> Vec<Trip>
where
    I: IntoIterator<Item = TripInput>,
{
    link_transfers(consolidate(inputs), config)
}
