//! Nest connecting trips under the trip they continue.
//!
//! One pass over every ordered pair of consolidated trips: when A ends where
//! B starts, a copy of B goes into `A.transfers` and B is marked. Marked
//! trips are dropped from the top level only after the pass, so a trip that
//! has already been nested can still receive or provide transfers. Nested
//! copies are never linked further.

use std::collections::HashMap;

use crate::identifiers::StopIdentifier;
use crate::models::types::Trip;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkerConfig {
    /// Allow a trip that starts and ends at the same stop to be nested
    /// under itself. Off by default: a loop is not a transfer.
    pub allow_self_transfers: bool,
}

/// Link transfers in place and return the remaining top-level trips.
pub fn link_transfers(mut trips: Vec<Trip>, config: &LinkerConfig) -> Vec<Trip> {
    // Trips by start stop, in collection order
    let mut by_start: HashMap<StopIdentifier, Vec<usize>> = HashMap::new();
    for (i, trip) in trips.iter().enumerate() {
        by_start.entry(trip.start_stop_id.clone()).or_default().push(i);
    }

    let mut nested = vec![false; trips.len()];
    let mut links = 0usize;

    for a in 0..trips.len() {
        let Some(candidates) = by_start.get(&trips[a].end_stop_id) else {
            continue;
        };

        for &b in candidates {
            if a == b && !config.allow_self_transfers {
                continue;
            }

            let (start, end) = (&trips[b].start_stop_id, &trips[b].end_stop_id);
            if trips[a].has_transfer_between(start, end) {
                continue;
            }

            let transfer = trips[b].clone();
            trips[a].transfers.push(transfer);
            nested[b] = true;
            links += 1;
        }
    }

    let before = trips.len();
    let remaining: Vec<Trip> = trips
        .into_iter()
        .zip(nested)
        .filter_map(|(trip, nested)| (!nested).then_some(trip))
        .collect();

    tracing::debug!(
        links,
        removed = before - remaining.len(),
        remaining = remaining.len(),
        "linked transfers"
    );

    remaining
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(id: &str, start: &str, end: &str) -> Trip {
        Trip {
            trip_id: id.into(),
            route_id: format!("route-{id}").as_str().into(),
            start_stop_id: start.into(),
            end_stop_id: end.into(),
            departure_time: Some("08:00".into()),
            ..Default::default()
        }
    }

    fn ids(trips: &[Trip]) -> Vec<&str> {
        trips.iter().map(|t| t.trip_id.as_str()).collect()
    }

    #[test]
    fn test_single_transfer() {
        let a = trip("A", "S1", "S2");
        let b = trip("B", "S2", "S3");

        let linked = link_transfers(vec![a, b.clone()], &LinkerConfig::default());

        assert_eq!(ids(&linked), vec!["A"]);
        assert_eq!(linked[0].transfers, vec![b]);
    }

    #[test]
    fn test_shared_transfer_removed_once() {
        let a = trip("A", "S1", "S2");
        let c = trip("C", "S9", "S2");
        let b = trip("B", "S2", "S3");

        let linked = link_transfers(vec![a, b.clone(), c], &LinkerConfig::default());

        assert_eq!(ids(&linked), vec!["A", "C"]);
        assert_eq!(linked[0].transfers, vec![b.clone()]);
        assert_eq!(linked[1].transfers, vec![b]);
    }

    #[test]
    fn test_no_matches_is_identity() {
        let trips = vec![trip("A", "S1", "S2"), trip("B", "S3", "S4"), trip("C", "S5", "S6")];

        let linked = link_transfers(trips.clone(), &LinkerConfig::default());

        assert_eq!(linked, trips);
        assert!(linked.iter().all(|t| t.transfers.is_empty()));
    }

    #[test]
    fn test_duplicate_leg_is_skipped() {
        // Same stops, different route: only the first is nested
        let a = trip("A", "S1", "S2");
        let b1 = trip("B1", "S2", "S3");
        let b2 = trip("B2", "S2", "S3");

        let linked = link_transfers(vec![a, b1, b2], &LinkerConfig::default());

        assert_eq!(ids(&linked), vec!["A", "B2"]);
        assert_eq!(ids(&linked[0].transfers), vec!["B1"]);
    }

    #[test]
    fn test_chain_is_one_level_deep() {
        let a = trip("A", "S1", "S2");
        let b = trip("B", "S2", "S3");
        let c = trip("C", "S3", "S4");

        let linked = link_transfers(vec![a, b, c], &LinkerConfig::default());

        // B and C are both nested; A keeps B, and B's copy was taken before
        // B received C
        assert_eq!(ids(&linked), vec!["A"]);
        assert_eq!(ids(&linked[0].transfers), vec!["B"]);
        assert!(linked[0].transfers[0].transfers.is_empty());
    }

    #[test]
    fn test_copy_taken_at_link_time() {
        // B is scanned first and picks up C before A copies it
        let b = trip("B", "S2", "S3");
        let c = trip("C", "S3", "S4");
        let a = trip("A", "S1", "S2");

        let linked = link_transfers(vec![b, c, a], &LinkerConfig::default());

        assert_eq!(ids(&linked), vec!["A"]);
        let nested_b = &linked[0].transfers[0];
        assert_eq!(nested_b.trip_id.as_str(), "B");
        assert_eq!(ids(&nested_b.transfers), vec!["C"]);
        assert!(nested_b.transfers[0].transfers.is_empty());
    }

    #[test]
    fn test_mutual_transfers() {
        let a = trip("A", "S1", "S2");
        let b = trip("B", "S2", "S1");

        let linked = link_transfers(vec![a, b], &LinkerConfig::default());

        // Each is nested under the other, so neither stays on top
        assert!(linked.is_empty());
    }

    #[test]
    fn test_self_pair_excluded_by_default() {
        let looped = trip("L", "S1", "S1");

        let linked = link_transfers(vec![looped.clone()], &LinkerConfig::default());
        assert_eq!(linked, vec![looped]);
    }

    #[test]
    fn test_self_pair_when_allowed() {
        let looped = trip("L", "S1", "S1");
        let config = LinkerConfig {
            allow_self_transfers: true,
        };

        let linked = link_transfers(vec![looped], &config);
        assert!(linked.is_empty());
    }

    #[test]
    fn test_loop_still_links_to_others() {
        let looped = trip("L", "S1", "S1");
        let onward = trip("O", "S1", "S2");

        let linked = link_transfers(vec![looped, onward], &LinkerConfig::default());

        assert_eq!(ids(&linked), vec!["L"]);
        assert_eq!(ids(&linked[0].transfers), vec!["O"]);
    }
}
