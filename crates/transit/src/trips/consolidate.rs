//! Flatten, deduplicate and merge raw trip segments.
//!
//! Segments are visited depth-first, left to right, using an explicit stack
//! so arbitrarily deep payloads never grow the call stack. The visiting
//! order decides which duplicate wins a tie, so it must not change.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::time::compare_time_strings;
use crate::models::types::{RawTripSegment, Trip, TripInput, TripKey};

/// Accumulates consolidated trips in discovery order.
///
/// `trips` is the arena; `index` maps each identity key to its slot so
/// merges update the existing entry in place.
#[derive(Debug, Default)]
pub struct TripConsolidator {
    trips: Vec<Trip>,
    index: HashMap<TripKey, usize>,
    merged: usize,
    replaced: usize,
}

impl TripConsolidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Normalize one segment and merge it into the collection.
    pub fn push(&mut self, raw: RawTripSegment) {
        let candidate = Trip::from(raw);
        let key = candidate.key();

        match self.index.get(&key) {
            Some(&slot) => {
                self.merged += 1;
                let existing = &mut self.trips[slot];
                if is_preferred(&candidate, existing) {
                    self.replaced += 1;
                    existing.trip_id = candidate.trip_id;
                    existing.departure_time = candidate.departure_time;
                    existing.arrival_time = candidate.arrival_time;
                    existing.is_delayed = candidate.is_delayed;
                    existing.delay_min = candidate.delay_min;
                }
            }
            None => {
                self.index.insert(key, self.trips.len());
                self.trips.push(candidate);
            }
        }
    }

    /// Walk a nested payload depth-first, left to right.
    pub fn extend<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = TripInput>,
    {
        let mut stack: Vec<std::vec::IntoIter<TripInput>> =
            vec![inputs.into_iter().collect::<Vec<_>>().into_iter()];

        while let Some(frame) = stack.last_mut() {
            match frame.next() {
                Some(TripInput::Segment(raw)) => self.push(*raw),
                Some(TripInput::Group(items)) => stack.push(items.into_iter()),
                None => {
                    stack.pop();
                }
            }
        }
    }

    pub fn finish(self) -> Vec<Trip> {
        tracing::debug!(
            trips = self.trips.len(),
            merged = self.merged,
            replaced = self.replaced,
            "consolidated trip segments"
        );
        self.trips
    }
}

/// Whether `candidate` should replace the schedule fields of `existing`.
///
/// An earlier departure wins; equal departures fall back to the lower trip
/// id (see [`TripIdentifier`](crate::identifiers::TripIdentifier)'s `Ord`).
/// A candidate whose departure cannot be compared never wins.
pub fn is_preferred(candidate: &Trip, existing: &Trip) -> bool {
    match compare_time_strings(
        candidate.departure_time.as_deref(),
        existing.departure_time.as_deref(),
    ) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => candidate.trip_id < existing.trip_id,
        _ => false,
    }
}

/// Consolidate a nested payload in one call.
pub fn consolidate<I>(inputs: I) -> Vec<Trip>
where
    I: IntoIterator<Item = TripInput>,
{
    let mut consolidator = TripConsolidator::new();
    consolidator.extend(inputs);
    consolidator.finish()
}
