//! Trip search payloads from JSON text.
//!
//! Payloads nest arrays of segments to any depth. The text is read without
//! serde_json's recursion limit and the nesting is then unpacked with an
//! explicit stack, so no depth is rejected up front.

use serde::Deserialize;
use serde_json::Value;

use crate::models::types::{RawTripSegment, Result, TransitError, TripInput};

/// Parse a trip search payload into a flat, depth-first list of segments.
///
/// Flattening keeps discovery order, and consolidation only depends on that
/// order, so the result builds the same trip graph as the nested form. A
/// single top-level segment is accepted as a one-element payload.
pub fn parse_trip_payload(json: &str) -> Result<Vec<TripInput>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;

    flatten_payload(value)
}

/// Unpack an already parsed payload. Arrays are moved onto the stack as
/// they are reached, so the nesting is taken apart one level at a time.
pub fn flatten_payload(payload: Value) -> Result<Vec<TripInput>> {
    let mut segments = Vec::new();
    let mut stack = vec![vec![payload].into_iter()];

    while let Some(items) = stack.last_mut() {
        match items.next() {
            Some(Value::Array(nested)) => stack.push(nested.into_iter()),
            Some(record @ Value::Object(_)) => {
                let raw: RawTripSegment = serde_json::from_value(record)?;
                segments.push(TripInput::from(raw));
            }
            Some(other) => {
                return Err(TransitError::InvalidData(format!(
                    "expected a trip segment or an array, found {}",
                    json_kind(&other)
                )));
            }
            None => {
                stack.pop();
            }
        }
    }

    tracing::debug!(segments = segments.len(), "trip payload read");
    Ok(segments)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
