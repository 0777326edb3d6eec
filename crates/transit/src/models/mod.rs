//! Stop and trip records, shared traits, and service-day times.

pub mod time;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use time::{compare_time_strings, ServiceTime};
pub use traits::Located;
pub use types::{RawTripSegment, Result, Stop, TransitError, Trip, TripInput, TripKey};
