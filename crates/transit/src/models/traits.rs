//! Traits shared by spatial and trip records.

use geo::Point;

/// Anything with a single geographic position (longitude, latitude).
///
/// The spatial filter only needs this, so callers can filter their own
/// record types without converting them into [`Stop`](crate::models::Stop)s.
pub trait Located {
    fn location(&self) -> Point;
}

impl Located for Point {
    fn location(&self) -> Point {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> Point {
        (**self).location()
    }
}
