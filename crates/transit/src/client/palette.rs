//! Route line colours.

use rand::Rng;

/// High-contrast colours for drawing routes on the map.
pub const ROUTE_COLORS: [&str; 10] = [
    "#FF0000", "#FF8700", "#FFD300", "#DEFF0A", "#A1FF0A", "#0AFF99", "#0AEFFF", "#147DF5",
    "#580AFF", "#BE0AFF",
];

/// Pick a route colour from the caller's random source.
pub fn random_route_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ROUTE_COLORS[rng.random_range(0..ROUTE_COLORS.len())]
}
