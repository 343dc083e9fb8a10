use std::collections::BTreeSet;

use crate::location::{Location, Position};

/// Every cell covered by `locations`, including cells shared with other sentences.
pub fn highlight(locations: &[Location]) -> BTreeSet<Position> {
    locations.iter().flat_map(Location::cells).collect()
}
