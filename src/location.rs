use std::collections::HashSet;
use std::num::NonZero;

use ndarray::Ix;
use serde::Serialize;

use crate::direction::Direction;

pub(crate) type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Serialize)]
/// A position `(x, y)` on a grid. The top left corner is `Position(0, 0)`.
///
/// Serializes as the pair `[x, y]`.
pub struct Position(pub Coord, pub Coord);

impl Position {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn distance_to(&self, other: Position) -> f64 {
        let dx = self.0.abs_diff(other.0) as f64;
        let dy = self.1.abs_diff(other.1) as f64;
        dx.hypot(dy)
    }

    /// Squared distance from the origin. Orders identically to the Euclidean distance without leaving integers.
    pub(crate) fn origin_rank(&self) -> Coord {
        self.0 * self.0 + self.1 * self.1
    }

    /// This position as seen on a grid of `dims` rotated by 180 degrees.
    pub(crate) fn mirrored(&self, dims: (Coord, Coord)) -> Self {
        Self(dims.0 - 1 - self.0, dims.1 - 1 - self.1)
    }
}

impl From<(Ix, Ix)> for Position {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

/// Where a single word sits on the grid: start `(xs, ys)`, end `(xe, ye)` and unit step `(xd, yd)`.
///
/// Produced once by a successful search and never mutated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Location {
    /// Start column.
    pub xs: Coord,
    /// Start row.
    pub ys: Coord,
    /// End column, inclusive.
    pub xe: Coord,
    /// End row, inclusive.
    pub ye: Coord,
    /// Column step, 1 for words reading right.
    pub xd: Coord,
    /// Row step, 1 for words reading down.
    pub yd: Coord,
}

impl Location {
    /// The empty location at the origin, used as an anchor when nothing has been placed yet.
    pub(crate) const ORIGIN: Self = Self { xs: 0, ys: 0, xe: 0, ye: 0, xd: 0, yd: 0 };

    pub(crate) fn spanning(start: Position, direction: Direction, length: usize) -> Self {
        let end = direction.attempt_from(start, length - 1);
        let (xd, yd) = direction.delta();
        Self { xs: start.0, ys: start.1, xe: end.0, ye: end.1, xd, yd }
    }

    /// First cell of the word.
    pub fn start(&self) -> Position {
        Position(self.xs, self.ys)
    }

    /// Last cell of the word.
    pub fn end(&self) -> Position {
        Position(self.xe, self.ye)
    }

    /// The reading direction, or [`None`] for [`Location::ORIGIN`].
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_delta((self.xd, self.yd))
    }

    /// Number of letters covered. Exactly one of the two deltas is nonzero.
    pub fn length(&self) -> usize {
        1 + (self.xe - self.xs) + (self.ye - self.ys)
    }

    /// Every cell covered, start to end.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.length()).map(move |idx| Position(self.xs + idx * self.xd, self.ys + idx * self.yd))
    }

    /// Cells no later word may start on.
    ///
    /// This is the start itself, the strip alongside the word (below a horizontal word, right of a vertical one),
    /// and the last letter plus the cell just past it, so nothing runs parallel against the word or chains off its end.
    /// Some of these may lie outside the grid.
    pub fn banned(&self) -> HashSet<Position> {
        let direction = self.direction().unwrap_or(Direction::Down);
        let length = self.length();

        let mut rv = HashSet::with_capacity(length + 3);
        rv.insert(self.start());

        let side = direction.across().attempt_from(self.start(), 1);
        rv.extend((0..length).map(|idx| direction.attempt_from(side, idx)));

        // the last letter too; a word reading on from it in the same direction would merge with this one
        rv.insert(direction.attempt_from(self.start(), length));
        rv.insert(direction.attempt_from(self.start(), length - 1));

        rv
    }

    /// This location as seen after rotating a grid of `dims` by 180 degrees.
    ///
    /// A word written backwards on the rotated grid reads forwards on the original, so start and end trade places.
    pub(crate) fn mirrored(&self, dims: (Coord, Coord)) -> Self {
        let start = self.end().mirrored(dims);
        let end = self.start().mirrored(dims);
        Self { xs: start.0, ys: start.1, xe: end.0, ye: end.1, xd: self.xd, yd: self.yd }
    }
}
