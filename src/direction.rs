use strum::VariantArray;

use crate::location::Position;

/// The two directions a word may read in. Words never read up or to the left.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Reads left to right, `(1, 0)`.
    Right,
    /// Reads top to bottom, `(0, 1)`.
    Down,
}

impl Direction {
    /// The unit step `(xd, yd)` for this direction.
    pub fn delta(&self) -> (usize, usize) {
        match self {
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }

    /// Step `distance` cells from `position` in this direction.
    pub fn attempt_from(&self, position: Position, distance: usize) -> Position {
        let (xd, yd) = self.delta();
        Position(position.0 + xd * distance, position.1 + yd * distance)
    }

    /// Whether a word of `length` letters starting at `position` stays within `dims`.
    pub fn fits(&self, position: Position, length: usize, dims: (usize, usize)) -> bool {
        match self {
            Self::Right => position.0 + length <= dims.0,
            Self::Down => position.1 + length <= dims.1,
        }
    }

    /// The direction perpendicular to this one.
    pub fn across(&self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Right,
        }
    }

    pub(crate) fn from_delta(delta: (usize, usize)) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.delta() == delta).copied()
    }
}
