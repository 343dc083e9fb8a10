use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::{s, Array2};
use rand::Rng;

use crate::location::{Dimension, Position};

/// The character held by a cell no word has written to yet.
pub const BLANK: char = ' ';

const HIGHLIGHT_ON: &str = "\x1b[1;32m";
const HIGHLIGHT_OFF: &str = "\x1b[0m";

/// A fixed-size letter grid, stored row-major so snapshots are a single buffer copy.
///
/// Letters are only ever written onto blank cells or onto an identical letter; see [`search`](Grid::search).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Array2<char>,
    pub(crate) dims: (Dimension, Dimension),
}

/// A saved copy of every cell of a [`Grid`], taken with [`Grid::checkpoint`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint(Array2<char>);

impl Grid {
    /// A blank grid with the specified dimensions, in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            cells: Array2::from_elem((dims.1.get(), dims.0.get()), BLANK),
            dims,
        }
    }

    /// Width and height.
    pub fn dims(&self) -> (usize, usize) {
        (self.dims.0.get(), self.dims.1.get())
    }

    /// The character at `position`, or [`None`] if it lies outside the grid.
    pub fn get(&self, position: Position) -> Option<char> {
        self.cells.get(position.as_index()).copied()
    }

    pub(crate) fn set(&mut self, position: Position, letter: char) {
        if let Some(cell) = self.cells.get_mut(position.as_index()) {
            *cell = letter;
        }
    }

    /// Rotate the grid by 180 degrees in place, reversing both row and column order.
    pub fn flip(&mut self) {
        let rotated = self.cells.slice(s![..;-1, ..;-1]).to_owned();
        self.cells = rotated;
    }

    /// Number of cells holding a letter.
    pub fn used(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != BLANK).count()
    }

    /// Copy out every cell so it may be put back with [`restore`](Self::restore).
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.cells.clone())
    }

    /// Put back the cells saved by [`checkpoint`](Self::checkpoint).
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cells = checkpoint.0;
    }

    /// Render one line per row, blank cells as spaces, with the cells in `highlight` picked out in bold green.
    pub fn render(&self, highlight: &HashSet<Position>) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2 + self.cells.nrows());

        let (width, _) = self.dims();
        for (index, letter) in self.cells.indexed_iter() {
            let position = Position::from(index);
            if highlight.contains(&position) {
                out.push_str(HIGHLIGHT_ON);
                out.push(*letter);
                out.push_str(HIGHLIGHT_OFF);
            } else {
                out.push(*letter);
            }

            if position.0 + 1 == width {
                out.push('\n');
            }
        }

        out
    }

    /// Write a uniformly random lowercase letter into every blank cell.
    pub fn fill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells.map_inplace(|cell| {
            if *cell == BLANK {
                *cell = rng.gen_range('a'..='z');
            }
        });
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            writeln!(f, "{}", row.iter().map(|cell| if *cell == BLANK { '.' } else { *cell }).join(""))?;
        }

        Ok(())
    }
}
