#![warn(missing_docs)]

//! # `wordclock`
//!
//! Generates a letter grid in which every time of day, spelled out ("twelve fifteen", "one past ten", ...),
//! can be found as a run of words reading left to right or top to bottom, and reports which cells spell each time
//! so a clock face can light them up.
//!
//! Begin with a [`GeneratorBuilder`], optionally giving it a [`Vocabulary`] other than [`Vocabulary::clock`].
//! Build it into a [`Generator`] and call [`generate()`](Generator::generate), yielding a [`Layout`]:
//! the finished [`Grid`] and the [`Location`] of every word of every time.
//!
//! # Internals
//! Sentences are placed one after another into a single shared grid, so later sentences reuse the letters of earlier ones wherever they can.
//!
//! A word is placed by [`Grid::search`], a best-first scan outward from an anchor which always prefers cells nearer the top left corner of the grid.
//! A slot is legal if every cell it covers is blank or already holds the right letter.
//! Each placed word bans a few cells around itself as starting points, so that no later word runs directly alongside it or carries straight on from its end.
//!
//! Sentences are placed by an [`Inserter`], which tries each word against a ladder of [`SearchPass`]es,
//! from nearby passes which only reuse existing letters through to unbounded passes which may write anywhere.
//! When a word fits nowhere, the previous word is undone from a checkpoint of the grid, its start is ruled out, and the search resumes.
//! A sentence which cannot be placed at all leaves the grid untouched, and the [`Generator`] starts over on a blank grid.

pub use builder::{GeneratorBuilder, GeneratorInvalidReason};
pub use direction::Direction;
pub use generator::{GenerationStall, Generator, Layout, Progress, SentenceOrder};
pub use grid::{Checkpoint, Grid};
pub use highlight::highlight;
pub use inserter::{InsertFailure, Inserter};
pub use location::{Location, Position};
pub use output::HighlightDocument;
pub use search::SearchPass;
pub use vocabulary::{Sentence, SpecialGroup, TimeKey, Vocabulary};

pub mod builder;
pub(crate) mod direction;
pub(crate) mod generator;
pub(crate) mod grid;
pub(crate) mod highlight;
pub mod inserter;
pub(crate) mod location;
pub(crate) mod output;
pub(crate) mod search;
mod tests;
pub mod vocabulary;
#[cfg(feature = "wasm")]
mod wasm;
