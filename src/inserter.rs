use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use rand::Rng;
use thiserror::Error;

use crate::grid::{Checkpoint, Grid};
use crate::location::{Location, Position};
use crate::search::SearchPass;

/// Passes tried, in order, for every word but the last of a sentence.
///
/// Cheap reuse-only passes come first so words share letters where they can; passes allowed to write widen more slowly.
pub const SEARCH_LADDER: [SearchPass; 8] = [
    SearchPass::reuse(Some(10.0)),
    SearchPass::write(Some(3.0)),
    SearchPass::reuse(Some(15.0)),
    SearchPass::write(Some(5.0)),
    SearchPass::reuse(Some(20.0)),
    SearchPass::write(Some(10.0)),
    SearchPass::reuse(None),
    SearchPass::write(None),
];

/// Passes tried for the last word of a sentence. Nothing follows it, so its distance from the previous word does not matter.
pub const FINAL_WORD_LADDER: [SearchPass; 2] = [
    SearchPass::reuse(None),
    SearchPass::write(None),
];

/// Reasons an [`Inserter`] may fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InsertFailure {
    /// Every start for the first word was exhausted; the grid is exactly as it was before the attempt.
    #[error("no placement found for \"{}\"", .words.join(" "))]
    Exhausted {
        /// The sentence that could not be placed.
        words: Vec<String>,
    },
}

/// Places the words of a sentence one after another, backtracking over earlier words when a later one does not fit.
///
/// The grid is checkpointed before every word. When a word cannot be placed by any pass, the previous word is undone,
/// its start is remembered as failed for its index, and the search resumes from the word before it.
/// Failed starts are never retried within one call to [`insert`](Self::insert), so the search always terminates.
pub struct Inserter<'a, R: Rng + ?Sized> {
    grid: &'a mut Grid,
    rng: &'a mut R,
    failed: HashMap<usize, HashSet<Position>>,
    rollbacks: usize,
}

impl<'a, R: Rng + ?Sized> Inserter<'a, R> {
    /// An inserter writing into `grid`, drawing direction order from `rng`.
    pub fn new(grid: &'a mut Grid, rng: &'a mut R) -> Self {
        Self {
            grid,
            rng,
            failed: HashMap::new(),
            rollbacks: 0,
        }
    }

    /// Number of words undone during the last call to [`insert`](Self::insert).
    pub fn rollbacks(&self) -> usize {
        self.rollbacks
    }

    /// Starts ruled out for the word at `index` during the last call to [`insert`](Self::insert).
    pub fn failed_starts(&self, index: usize) -> Option<&HashSet<Position>> {
        self.failed.get(&index)
    }

    /// Place `words` in order, beginning the search at `anchor`, and return where each landed.
    ///
    /// On success the grid holds every word. On failure the grid is restored to its state before the call.
    pub fn insert<S: AsRef<str>>(&mut self, words: &[S], anchor: Position) -> Result<Vec<Location>, InsertFailure> {
        self.failed.clear();
        self.rollbacks = 0;

        let mut anchor = anchor;
        let mut locations: Vec<Location> = Vec::with_capacity(words.len());
        let mut checkpoints: Vec<Checkpoint> = Vec::with_capacity(words.len());
        let mut banned: HashSet<Position> = HashSet::new();

        while locations.len() < words.len() {
            let idx = locations.len();
            if let Some(failed) = self.failed.get(&idx) {
                banned.extend(failed.iter().copied());
            }

            let checkpoint = self.grid.checkpoint();

            let ladder: &[SearchPass] = if idx == words.len() - 1 { &FINAL_WORD_LADDER } else { &SEARCH_LADDER };
            // for the first word there is no previous one; wrap around to the last
            let previous = words[(idx + words.len() - 1) % words.len()].as_ref();
            let found = self.place(words[idx].as_ref(), anchor, &banned, ladder, previous.chars().count());

            let Some(found) = found else {
                let Some(last) = locations.pop() else {
                    log::trace!("gave up on {:?}", words.iter().map(|word| word.as_ref()).collect_vec());
                    return Err(InsertFailure::Exhausted {
                        words: words.iter().map(|word| word.as_ref().to_string()).collect(),
                    });
                };

                if let Some(checkpoint) = checkpoints.pop() {
                    self.grid.restore(checkpoint);
                }
                anchor = locations.last().unwrap_or(&Location::ORIGIN).start();
                banned = locations.iter().flat_map(Location::banned).collect();
                self.failed.entry(idx - 1).or_default().insert(last.start());
                self.rollbacks += 1;

                log::trace!("undid \"{}\" at {:?}", words[idx - 1].as_ref(), last.start());
                continue;
            };

            debug_assert_eq!(checkpoints.len(), locations.len());
            locations.push(found);
            checkpoints.push(checkpoint);
            anchor = found.start();
            banned.extend(found.banned());
        }

        Ok(locations)
    }

    /// Try each pass of `ladder` from `anchor`, then a fresh line below the anchor as a last resort.
    fn place(
        &mut self,
        word: &str,
        anchor: Position,
        banned: &HashSet<Position>,
        ladder: &[SearchPass],
        previous_length: usize,
    ) -> Option<Location> {
        for pass in ladder {
            if let Some(found) = self.grid.search(anchor, word, banned, *pass, &mut *self.rng) {
                return Some(found);
            }
        }

        let new_line = Position(0, anchor.1 + previous_length);
        self.grid.search(new_line, word, banned, SearchPass::write(None), &mut *self.rng)
    }

    /// Place `words` so they read correctly on the grid as it stands, by writing them backwards onto the grid rotated 180 degrees.
    ///
    /// The returned locations are in the unrotated frame, in the same order as `words`.
    pub fn insert_mirrored<S: AsRef<str>>(&mut self, words: &[S]) -> Result<Vec<Location>, InsertFailure> {
        let reversed = words.iter()
            .rev()
            .map(|word| word.as_ref().chars().rev().collect::<String>())
            .collect_vec();

        self.grid.flip();
        let placed = self.insert(&reversed, Position(0, 0));
        self.grid.flip();

        let dims = self.grid.dims();
        match placed {
            Ok(locations) => Ok(locations.iter().rev().map(|location| location.mirrored(dims)).collect()),
            Err(_) => Err(InsertFailure::Exhausted {
                words: words.iter().map(|word| word.as_ref().to_string()).collect(),
            }),
        }
    }
}

impl Grid {
    /// Place the words of one sentence starting the search at `anchor`; see [`Inserter::insert`].
    pub fn insert<S: AsRef<str>, R: Rng + ?Sized>(
        &mut self,
        words: &[S],
        anchor: Position,
        rng: &mut R,
    ) -> Result<Vec<Location>, InsertFailure> {
        Inserter::new(self, rng).insert(words, anchor)
    }
}
