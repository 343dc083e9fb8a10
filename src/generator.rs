use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::num::NonZero;

use itertools::Itertools;
use rand::Rng;
use strum::{Display, EnumString, VariantArray};
use thiserror::Error;

use crate::grid::Grid;
use crate::highlight::highlight;
use crate::inserter::Inserter;
use crate::location::{Dimension, Location, Position};
use crate::vocabulary::{Sentence, SpecialGroup, TimeKey, Vocabulary};

/// The order sentences are placed in on each attempt.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, VariantArray, Eq, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum SentenceOrder {
    /// Sentences whose opening words are shared by the most other sentences go first, so common prefixes are laid down early.
    #[default]
    SharedPrefix,
    /// The vocabulary's own order.
    AsGiven,
}

impl SentenceOrder {
    fn arrange(&self, sentences: &[Sentence]) -> Vec<Sentence> {
        match self {
            Self::AsGiven => sentences.to_vec(),
            Self::SharedPrefix => {
                let mut prefix_count: HashMap<&[String], usize> = HashMap::new();
                for sentence in sentences {
                    for idx in 1..=sentence.words.len() {
                        *prefix_count.entry(&sentence.words[..idx]).or_default() += 1;
                    }
                }

                sentences.iter()
                    .map(|sentence| {
                        let key = (1..=sentence.words.len())
                            .map(|idx| prefix_count[&sentence.words[..idx]])
                            .collect_vec();
                        (key, sentence)
                    })
                    // stable, so equally common sentences keep their relative order
                    .sorted_by(|(a, _), (b, _)| b.cmp(a))
                    .map(|(_, sentence)| sentence.clone())
                    .collect()
            }
        }
    }
}

/// What an attempt that fell short managed, reported whenever an attempt beats every earlier one.
#[derive(Debug)]
pub struct Progress<'a> {
    /// Attempts made so far, including this one.
    pub attempt: usize,
    /// Sentences placed before the failure.
    pub placed: usize,
    /// Sentences in the vocabulary.
    pub total: usize,
    /// The sentence that would not fit.
    pub failed: TimeKey,
    /// The grid as it stood when the attempt gave up.
    pub grid: &'a Grid,
}

/// No attempt placed every sentence before the attempt limit ran out.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("placed at most {best} of {total} sentences in {attempts} attempts; {failed} did not fit")]
pub struct GenerationStall {
    /// Attempts made.
    pub attempts: usize,
    /// Most sentences placed by any attempt.
    pub best: usize,
    /// Sentences in the vocabulary.
    pub total: usize,
    /// The sentence that stopped the best attempt.
    pub failed: TimeKey,
}

/// A finished grid and where each time's words sit on it.
#[derive(Clone, Debug)]
pub struct Layout {
    grid: Grid,
    placements: BTreeMap<TimeKey, Vec<Location>>,
}

impl Layout {
    /// The grid, blank cells included until [`fill`](Self::fill) is called.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Locations for every time, in time order.
    pub fn placements(&self) -> &BTreeMap<TimeKey, Vec<Location>> {
        &self.placements
    }

    /// Where the words for `key` sit, in reading order.
    pub fn locations(&self, key: TimeKey) -> Option<&[Location]> {
        self.placements.get(&key).map(Vec::as_slice)
    }

    /// The cells to light up for `key`.
    pub fn highlight(&self, key: TimeKey) -> Option<BTreeSet<Position>> {
        self.locations(key).map(highlight)
    }

    /// The cells to light up for every time.
    pub fn highlights(&self) -> BTreeMap<TimeKey, BTreeSet<Position>> {
        self.placements.iter()
            .map(|(key, locations)| (*key, highlight(locations)))
            .collect()
    }

    /// Fill every blank cell with a random letter. Placements are unaffected.
    pub fn fill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.fill(rng);
    }
}

/// Repeatedly lays out a fresh grid until every sentence fits.
///
/// Build one with a [`GeneratorBuilder`](crate::builder::GeneratorBuilder).
#[derive(Clone, Debug)]
pub struct Generator {
    dims: (Dimension, Dimension),
    sentences: Vec<Sentence>,
    specials: Vec<SpecialGroup>,
    mirrored: Vec<Vec<String>>,
    max_attempts: Option<NonZero<usize>>,
}

struct Stalled {
    placed: usize,
    failed: TimeKey,
    grid: Grid,
}

impl Generator {
    pub(crate) fn new(
        dims: (Dimension, Dimension),
        vocabulary: &Vocabulary,
        order: SentenceOrder,
        max_attempts: Option<NonZero<usize>>,
    ) -> Self {
        Self {
            dims,
            sentences: order.arrange(vocabulary.sentences()),
            specials: vocabulary.specials().to_vec(),
            mirrored: vocabulary.mirrored().to_vec(),
            max_attempts,
        }
    }

    /// Width and height of every grid produced.
    pub fn dims(&self) -> (usize, usize) {
        (self.dims.0.get(), self.dims.1.get())
    }

    /// Sentences in the order they are placed.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// See [`generate_with_progress`](Self::generate_with_progress).
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Layout, GenerationStall> {
        self.generate_with_progress(rng, |_| {})
    }

    /// Attempt fresh grids until one holds every sentence or the attempt limit is reached.
    ///
    /// `on_progress` is called whenever an attempt places more sentences than any before it; an attempt placing none is never reported.
    pub fn generate_with_progress<R, F>(&self, rng: &mut R, mut on_progress: F) -> Result<Layout, GenerationStall>
    where
        R: Rng + ?Sized,
        F: FnMut(&Progress<'_>),
    {
        let total = self.sentences.len();
        let mut best: Option<(usize, TimeKey)> = None;
        let mut attempt = 0;

        loop {
            attempt += 1;
            let stalled = match self.attempt(rng) {
                Ok(layout) => {
                    log::info!("placed all {total} sentences on attempt {attempt}, {} cells used", layout.grid.used());
                    return Ok(layout);
                }
                Err(stalled) => stalled,
            };

            let improved = stalled.placed > best.map_or(0, |(placed, _)| placed);
            if improved || best.is_none() {
                best = Some((stalled.placed, stalled.failed));
            }

            if improved {
                log::info!(
                    "best attempt so far {}/{total} [{}% of {}x{}]",
                    stalled.placed,
                    100 * stalled.placed / total.max(1),
                    self.dims.0,
                    self.dims.1,
                );
                on_progress(&Progress {
                    attempt,
                    placed: stalled.placed,
                    total,
                    failed: stalled.failed,
                    grid: &stalled.grid,
                });
            }

            if self.max_attempts.is_some_and(|max| attempt >= max.get()) {
                let (best, failed) = best.unwrap_or((stalled.placed, stalled.failed));
                return Err(GenerationStall { attempts: attempt, best, total, failed });
            }
        }
    }

    /// One pass over a blank grid: specials, then mirrored groups, then every sentence in order.
    fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Layout, Stalled> {
        let mut grid = Grid::with_dims(self.dims);
        let mut placements = BTreeMap::new();

        let failure = {
            let mut inserter = Inserter::new(&mut grid, rng);

            for special in &self.specials {
                if let Err(failure) = inserter.insert(&special.words, special.anchor) {
                    log::warn!("skipping special group: {failure}");
                }
            }

            for group in &self.mirrored {
                if let Err(failure) = inserter.insert_mirrored(group) {
                    log::warn!("skipping mirrored group: {failure}");
                }
            }

            self.sentences.iter().enumerate().find_map(|(placed, sentence)| {
                match inserter.insert(&sentence.words, Position(0, 0)) {
                    Ok(locations) => {
                        log::debug!("{} \"{}\" after {} rollbacks", sentence.key, sentence.words.join(" "), inserter.rollbacks());
                        placements.insert(sentence.key, locations);
                        None
                    }
                    Err(_) => Some((placed, sentence.key)),
                }
            })
        };

        match failure {
            None => Ok(Layout { grid, placements }),
            Some((placed, failed)) => Err(Stalled { placed, failed, grid }),
        }
    }
}
