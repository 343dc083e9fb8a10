use std::num::NonZero;

use itertools::Itertools;
use thiserror::Error;

use crate::generator::{Generator, SentenceOrder};
use crate::location::{Dimension, Position};
use crate::vocabulary::{TimeKey, Vocabulary};

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GeneratorInvalidReason {
    /// A word cannot fit the grid in either direction.
    #[error("\"{word}\" has {length} letters but the grid is at most {longest} cells across")]
    WordTooLong {
        /// The offending word.
        word: String,
        /// Its length in letters.
        length: usize,
        /// The larger of the grid's width and height.
        longest: usize,
    },
    /// A sentence has no words.
    #[error("the sentence for {key} has no words")]
    EmptySentence {
        /// The time with no words.
        key: TimeKey,
    },
    /// A special group's anchor lies outside the grid.
    #[error("special group anchored at {anchor:?} lies outside the grid")]
    SpecialOutOfBounds {
        /// The anchor given.
        anchor: Position,
    },
    /// There is nothing to place.
    #[error("the vocabulary has no sentences")]
    NoSentences,
}

/// Collects the grid size, vocabulary and retry policy for a [`Generator`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Nothing is checked until [`is_valid`](Self::is_valid) or [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct GeneratorBuilder {
    dims: (Dimension, Dimension),
    vocabulary: Vocabulary,
    order: SentenceOrder,
    max_attempts: Option<NonZero<usize>>,
}

const DEFAULT_SIDE: Dimension = match NonZero::new(22) {
    Some(side) => side,
    None => panic!("grid side must be positive"),
};

impl Default for GeneratorBuilder {
    /// A 22x22 grid placing [`Vocabulary::clock`].
    fn default() -> Self {
        Self::with_dims((DEFAULT_SIDE, DEFAULT_SIDE))
    }
}

impl GeneratorBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order, placing [`Vocabulary::clock`].
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            vocabulary: Vocabulary::clock(),
            order: SentenceOrder::default(),
            max_attempts: None,
        }
    }

    /// Place `vocabulary` instead of the clock.
    pub fn vocabulary(&mut self, vocabulary: Vocabulary) -> &mut Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Place sentences in the order given by `order`.
    pub fn order(&mut self, order: SentenceOrder) -> &mut Self {
        self.order = order;
        self
    }

    /// Give up after `max_attempts` fresh grids. [`None`] retries until a grid is found.
    pub fn max_attempts(&mut self, max_attempts: Option<NonZero<usize>>) -> &mut Self {
        self.max_attempts = max_attempts;
        self
    }

    /// [`None`] if the builder is valid, otherwise every reason it is not.
    ///
    /// The builder is invalid if the vocabulary has no sentences, a sentence has no words, a word is longer than
    /// both dimensions, or a special group is anchored outside the grid.
    pub fn is_valid(&self) -> Option<Vec<GeneratorInvalidReason>> {
        let longest = self.dims.0.max(self.dims.1).get();
        let mut invalid_reasons = Vec::new();

        if self.vocabulary.is_empty() {
            invalid_reasons.push(GeneratorInvalidReason::NoSentences);
        }

        invalid_reasons.extend(self.vocabulary.sentences().iter()
            .filter(|sentence| sentence.words.is_empty())
            .map(|sentence| GeneratorInvalidReason::EmptySentence { key: sentence.key }));

        invalid_reasons.extend(self.vocabulary.words()
            .unique()
            .filter(|word| word.chars().count() > longest)
            .map(|word| GeneratorInvalidReason::WordTooLong {
                word: word.to_string(),
                length: word.chars().count(),
                longest,
            }));

        invalid_reasons.extend(self.vocabulary.specials().iter()
            .filter(|special| special.anchor.0 >= self.dims.0.get() || special.anchor.1 >= self.dims.1.get())
            .map(|special| GeneratorInvalidReason::SpecialOutOfBounds { anchor: special.anchor }));

        if invalid_reasons.is_empty() {
            None
        } else {
            Some(invalid_reasons)
        }
    }

    /// Produce a [`Generator`], or every reason this builder is invalid.
    pub fn build(&self) -> Result<Generator, Vec<GeneratorInvalidReason>> {
        if let Some(invalid_reasons) = self.is_valid() {
            return Err(invalid_reasons);
        }

        Ok(Generator::new(self.dims, &self.vocabulary, self.order, self.max_attempts))
    }
}
