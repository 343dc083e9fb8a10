use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::location::Position;

const DIGITS: [&str; 9] = ["one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];
const TEENS: [&str; 10] = [
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];
const TENS: [&str; 4] = ["twenty", "thirty", "forty", "fifty"];
const HOURS: [&str; 12] = [
    "twelve", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
];

/// A time of day on the 24 hour clock, displayed as `HH:MM`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeKey {
    /// `0..=23`.
    pub hour: u8,
    /// `0..=59`.
    pub minute: u8,
}

impl TimeKey {
    /// The time `hour:minute`.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

impl From<(u8, u8)> for TimeKey {
    fn from(value: (u8, u8)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for TimeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// The words spelling out one time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sentence {
    /// The time these words describe.
    pub key: TimeKey,
    /// Words in reading order, never empty strings.
    pub words: Vec<String>,
}

/// Words placed at a fixed anchor before any sentence, reserving room for them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecialGroup {
    /// Words in reading order.
    pub words: Vec<String>,
    /// Where the search for the first word begins.
    pub anchor: Position,
}

/// Split `text` on whitespace, discarding empty words.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Every sentence to embed, in a stable order, plus the groups placed ahead of them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Vocabulary {
    sentences: Vec<Sentence>,
    specials: Vec<SpecialGroup>,
    mirrored: Vec<Vec<String>>,
}

impl Vocabulary {
    /// A vocabulary with nothing in it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every minute of the day in words.
    ///
    /// On the hour is just the hour ("twelve"), the first nine minutes are "<minute> past <hour>" and the rest
    /// are "<hour> <minute>" ("three forty two"). Morning and afternoon read the same.
    /// Room for "past" is reserved near the top left before anything else is placed.
    pub fn clock() -> Self {
        let minutes = TEENS.iter()
            .map(|teen| teen.to_string())
            .chain(TENS.iter().flat_map(|tens| {
                std::iter::once(tens.to_string()).chain(DIGITS.iter().map(move |digit| format!("{tens} {digit}")))
            }))
            .collect_vec();

        let mut vocabulary = Self::new();
        for offset in [0, 12] {
            for (hour, hour_name) in (offset..).zip(HOURS) {
                vocabulary.add_sentence(TimeKey::new(hour, 0), hour_name);
                for (minute, digit) in (1..).zip(DIGITS) {
                    vocabulary.add_sentence(TimeKey::new(hour, minute), &format!("{digit} past {hour_name}"));
                }
                for (minute, minute_name) in (10..).zip(&minutes) {
                    vocabulary.add_sentence(TimeKey::new(hour, minute), &format!("{hour_name} {minute_name}"));
                }
            }
        }

        vocabulary.add_special("past", Position(10, 5));
        vocabulary
    }

    /// Set the sentence for `key`. A key already present keeps its place in the order but takes the new words.
    pub fn add_sentence(&mut self, key: TimeKey, text: &str) -> &mut Self {
        let words = split_words(text);
        match self.sentences.iter_mut().find(|sentence| sentence.key == key) {
            Some(existing) => existing.words = words,
            None => self.sentences.push(Sentence { key, words }),
        }

        self
    }

    /// Reserve room for `text` by placing it at `anchor` before any sentence.
    pub fn add_special(&mut self, text: &str, anchor: Position) -> &mut Self {
        self.specials.push(SpecialGroup { words: split_words(text), anchor });
        self
    }

    /// Place `text` from the bottom right corner upwards, after the specials and before any sentence.
    pub fn add_mirrored(&mut self, text: &str) -> &mut Self {
        self.mirrored.push(split_words(text));
        self
    }

    /// Sentences in insertion order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Groups placed at fixed anchors.
    pub fn specials(&self) -> &[SpecialGroup] {
        &self.specials
    }

    /// Groups placed on the rotated grid.
    pub fn mirrored(&self) -> &[Vec<String>] {
        &self.mirrored
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether there are no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Every word that will be placed, sentences and groups alike.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter()
            .flat_map(|sentence| &sentence.words)
            .chain(self.specials.iter().flat_map(|special| &special.words))
            .chain(self.mirrored.iter().flatten())
            .map(String::as_str)
    }
}
