#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::num::NonZero;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::builder::{GeneratorBuilder, GeneratorInvalidReason};
    use crate::generator::{GenerationStall, Layout, SentenceOrder};
    use crate::location::Position;
    use crate::vocabulary::{TimeKey, Vocabulary};

    fn dims(width: usize, height: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    fn twelve_am() -> Vocabulary {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .add_sentence(TimeKey::new(0, 0), "twelve am")
            .add_sentence(TimeKey::new(0, 1), "one past twelve am");
        vocabulary
    }

    /// Every word reads correctly off the grid, and any two words covering the same cell want the same letter there.
    fn assert_consistent(layout: &Layout, vocabulary: &Vocabulary) {
        let mut claimed: HashMap<Position, char> = HashMap::new();

        for sentence in vocabulary.sentences() {
            let locations = layout.locations(sentence.key).unwrap();
            assert_eq!(locations.len(), sentence.words.len());

            for (word, location) in sentence.words.iter().zip(locations) {
                assert_eq!(location.length(), word.len());
                for (cell, letter) in location.cells().zip(word.chars()) {
                    assert_eq!(layout.grid().get(cell), Some(letter));
                    assert_eq!(*claimed.entry(cell).or_insert(letter), letter);
                }
            }
        }
    }

    #[test]
    fn twelve_am_shares_twelve() {
        let vocabulary = twelve_am();
        let layout = GeneratorBuilder::with_dims(dims(22, 22))
            .vocabulary(vocabulary.clone())
            .max_attempts(NonZero::new(10))
            .build()
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(22))
            .unwrap();

        assert_consistent(&layout, &vocabulary);

        let alone = layout.locations(TimeKey::new(0, 0)).unwrap()[0];
        let after_past = layout.locations(TimeKey::new(0, 1)).unwrap()[2];
        for cell in alone.cells().filter(|cell| after_past.cells().any(|other| other == *cell)) {
            let a = "twelve".chars().nth(alone.cells().position(|c| c == cell).unwrap());
            let b = "twelve".chars().nth(after_past.cells().position(|c| c == cell).unwrap());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn highlights_cover_every_letter_in_bounds() {
        let vocabulary = twelve_am();
        let layout = GeneratorBuilder::with_dims(dims(22, 22))
            .vocabulary(vocabulary)
            .max_attempts(NonZero::new(10))
            .build()
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(4))
            .unwrap();

        for locations in layout.placements().values() {
            for location in locations {
                let cells = location.cells().collect::<Vec<_>>();
                assert_eq!(cells.len(), location.length());
                assert!(cells.iter().all(|cell| cell.0 < 22 && cell.1 < 22));
            }
        }

        let highlights = layout.highlights();
        assert_eq!(highlights.len(), 2);
        assert!(highlights[&TimeKey::new(0, 1)].len() <= "onepasttwelveam".len());
    }

    #[test]
    fn fill_keeps_placements_readable() {
        let vocabulary = twelve_am();
        let mut rng = StdRng::seed_from_u64(8);
        let mut layout = GeneratorBuilder::with_dims(dims(22, 22))
            .vocabulary(vocabulary.clone())
            .max_attempts(NonZero::new(10))
            .build()
            .unwrap()
            .generate(&mut rng)
            .unwrap();

        layout.fill(&mut rng);
        assert_eq!(layout.grid().used(), 22 * 22);
        assert_consistent(&layout, &vocabulary);
    }

    #[test]
    fn stall_reports_best_attempt() {
        let mut vocabulary = Vocabulary::new();
        vocabulary.add_sentence(TimeKey::new(6, 30), "ab cd");

        let generator = GeneratorBuilder::with_dims(dims(2, 2))
            .vocabulary(vocabulary)
            .max_attempts(NonZero::new(3))
            .build()
            .unwrap();

        let mut reported = Vec::new();
        let result = generator.generate_with_progress(&mut StdRng::seed_from_u64(0), |progress| {
            reported.push((progress.attempt, progress.placed, progress.grid.used()));
        });

        assert_eq!(result.unwrap_err(), GenerationStall { attempts: 3, best: 0, total: 1, failed: TimeKey::new(6, 30) });
        // placing nothing is never progress
        assert!(reported.is_empty());
    }

    #[test]
    fn progress_reported_once_per_improvement() {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .add_sentence(TimeKey::new(1, 0), "ab")
            .add_sentence(TimeKey::new(1, 1), "cd ef");

        let generator = GeneratorBuilder::with_dims(dims(2, 2))
            .vocabulary(vocabulary)
            .order(SentenceOrder::AsGiven)
            .max_attempts(NonZero::new(3))
            .build()
            .unwrap();

        let mut reported = Vec::new();
        let result = generator.generate_with_progress(&mut StdRng::seed_from_u64(6), |progress| {
            reported.push((progress.attempt, progress.placed, progress.failed, progress.grid.used()));
        });

        assert_eq!(result.unwrap_err(), GenerationStall { attempts: 3, best: 1, total: 2, failed: TimeKey::new(1, 1) });
        // later attempts tie the first, so only the first is reported
        assert_eq!(reported, vec![(1, 1, TimeKey::new(1, 1), 2)]);
    }

    #[test]
    fn shared_prefixes_go_first() {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .add_sentence(TimeKey::new(0, 0), "twelve")
            .add_sentence(TimeKey::new(1, 2), "two past one")
            .add_sentence(TimeKey::new(0, 1), "one past twelve")
            .add_sentence(TimeKey::new(1, 1), "one past one");

        let generator = GeneratorBuilder::with_dims(dims(22, 22))
            .vocabulary(vocabulary)
            .build()
            .unwrap();

        let order = generator.sentences().iter().map(|sentence| sentence.key.to_string()).collect::<Vec<_>>();
        assert_eq!(order, vec!["00:01", "01:01", "01:02", "00:00"]);
    }

    #[test]
    fn as_given_keeps_order() {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .add_sentence(TimeKey::new(0, 0), "twelve")
            .add_sentence(TimeKey::new(0, 1), "one past twelve");

        let generator = GeneratorBuilder::with_dims(dims(22, 22))
            .vocabulary(vocabulary)
            .order("as-given".parse().unwrap())
            .build()
            .unwrap();

        assert_eq!(generator.sentences()[0].key, TimeKey::new(0, 0));
    }

    #[test]
    fn clock_fits_default_grid() {
        let builder = GeneratorBuilder::default();
        assert_eq!(builder.is_valid(), None);
        assert_eq!(builder.build().unwrap().sentences().len(), 24 * 60);
    }

    #[test]
    fn rejects_words_longer_than_grid() {
        let reasons = GeneratorBuilder::with_dims(dims(8, 8)).build().unwrap_err();
        assert_eq!(reasons, vec![
            GeneratorInvalidReason::WordTooLong {
                word: "seventeen".to_string(),
                length: 9,
                longest: 8,
            },
            // the clock reserves "past" at (10, 5)
            GeneratorInvalidReason::SpecialOutOfBounds { anchor: Position(10, 5) },
        ]);
    }

    #[test]
    fn rejects_bad_vocabulary() {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .add_sentence(TimeKey::new(4, 20), "  ")
            .add_special("noon", Position(30, 0));

        let reasons = GeneratorBuilder::with_dims(dims(10, 10))
            .vocabulary(vocabulary)
            .build()
            .unwrap_err();
        assert_eq!(reasons, vec![
            GeneratorInvalidReason::EmptySentence { key: TimeKey::new(4, 20) },
            GeneratorInvalidReason::SpecialOutOfBounds { anchor: Position(30, 0) },
        ]);

        let reasons = GeneratorBuilder::with_dims(dims(10, 10))
            .vocabulary(Vocabulary::new())
            .build()
            .unwrap_err();
        assert_eq!(reasons, vec![GeneratorInvalidReason::NoSentences]);
    }

    #[test]
    fn specials_placed_first() {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .add_sentence(TimeKey::new(0, 0), "twelve")
            .add_special("noon", Position(2, 3));

        let layout = GeneratorBuilder::with_dims(dims(8, 8))
            .vocabulary(vocabulary)
            .max_attempts(NonZero::new(10))
            .build()
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(1))
            .unwrap();

        let noon = ['n', 'o', 'o', 'n'];
        let across = (0..4).all(|idx| layout.grid().get(Position(2 + idx, 3)) == Some(noon[idx]));
        let down = (0..4).all(|idx| layout.grid().get(Position(2, 3 + idx)) == Some(noon[idx]));
        assert!(across || down);
    }

    #[test]
    fn mirrored_groups_read_forward() {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .add_sentence(TimeKey::new(0, 0), "one")
            .add_mirrored("pm");

        let layout = GeneratorBuilder::with_dims(dims(6, 1))
            .vocabulary(vocabulary)
            .max_attempts(NonZero::new(10))
            .build()
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(format!("{}", layout.grid()), "one.pm
");
    }
}
