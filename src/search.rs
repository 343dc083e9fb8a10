use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use strum::VariantArray;

use crate::direction::Direction;
use crate::grid::{Grid, BLANK};
use crate::location::{Coord, Location, Position};

/// One rung of the search ladder: how far from the anchor to look and whether blank cells may be written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchPass {
    /// Cutoff on Euclidean distance from the anchor; [`None`] searches everything right of and below it.
    pub max_distance: Option<f64>,
    /// Accept blank cells and write the word into them, rather than only reusing existing letters.
    pub insert_if_empty: bool,
}

impl SearchPass {
    /// Only accept slots whose every letter is already on the grid.
    pub const fn reuse(max_distance: Option<f64>) -> Self {
        Self { max_distance, insert_if_empty: false }
    }

    /// Accept blank cells as well, writing the word on success.
    pub const fn write(max_distance: Option<f64>) -> Self {
        Self { max_distance, insert_if_empty: true }
    }
}

/// Candidate start cells, popped nearest the origin first.
struct Frontier<'a> {
    queue: BinaryHeap<Reverse<(Coord, Coord, Coord)>>,
    seen: HashSet<Position>,
    // banned cells already expanded into their successors
    skipped: HashSet<Position>,
    banned: &'a HashSet<Position>,
    anchor: Position,
    max_distance: Option<f64>,
    dims: (Coord, Coord),
}

impl<'a> Frontier<'a> {
    fn new(anchor: Position, banned: &'a HashSet<Position>, max_distance: Option<f64>, dims: (Coord, Coord)) -> Self {
        Self {
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            skipped: HashSet::new(),
            banned,
            anchor,
            max_distance,
            dims,
        }
    }

    /// Enqueue `position`. A banned position is never a candidate itself; its right and lower neighbours are tried in its place.
    fn push(&mut self, position: Position) {
        let mut pending = vec![position];

        while let Some(position) = pending.pop() {
            if position.0 >= self.dims.0 || position.1 >= self.dims.1 || self.seen.contains(&position) {
                continue;
            }

            if self.banned.contains(&position) {
                if self.skipped.insert(position) {
                    pending.push(Position(position.0, position.1 + 1));
                    pending.push(Position(position.0 + 1, position.1));
                }
                continue;
            }

            if self.max_distance.is_some_and(|max| position.distance_to(self.anchor) >= max) {
                continue;
            }

            self.seen.insert(position);
            self.queue.push(Reverse((position.origin_rank(), position.0, position.1)));
        }
    }

    fn pop(&mut self) -> Option<Position> {
        self.queue.pop().map(|Reverse((_, x, y))| Position(x, y))
    }
}

impl Grid {
    /// Find the first legal slot for `word` reachable from `anchor`, scanning candidates in order of distance from the grid origin.
    ///
    /// A slot is legal when every cell it covers already holds the matching letter, or is blank and `pass` allows writing.
    /// When writing is allowed the word is written into the grid before returning.
    /// Starts in `banned` are skipped, but the search carries on past them.
    ///
    /// Returns [`None`] if no legal slot exists within the pass's radius, including when `word` fits in neither direction.
    pub fn search<R: Rng + ?Sized>(
        &mut self,
        anchor: Position,
        word: &str,
        banned: &HashSet<Position>,
        pass: SearchPass,
        rng: &mut R,
    ) -> Option<Location> {
        let letters = word.chars().collect_vec();
        if letters.is_empty() {
            return None;
        }

        let dims = self.dims();
        let mut frontier = Frontier::new(anchor, banned, pass.max_distance, dims);
        frontier.push(anchor);

        while let Some(position) = frontier.pop() {
            let mut directions = Direction::VARIANTS.iter()
                .filter(|dir| dir.fits(position, letters.len(), dims))
                .copied()
                .collect_vec();
            directions.shuffle(rng);

            for direction in directions {
                if self.accepts(position, direction, &letters, pass.insert_if_empty) {
                    if pass.insert_if_empty {
                        for (idx, letter) in letters.iter().enumerate() {
                            self.set(direction.attempt_from(position, idx), *letter);
                        }
                    }
                    return Some(Location::spanning(position, direction, letters.len()));
                }
            }

            frontier.push(Position(position.0 + 1, position.1));
            frontier.push(Position(position.0, position.1 + 1));
        }

        None
    }

    fn accepts(&self, start: Position, direction: Direction, letters: &[char], insert_if_empty: bool) -> bool {
        letters.iter().enumerate().all(|(idx, letter)| {
            match self.get(direction.attempt_from(start, idx)) {
                Some(existing) if existing == *letter => true,
                Some(BLANK) => insert_if_empty,
                _ => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::SearchPass;
    use crate::direction::Direction;
    use crate::grid::Grid;
    use crate::location::Position;

    fn grid(width: usize, height: usize) -> Grid {
        Grid::with_dims((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn writes_at_anchor_on_blank_grid() {
        let mut grid = grid(6, 6);
        let location = grid.search(Position(1, 2), "ten", &HashSet::new(), SearchPass::write(None), &mut rng()).unwrap();

        assert_eq!(location.start(), Position(1, 2));
        assert_eq!(location.length(), 3);
        let written: String = location.cells().map(|cell| grid.get(cell).unwrap()).collect();
        assert_eq!(written, "ten");
        assert_eq!(grid.used(), 3);
    }

    #[test]
    fn reuse_only_never_writes() {
        let mut grid = grid(6, 6);
        assert_eq!(grid.search(Position(0, 0), "ten", &HashSet::new(), SearchPass::reuse(None), &mut rng()), None);
        assert_eq!(grid.used(), 0);
    }

    #[test]
    fn reuse_finds_existing_word() {
        let mut grid = grid(8, 8);
        let mut rng = rng();
        let first = grid.search(Position(3, 4), "nine", &HashSet::new(), SearchPass::write(None), &mut rng).unwrap();
        let again = grid.search(Position(0, 0), "nine", &HashSet::new(), SearchPass::reuse(None), &mut rng).unwrap();

        assert_eq!(first, again);
        assert_eq!(grid.used(), 4);
    }

    #[test]
    fn shares_matching_letters() {
        // too short for anything to read down
        let mut grid = grid(8, 2);
        grid.set(Position(0, 0), 'o');
        grid.set(Position(1, 0), 'n');
        let location = grid.search(Position(0, 0), "one", &HashSet::new(), SearchPass::write(None), &mut rng()).unwrap();

        assert_eq!(location.start(), Position(0, 0));
        assert_eq!(location.direction(), Some(Direction::Right));
        assert_eq!(grid.used(), 3);
        assert_eq!(format!("{}", grid), "one.....
........
");
    }

    #[test]
    fn never_overwrites_different_letter() {
        let mut grid = grid(3, 1);
        grid.set(Position(1, 0), 'x');
        assert_eq!(grid.search(Position(0, 0), "abc", &HashSet::new(), SearchPass::write(None), &mut rng()), None);
        assert_eq!(format!("{}", grid), ".x.
");
    }

    #[rstest]
    #[case(4, 4, "fifteen")]
    #[case(6, 3, "thirteen")]
    #[case(1, 1, "am")]
    fn word_too_long_is_not_found(#[case] width: usize, #[case] height: usize, #[case] word: &str) {
        let mut grid = grid(width, height);
        assert_eq!(grid.search(Position(0, 0), word, &HashSet::new(), SearchPass::write(None), &mut rng()), None);
        assert_eq!(grid.used(), 0);
    }

    #[test]
    fn banned_start_is_skipped_not_blocking() {
        let mut grid = grid(3, 3);
        let banned = HashSet::from([Position(0, 0)]);
        let location = grid.search(Position(0, 0), "abc", &banned, SearchPass::write(None), &mut rng()).unwrap();

        // (1, 0) and (0, 1) tie on distance from the origin; x breaks the tie
        assert_eq!(location.start(), Position(0, 1));
        assert_eq!(location.direction(), Some(Direction::Right));
    }

    #[test]
    fn radius_cuts_off_search() {
        let mut grid = grid(10, 1);
        grid.set(Position(7, 0), 'a');
        grid.set(Position(8, 0), 'm');
        let mut rng = rng();

        assert_eq!(grid.search(Position(0, 0), "am", &HashSet::new(), SearchPass::reuse(Some(5.0)), &mut rng), None);
        let location = grid.search(Position(0, 0), "am", &HashSet::new(), SearchPass::reuse(Some(10.0)), &mut rng).unwrap();
        assert_eq!(location.start(), Position(7, 0));
    }

    #[test]
    fn nothing_left_or_above_anchor() {
        let mut grid = grid(6, 6);
        grid.set(Position(0, 0), 'a');
        grid.set(Position(1, 0), 'm');
        assert_eq!(grid.search(Position(2, 2), "am", &HashSet::new(), SearchPass::reuse(None), &mut rng()), None);
    }

    #[test]
    fn banned_wall_is_crossed() {
        let mut grid = grid(5, 5);
        let banned: HashSet<_> = (0..5).flat_map(|x| [Position(x, 0), Position(x, 1)]).collect();
        let location = grid.search(Position(0, 0), "pm", &banned, SearchPass::write(None), &mut rng()).unwrap();
        assert_eq!(location.start(), Position(0, 2));
    }
}
