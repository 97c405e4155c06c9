//! Grid validation and clue embellishment.
//!
//! Walks the across clues and then the down clues in file order, writing each answer
//! into a flattened `maxCoord x maxCoord` grid. Crossing answers are checked for
//! consistency as a side effect of the writes: a cell already holding a different
//! letter is a clash.
//!
//! Per clue the checks run in a fixed order. The first failing check records one error
//! and skips the rest of *that clue*; the walk then continues with the next clue, so one
//! pass can report several bad clues. A letter clash stops writing that clue's letters
//! but the clue still counts as the "previous" clue for the sequence check.
//!
//! Once every clue is through, and only if nothing has failed, two global checks run:
//! the id set must be exactly `1..=maxId`, and each id must start further along the
//! grid than the one before it.

use crate::crossword::{Answers, Clue, Coord, Crossword, Direction, BLANK_CELL};
use crate::errors::{ClueProblem, ValidationError};
use crate::format::{is_all_digits, is_placeholder_spec, numeric_csv, SplitSpec};
use std::collections::BTreeMap;

/// The last clue that passed its checks in the current direction.
#[derive(Debug, Clone, Copy, Default)]
struct Previous {
    id: u32,
}

/// Fields derived from a clue's answer spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedAnswer {
    pub answer_csv: String,
    pub numeric_csv: String,
    pub words: Vec<String>,
    /// Zero-size and empty-word problems; these don't stop the clue's other checks.
    pub problems: Vec<ClueProblem>,
}

impl UnpackedAnswer {
    #[must_use]
    pub fn words_string(&self) -> String {
        self.words.concat()
    }

    #[must_use]
    pub fn words_lengths(&self) -> Vec<usize> {
        self.words.iter().map(|w| w.chars().count()).collect()
    }
}

/// Expand an answer spec into its words.
///
/// Length pieces become runs of `*`; a spec made only of placeholders is rewritten in
/// its numeric form so that "structure only" puzzles all look the same.
#[must_use]
pub fn unpack_answer(answer_csv: &str) -> UnpackedAnswer {
    let numeric = numeric_csv(answer_csv);
    let answer_csv = if is_placeholder_spec(answer_csv) {
        numeric.clone()
    } else {
        answer_csv.to_string()
    };

    let mut problems = Vec::new();
    let words = SplitSpec::parse(&answer_csv)
        .pieces
        .iter()
        .map(|piece| {
            if is_all_digits(piece) {
                // absurd lengths saturate and are then rejected as too long
                let len = piece.parse::<usize>().unwrap_or(usize::MAX);
                if len == 0 {
                    problems.push(ClueProblem::ZeroWordSize);
                    String::new()
                } else {
                    "*".repeat(len.min(1024))
                }
            } else {
                if piece.is_empty() {
                    problems.push(ClueProblem::EmptyWord);
                }
                (*piece).to_string()
            }
        })
        .collect();

    UnpackedAnswer { answer_csv, numeric_csv: numeric, words, problems }
}

struct Walk<'a> {
    max_coord: usize,
    grid: &'a mut Vec<char>,
    known_ids: &'a mut BTreeMap<u32, Clue>,
    answers: &'a mut Answers,
    max_id: u32,
}

impl Walk<'_> {
    /// Run the ordered checks for one clue. `Err` carries the first hard failure.
    fn check_clue(
        &mut self,
        clue: &mut Clue,
        direction: Direction,
        prev: &mut Previous,
        soft: &mut Vec<ClueProblem>,
    ) -> Result<(), ClueProblem> {
        if clue.id == 0 {
            return Err(ClueProblem::NonPositiveId);
        }
        self.max_id = self.max_id.max(clue.id);

        if clue.id <= prev.id {
            return Err(ClueProblem::IdOutOfSequence);
        }

        let Coord { x, y } = clue.coordinates;
        if x > self.max_coord {
            return Err(ClueProblem::XTooLarge);
        }
        if y > self.max_coord {
            return Err(ClueProblem::YTooLarge);
        }
        if x == 0 {
            return Err(ClueProblem::XTooSmall);
        }
        if y == 0 {
            return Err(ClueProblem::YTooSmall);
        }

        match self.known_ids.get(&clue.id) {
            Some(known) if known.coordinates != clue.coordinates => {
                return Err(ClueProblem::SharedIdClash);
            }
            Some(_) => {}
            None => {
                self.known_ids.insert(clue.id, clue.clone());
            }
        }

        let unpacked = unpack_answer(&clue.answer_csv);
        soft.extend(unpacked.problems.iter().cloned());
        let words_string = unpacked.words_string();
        let length = words_string.chars().count();
        clue.answer_csv = unpacked.answer_csv.clone();
        clue.numeric_csv = Some(unpacked.numeric_csv.clone());
        clue.words_string = Some(words_string.clone());
        if length > self.max_coord {
            return Err(ClueProblem::AnswerTooLong);
        }
        self.answers.for_direction_mut(direction).push(words_string.clone());
        clue.words_lengths = unpacked.words_lengths();

        let start = match direction {
            Direction::Across => x,
            Direction::Down => y,
        };
        if length + start - 1 > self.max_coord {
            return Err(ClueProblem::AnswerOverflowsGrid);
        }

        let step = direction.step(self.max_coord);
        let origin = clue.coordinates.flat_index(self.max_coord);
        let mut clash = None;
        for (i, letter) in words_string.chars().enumerate() {
            let cell = &mut self.grid[origin + i * step];
            if *cell == BLANK_CELL {
                *cell = letter;
            } else if *cell != letter {
                clash = Some(ClueProblem::LetterClash { letter: i + 1 });
                break;
            }
        }

        prev.id = clue.id;
        match clash {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}

/// Check the crossword's structure, build its grid and fill in the derived clue fields.
///
/// Intended to run only when the parser produced no errors. Problems are appended to
/// `crossword.errors`; nothing is returned early.
pub fn validate_and_embellish(crossword: &mut Crossword) {
    let max_coord = crossword.dimensions.max_coord();
    let mut grid = vec![BLANK_CELL; max_coord * max_coord];
    let mut known_ids = BTreeMap::new();
    let mut answers = Answers::default();

    if crossword.across.len() + crossword.down.len() == 0 {
        crossword.errors.push(ValidationError::NoClues.to_string());
    }

    let mut walk = Walk {
        max_coord,
        grid: &mut grid,
        known_ids: &mut known_ids,
        answers: &mut answers,
        max_id: 0,
    };
    let mut errors = Vec::new();

    for direction in Direction::ALL {
        let mut prev = Previous::default();
        for clue in crossword.clues_mut(direction).iter_mut() {
            let mut soft = Vec::new();
            let outcome = walk.check_clue(clue, direction, &mut prev, &mut soft);
            for problem in soft.into_iter().chain(outcome.err()) {
                errors.push(
                    ValidationError::Clue {
                        problem,
                        direction,
                        line: clue.original.clone(),
                    }
                    .to_string(),
                );
            }
        }
    }
    let max_id = walk.max_id;
    crossword.errors.extend(errors);

    if crossword.errors.is_empty() {
        for id in 1..=max_id {
            if !known_ids.contains_key(&id) {
                crossword.errors.push(ValidationError::MissingId { id }.to_string());
            }
        }
    }

    if crossword.errors.is_empty() {
        if let Some(err) = first_non_monotonic(&known_ids, max_coord) {
            crossword.errors.push(err.to_string());
        }
    }

    log::debug!(
        "validated crossword: {} ids, {} errors",
        known_ids.len(),
        crossword.errors.len()
    );

    crossword.max_coord = Some(max_coord);
    crossword.grid = Some(grid);
    crossword.known_ids = known_ids;
    crossword.answers = Some(answers);
}

/// The first id that doesn't start strictly after its predecessor, if any.
fn first_non_monotonic(known_ids: &BTreeMap<u32, Clue>, max_coord: usize) -> Option<ValidationError> {
    known_ids.iter().zip(known_ids.iter().skip(1)).find_map(|((&prev_id, prev), (&id, clue))| {
        let (c, p) = (clue.coordinates, prev.coordinates);
        if c.ordinal(max_coord) > p.ordinal(max_coord) {
            None
        } else if c.y < p.y {
            Some(ValidationError::StartsAbove { id, prev: prev_id })
        } else if c == p {
            Some(ValidationError::SameCoords { id, prev: prev_id })
        } else {
            Some(ValidationError::StartsLeftOf { id, prev: prev_id })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_dsl;

    fn validated(text: &str) -> Crossword {
        let mut crossword = parse_dsl(text);
        assert!(crossword.errors.is_empty(), "parse errors: {:?}", crossword.errors);
        validate_and_embellish(&mut crossword);
        crossword
    }

    #[test]
    fn test_unpack_letters() {
        let unpacked = unpack_answer("SCRAMBLED,EGGS");
        assert_eq!(unpacked.numeric_csv, "9,4");
        assert_eq!(unpacked.answer_csv, "SCRAMBLED,EGGS");
        assert_eq!(unpacked.words_string(), "SCRAMBLEDEGGS");
        assert_eq!(unpacked.words_lengths(), vec![9, 4]);
        assert!(unpacked.problems.is_empty());
    }

    #[test]
    fn test_unpack_numbers_become_placeholders() {
        let unpacked = unpack_answer("4,4");
        assert_eq!(unpacked.words_string(), "********");
        assert_eq!(unpacked.words_lengths(), vec![4, 4]);
        assert_eq!(unpacked.numeric_csv, "4,4");
    }

    #[test]
    fn test_unpack_all_placeholders_rewritten_as_numbers() {
        let unpacked = unpack_answer("***-**");
        assert_eq!(unpacked.answer_csv, "3-2");
        assert_eq!(unpacked.numeric_csv, "3-2");
        assert_eq!(unpacked.words_string(), "*****");
    }

    #[test]
    fn test_unpack_zero_and_empty_words() {
        assert_eq!(unpack_answer("3,0").problems, vec![ClueProblem::ZeroWordSize]);
        assert_eq!(unpack_answer("CAT,,DOG").problems, vec![ClueProblem::EmptyWord]);
    }

    #[test]
    fn test_grid_filled_across_and_down() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. Pets (CATS,DOGS)\ndown:\n- (1,1) 1. Taxi (CAB)\n");
        assert!(crossword.errors.is_empty(), "{:?}", crossword.errors);
        let row: String = (1..=8).filter_map(|x| crossword.cell(Coord::new(x, 1))).collect();
        assert_eq!(row, "CATSDOGS");
        assert_eq!(crossword.cell(Coord::new(1, 2)), Some('A'));
        assert_eq!(crossword.cell(Coord::new(1, 3)), Some('B'));
        assert_eq!(crossword.cell(Coord::new(2, 2)), Some(BLANK_CELL));
        assert_eq!(crossword.cell(Coord::new(16, 1)), None);
        assert_eq!(crossword.across[0].words_lengths, vec![4, 4]);
        assert_eq!(crossword.answers.as_ref().unwrap().down, vec!["CAB".to_string()]);
    }

    #[test]
    fn test_letter_clash() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. Feline (CAT)\ndown:\n- (1,1) 1. Dog (DOG)\n");
        assert_eq!(
            crossword.errors,
            vec!["Error: letter 1 clashes with previous clues in down clue=- (1,1) 1. Dog (DOG)".to_string()]
        );
    }

    #[test]
    fn test_each_bad_clue_reported() {
        let crossword = validated(
            "size: 15x15\nacross:\n- (16,1) 1. Off grid (CAT)\n- (1,16) 2. Also off (CAT)\n- (1,3) 3. Long (ABCDEFGHIJKLMNOP)\n",
        );
        assert_eq!(crossword.errors.len(), 3, "{:?}", crossword.errors);
        assert!(crossword.errors[0].starts_with("Error: x coord too large in across"));
        assert!(crossword.errors[1].starts_with("Error: y coord too large in across"));
        assert!(crossword.errors[2].starts_with("Error: answer too long for crossword in across"));
    }

    #[test]
    fn test_overflow_from_coord() {
        let crossword = validated("size: 15x15\nacross:\n- (14,1) 1. Too far (CAT)\n");
        assert_eq!(crossword.errors.len(), 1);
        assert!(crossword.errors[0].starts_with("Error: answer too long for crossword from that coord"));
    }

    #[test]
    fn test_id_out_of_sequence() {
        let crossword = validated("size: 15x15\nacross:\n- (1,3) 2. B (CAT)\n- (1,1) 1. A (DOG)\n");
        assert_eq!(crossword.errors.len(), 1);
        assert!(crossword.errors[0].starts_with("Error: id out of sequence in across clue=- (1,1) 1. A (DOG)"));
    }

    #[test]
    fn test_shared_id_must_share_coords() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. A (CAT)\ndown:\n- (2,1) 1. B (ACE)\n");
        assert_eq!(crossword.errors.len(), 1);
        assert!(crossword.errors[0].contains("shared id clashes with previous coordinates"));
    }

    #[test]
    fn test_zero_id_and_zero_coord() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 0. A (CAT)\n- (0,3) 1. B (CAT)\n");
        assert_eq!(crossword.errors.len(), 2);
        assert!(crossword.errors[0].starts_with("Error: id must be positive"));
        assert!(crossword.errors[1].starts_with("Error: x coord too small"));
    }

    #[test]
    fn test_missing_ids_reported() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. A (CAT)\n- (1,5) 4. B (DOG)\n");
        assert_eq!(
            crossword.errors,
            vec!["Error: missing clue with id=2".to_string(), "Error: missing clue with id=3".to_string()]
        );
    }

    #[test]
    fn test_starts_left_of_previous() {
        let crossword = validated("size: 15x15\nacross:\n- (5,1) 1. A (CAT)\n- (1,1) 2. B (DOG)\n");
        assert_eq!(crossword.errors, vec!["Error: clue 2 starts to the left of clue 1".to_string()]);
    }

    #[test]
    fn test_starts_above_previous() {
        let crossword = validated("size: 15x15\nacross:\n- (1,3) 1. A (CAT)\n- (5,1) 2. B (DOG)\n");
        assert_eq!(crossword.errors, vec!["Error: clue 2 starts above clue 1".to_string()]);
    }

    #[test]
    fn test_starts_at_same_coords_as_previous() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. A (CAT)\ndown:\n- (1,1) 2. B (CAB)\n");
        assert_eq!(crossword.errors, vec!["Error: clue 2 starts at same coords as clue 1".to_string()]);
    }

    #[test]
    fn test_no_clues() {
        let mut crossword = parse_dsl("size: 15x15\n");
        validate_and_embellish(&mut crossword);
        assert_eq!(crossword.errors, vec!["Error: no valid clues specified".to_string()]);
    }

    #[test]
    fn test_zero_word_size_reported_but_clue_checked() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. A (3,0)\n");
        assert_eq!(crossword.errors.len(), 1);
        assert!(crossword.errors[0].starts_with("Error: answer contains a word size of 0"));
        assert_eq!(crossword.answers.as_ref().unwrap().across, vec!["***".to_string()]);
    }
}
