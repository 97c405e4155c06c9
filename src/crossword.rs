//! The `Crossword` aggregate and its clues.
//!
//! A `Crossword` is created fresh by [`crate::parser::parse_dsl`], mutated in place by
//! [`crate::validator::validate_and_embellish`], and then projected by the generators.
//! Fields that only exist after validation (`max_coord`, `grid`, `answers`, and the
//! derived clue fields) are `Option`s or empty until the validator fills them in.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_VERSION: &str = "standard v1";
pub const DEFAULT_EDITOR: &str = "Colin Inman";
pub const DEFAULT_PUBLISHER: &str = "Financial Times";
pub const DEFAULT_COPYRIGHT: &str = "2017, Financial Times";
/// Placeholder pubdate; not a `YYYY/MM/DD` date, so the DSL generator leaves it out.
pub const DEFAULT_PUBDATE: &str = "today";

/// The character an unfilled grid cell holds.
pub const BLANK_CELL: char = ' ';

/// Which way an answer runs. Across is always processed before down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }

    /// Offset between consecutive cells of an answer in the flattened grid.
    #[must_use]
    pub fn step(self, max_coord: usize) -> usize {
        match self {
            Direction::Across => 1,
            Direction::Down => max_coord,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("across") {
            Ok(Direction::Across)
        } else if s.eq_ignore_ascii_case("down") {
            Ok(Direction::Down)
        } else {
            Err(format!("unrecognised direction '{s}'"))
        }
    }
}

/// The two grid sizes the DSL accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimensions {
    Fifteen,
    #[default]
    Seventeen,
}

impl Dimensions {
    #[must_use]
    pub fn max_coord(self) -> usize {
        match self {
            Dimensions::Fifteen => 15,
            Dimensions::Seventeen => 17,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.max_coord();
        write!(f, "{n}x{n}")
    }
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "15x15" => Ok(Dimensions::Fifteen),
            "17x17" => Ok(Dimensions::Seventeen),
            _ => Err(format!("unsupported dimensions '{s}'")),
        }
    }
}

/// A 1-based (x, y) grid position; (1,1) is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[must_use]
    pub fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }

    /// Index into a flattened row-major grid. Only meaningful for coordinates >= 1.
    #[must_use]
    pub fn flat_index(self, max_coord: usize) -> usize {
        (self.x - 1) + (self.y - 1) * max_coord
    }

    /// Position key used for the monotonic-numbering check (`x + y * maxCoord`).
    #[must_use]
    pub fn ordinal(self, max_coord: usize) -> usize {
        self.x + self.y * max_coord
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One numbered entry in an across or down list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub coordinates: Coord,
    pub id: u32,
    pub body: String,
    /// Either letters (`SCRAMBLED,EGGS`), lengths (`6,5-4,6`) or placeholders (`*****`).
    pub answer_csv: String,
    /// The cleaned source line, quoted in validation errors.
    pub original: String,
    // Derived by the validator.
    pub numeric_csv: Option<String>,
    pub words_string: Option<String>,
    pub words_lengths: Vec<usize>,
}

impl Clue {
    #[must_use]
    pub fn new(coordinates: Coord, id: u32, body: impl Into<String>, answer_csv: impl Into<String>) -> Self {
        let body = body.into();
        let answer_csv = answer_csv.into();
        let original = format!("- {coordinates} {id}. {body} ({answer_csv})");
        Clue {
            coordinates,
            id,
            body,
            answer_csv,
            original,
            numeric_csv: None,
            words_string: None,
            words_lengths: Vec::new(),
        }
    }

    /// The lengths-only form, falling back to the raw answer before validation.
    #[must_use]
    pub fn numeric_or_raw(&self) -> &str {
        self.numeric_csv.as_deref().unwrap_or(&self.answer_csv)
    }
}

/// Concatenated answer letters per direction, in clue order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Answers {
    pub across: Vec<String>,
    pub down: Vec<String>,
}

impl Answers {
    pub fn for_direction_mut(&mut self, direction: Direction) -> &mut Vec<String> {
        match direction {
            Direction::Across => &mut self.across,
            Direction::Down => &mut self.down,
        }
    }

    /// Every answer letter, across first, with no separators.
    #[must_use]
    pub fn concatenated(&self) -> String {
        self.across.iter().chain(self.down.iter()).map(String::as_str).collect()
    }
}

/// Central aggregate, built up across the pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    pub version: String,
    pub name: Option<String>,
    pub author: String,
    pub editor: String,
    pub publisher: String,
    pub copyright: String,
    pub pubdate: String,
    pub dimensions: Dimensions,
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
    /// Non-empty means invalid; later stages short-circuit.
    pub errors: Vec<String>,
    /// The text that was handed to the line parser.
    pub original_dsl: String,
    // Set by the validator.
    pub max_coord: Option<usize>,
    pub grid: Option<Vec<char>>,
    /// Clue id -> first clue seen with that id.
    pub known_ids: BTreeMap<u32, Clue>,
    pub answers: Option<Answers>,
}

impl Default for Crossword {
    fn default() -> Self {
        Crossword {
            version: DEFAULT_VERSION.to_string(),
            name: None,
            author: String::new(),
            editor: DEFAULT_EDITOR.to_string(),
            publisher: DEFAULT_PUBLISHER.to_string(),
            copyright: DEFAULT_COPYRIGHT.to_string(),
            pubdate: DEFAULT_PUBDATE.to_string(),
            dimensions: Dimensions::default(),
            across: Vec::new(),
            down: Vec::new(),
            errors: Vec::new(),
            original_dsl: String::new(),
            max_coord: None,
            grid: None,
            known_ids: BTreeMap::new(),
            answers: None,
        }
    }
}

impl Crossword {
    /// A record that carries nothing but errors (e.g. from a failed adapter).
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Crossword { errors, ..Crossword::default() }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn clues(&self, direction: Direction) -> &[Clue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    pub fn clues_mut(&mut self, direction: Direction) -> &mut Vec<Clue> {
        match direction {
            Direction::Across => &mut self.across,
            Direction::Down => &mut self.down,
        }
    }

    /// The grid cell at a 1-based coordinate, if the grid has been built.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<char> {
        let max_coord = self.max_coord?;
        if coord.x == 0 || coord.y == 0 || coord.x > max_coord || coord.y > max_coord {
            return None;
        }
        self.grid.as_ref()?.get(coord.flat_index(max_coord)).copied()
    }
}
