//! Error types for the two error channels of the compiler.
//!
//! # Accumulating errors
//!
//! The line parser and the grid validator never stop at the first problem. Each problem
//! becomes a [`ValidationError`], which is rendered to its user-facing string and pushed
//! onto `Crossword::errors`. The strings are what an editor shows next to the puzzle text,
//! so their exact wording is part of the contract.
//!
//! # Fatal adapter errors
//!
//! The format adapters (CrosswordCompiler XML, legacy JSON, Quick-Slow) treat malformed
//! structure as unrecoverable: the first problem aborts the conversion with an
//! [`AdapterError`]. Every message starts with `ERROR:` and names the offending field path.
//!
//! ```
//! use crossword_dsl::errors::AdapterError;
//!
//! let err = AdapterError::MissingField { field: "clues".to_string() };
//! assert_eq!(err.to_string(), "ERROR: missing field: clues");
//! assert!(err.help().is_some());
//! ```

use crate::crossword::Direction;

/// A problem with a single clue, found by the validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClueProblem {
    #[error("id must be positive")]
    NonPositiveId,

    #[error("id out of sequence")]
    IdOutOfSequence,

    #[error("x coord too large")]
    XTooLarge,

    #[error("y coord too large")]
    YTooLarge,

    #[error("x coord too small")]
    XTooSmall,

    #[error("y coord too small")]
    YTooSmall,

    #[error("shared id clashes with previous coordinates")]
    SharedIdClash,

    #[error("answer contains a word size of 0")]
    ZeroWordSize,

    #[error("answer contains an empty word")]
    EmptyWord,

    #[error("answer too long for crossword")]
    AnswerTooLong,

    #[error("answer too long for crossword from that coord")]
    AnswerOverflowsGrid,

    /// `letter` is 1-based.
    #[error("letter {letter} clashes with previous clues")]
    LetterClash { letter: usize },
}

/// Accumulated problems from the line parser and the validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("ERROR: clue specified but no 'across' or 'down' grouping specified")]
    NoGrouping,

    #[error("ERROR: couldn't parse line: {line}")]
    UnparseableLine { line: String },

    #[error("Error: no valid clues specified")]
    NoClues,

    #[error("Error: {problem} in {direction} clue={line}")]
    Clue {
        problem: ClueProblem,
        direction: Direction,
        line: String,
    },

    #[error("Error: missing clue with id={id}")]
    MissingId { id: u32 },

    #[error("Error: clue {id} starts above clue {prev}")]
    StartsAbove { id: u32, prev: u32 },

    #[error("Error: clue {id} starts at same coords as clue {prev}")]
    SameCoords { id: u32, prev: u32 },

    #[error("Error: clue {id} starts to the left of clue {prev}")]
    StartsLeftOf { id: u32, prev: u32 },
}

/// Fatal structural problems in an adapter's input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("ERROR: input appears to be non-Crossword-Compiler XML")]
    NotCrosswordCompiler,

    #[error("ERROR: malformed XML: {message}")]
    MalformedXml { message: String },

    #[error("ERROR: missing {path} element")]
    MissingElement { path: String },

    #[error("ERROR: expected a single {path} element but found {count}")]
    DuplicateElement { path: String, count: usize },

    #[error("ERROR: missing {path}.@{attribute} attribute")]
    MissingAttribute { path: String, attribute: String },

    #[error("ERROR: invalid {path}.@{attribute} attribute: '{value}'")]
    InvalidAttribute {
        path: String,
        attribute: String,
        value: String,
    },

    #[error("ERROR: conflicting width ({width}) and height ({height}) in {path}")]
    GridNotSquare {
        path: String,
        width: String,
        height: String,
    },

    #[error("ERROR: missing cell at x={x}, y={y} in {path}")]
    MissingCell { path: String, x: usize, y: usize },

    #[error("ERROR: cannot find title text in {path}")]
    MissingClueTitle { path: String },

    #[error("ERROR: {path} have unrecognised direction={direction}")]
    UnrecognisedDirection { path: String, direction: String },

    #[error("ERROR: no text in clue number={number}")]
    MissingClueText { number: String },

    #[error("ERROR: could not parse clue id={id}")]
    UnparseableClueId { id: String },

    #[error("ERROR: no {direction} answer in the grid for clue id={id}")]
    UnknownAnswer { id: u32, direction: Direction },

    #[error("ERROR: cannot find {direction} clue for answer id={id}")]
    MissingClue { id: u32, direction: Direction },

    #[error("ERROR: cannot distribute formats among multi-clue {clue}: not enough remaining format values for {member}")]
    FormatExhausted { clue: String, member: String },

    #[error("ERROR: cannot distribute formats among multi-clue {clue}: remaining format value, {value}, too large for remaining answer length, {remaining}: {member}")]
    FormatOvershoot {
        clue: String,
        value: usize,
        remaining: usize,
        member: String,
    },

    #[error("ERROR: cannot fully distribute formats among multi-clue {clue}: some remaining formats, {leftover}")]
    FormatLeftover { clue: String, leftover: String },

    #[error("ERROR: invalid format '{format}' for {direction} clue id={id}")]
    InvalidFormat {
        id: u32,
        direction: Direction,
        format: String,
    },

    #[error("ERROR: format '{format}' does not match answer length {length} for {direction} clue id={id}")]
    FormatLengthMismatch {
        id: u32,
        direction: Direction,
        format: String,
        length: usize,
    },

    #[error("ERROR: invalid JSON: {message}")]
    MalformedJson { message: String },

    #[error("ERROR: missing field: {field}")]
    MissingField { field: String },

    #[error("ERROR: invalid field: {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("ERROR: {direction} has {clues} clues but {answers} answers")]
    AnswerCountMismatch {
        direction: Direction,
        clues: usize,
        answers: usize,
    },

    #[error("ERROR: {direction} clue id={id}: answer has {actual} letters but word lengths total {expected}")]
    AnswerLengthMismatch {
        direction: Direction,
        id: u32,
        expected: usize,
        actual: usize,
    },

    #[error("ERROR: no grid position for {direction} clue id={id}")]
    UnresolvableId { direction: Direction, id: u32 },

    #[error("ERROR: couldn't parse quick slow line: {line}")]
    UnparseableQuickSlowLine { line: String },

    #[error("ERROR: quick slow clue specified but no 'across' or 'down' grouping specified: {line}")]
    QuickSlowNoGrouping { line: String },

    #[error("ERROR: no grid template matches across clue ids [{ids}]")]
    NoMatchingTemplate { ids: String },

    #[error("ERROR: template {template} has no {direction} slot for clue id={id}")]
    TemplateMissingSlot {
        template: String,
        direction: Direction,
        id: u32,
    },

    #[error("ERROR: template {template} {direction} slot id={id} has length {slot_length} but the clue format totals {format_length}")]
    TemplateLengthMismatch {
        template: String,
        direction: Direction,
        id: u32,
        slot_length: usize,
        format_length: usize,
    },
}

impl AdapterError {
    /// Returns a helpful suggestion for this error, if there is one.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            AdapterError::NotCrosswordCompiler => Some("Only CrosswordCompiler XML exports (root element <crossword-compiler>) can be imported"),
            AdapterError::MalformedXml { .. } => Some("Check that the file is complete and every element is closed"),
            AdapterError::GridNotSquare { .. } => Some("Only square grids (15x15 or 17x17) are supported"),
            AdapterError::FormatExhausted { .. }
            | AdapterError::FormatOvershoot { .. }
            | AdapterError::FormatLeftover { .. } => Some("The format of a multi-clue answer must split exactly into the lengths of its grid answers, e.g. (4,5) for answers of length 4 and 5"),
            AdapterError::FormatLengthMismatch { .. } => Some("The numbers in a clue's format must add up to the length of its answer in the grid"),
            AdapterError::MissingField { .. } => Some("A spec needs author, editor, publisher, copyright, date, size, grid, gridnums and clues"),
            AdapterError::AnswerCountMismatch { .. } | AdapterError::AnswerLengthMismatch { .. } => Some("Each clue needs exactly one answer whose length matches its word lengths"),
            AdapterError::NoMatchingTemplate { .. } => Some("The across clue numbers must match one of the known grid templates exactly"),
            _ => None,
        }
    }

    /// Formats the error with its optional help text on a second line.
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self.help() {
            Some(help) => format!("{self}\n{help}"),
            None => self.to_string(),
        }
    }
}
