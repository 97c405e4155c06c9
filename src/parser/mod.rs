//! Line parser for the canonical crossword DSL.
//!
//! ```text
//! ---
//! name: Example
//! size: 15x15
//! across:
//! - (1,1) 1. Feline (CAT)
//! down:
//! - (1,1) 1. Taxi (CAB)
//! ---
//! ```
//!
//! Parsing never fails outright: every line that can't be classified adds an error to
//! the returned `Crossword` and the scan carries on. The one exception is a clue that
//! appears before any `across:`/`down:` declarator, which records an error and stops the
//! scan for the rest of the text.

pub mod line;

use crate::crossword::{Clue, Crossword};
use crate::errors::ValidationError;
use line::{classify_line, strip_comment, LineKind, MetaField};

/// Parse DSL text into an unvalidated `Crossword`.
#[must_use]
pub fn parse_dsl(text: &str) -> Crossword {
    let mut crossword = Crossword {
        original_dsl: text.to_string(),
        ..Crossword::default()
    };
    let mut grouping = None;

    for raw_line in text.split(['\r', '\n']) {
        let line = strip_comment(raw_line).trim();

        match classify_line(line) {
            LineKind::Ignored => {}
            LineKind::Field(field, value) => set_field(&mut crossword, field, value),
            LineKind::Size(dimensions) => crossword.dimensions = dimensions,
            LineKind::Grouping(direction) => grouping = Some(direction),
            LineKind::Clue(parsed) => {
                let Some(direction) = grouping else {
                    crossword.errors.push(ValidationError::NoGrouping.to_string());
                    break;
                };
                let mut clue = Clue::new(parsed.coordinates, parsed.id, parsed.body, parsed.answer_csv);
                clue.original = line.to_string();
                crossword.clues_mut(direction).push(clue);
            }
            LineKind::Unrecognised => {
                crossword.errors.push(ValidationError::UnparseableLine { line: line.to_string() }.to_string());
            }
        }
    }

    log::debug!(
        "parsed DSL: {} across, {} down, {} errors",
        crossword.across.len(),
        crossword.down.len(),
        crossword.errors.len()
    );
    crossword
}

fn set_field(crossword: &mut Crossword, field: MetaField, value: &str) {
    let value = value.to_string();
    match field {
        MetaField::Version => crossword.version = value,
        MetaField::Name => crossword.name = Some(value),
        MetaField::Author => crossword.author = value,
        MetaField::Editor => crossword.editor = value,
        MetaField::Copyright => crossword.copyright = value,
        MetaField::Publisher => crossword.publisher = value,
        MetaField::Pubdate => crossword.pubdate = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::{Coord, Dimensions, DEFAULT_EDITOR, DEFAULT_PUBDATE};

    #[test]
    fn test_defaults_when_fields_absent() {
        let crossword = parse_dsl("");
        assert!(crossword.errors.is_empty());
        assert_eq!(crossword.author, "");
        assert_eq!(crossword.editor, DEFAULT_EDITOR);
        assert_eq!(crossword.pubdate, DEFAULT_PUBDATE);
        assert_eq!(crossword.dimensions, Dimensions::Seventeen);
        assert_eq!(crossword.name, None);
    }

    #[test]
    fn test_fields_and_clues() {
        let text = "---\nname: Test\nauthor: A. Setter # comment\nsize: 15x15\nacross:\n- (1,1) 1. Feline (CAT)\ndown:\n- (1,1) 1. Taxi (CAB)\n---\n";
        let crossword = parse_dsl(text);
        assert!(crossword.errors.is_empty(), "{:?}", crossword.errors);
        assert_eq!(crossword.name.as_deref(), Some("Test"));
        assert_eq!(crossword.author, "A. Setter");
        assert_eq!(crossword.dimensions, Dimensions::Fifteen);
        assert_eq!(crossword.across.len(), 1);
        assert_eq!(crossword.down.len(), 1);
        assert_eq!(crossword.across[0].coordinates, Coord::new(1, 1));
        assert_eq!(crossword.down[0].answer_csv, "CAB");
        assert_eq!(crossword.across[0].original, "- (1,1) 1. Feline (CAT)");
        assert_eq!(crossword.original_dsl, text);
    }

    #[test]
    fn test_unparseable_lines_accumulate() {
        let crossword = parse_dsl("what\nacross:\n- (1,1) 1. Feline (CAT)\nsize: 12x12\n");
        assert_eq!(
            crossword.errors,
            vec![
                "ERROR: couldn't parse line: what".to_string(),
                "ERROR: couldn't parse line: size: 12x12".to_string(),
            ]
        );
        assert_eq!(crossword.across.len(), 1);
    }

    #[test]
    fn test_clue_without_grouping_halts_scan() {
        let crossword = parse_dsl("- (1,1) 1. Feline (CAT)\nnonsense\nacross:\n- (1,2) 2. Dog (DOG)\n");
        assert_eq!(
            crossword.errors,
            vec!["ERROR: clue specified but no 'across' or 'down' grouping specified".to_string()]
        );
        assert!(crossword.across.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let crossword = parse_dsl("size: 15x15\r\nacross:\r\n- (1,1) 1. Feline (CAT)\r\n");
        assert!(crossword.errors.is_empty());
        assert_eq!(crossword.across.len(), 1);
    }
}
