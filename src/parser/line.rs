//! Classification of a single DSL line.
//!
//! Each physical line is matched against an ordered list of patterns; the first one
//! that matches decides the line's [`LineKind`]. The order matters: front-matter keys
//! are checked before metadata fields, and the clue pattern comes last.

use crate::crossword::{Coord, Dimensions, Direction};
use fancy_regex::{Captures, Regex};
use std::sync::LazyLock;

/// Front-matter keys a static site generator might leave in the file.
///
/// NB: if a new `LazyLock<Regex>` is added to this file, add it to
/// `crate::wasm::validate_internal_regexes` too.
pub(crate) static FRONT_MATTER_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(layout|tag|tags|permalink):\s").unwrap());

/// `key: value` metadata; the colon is optional.
pub(crate) static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(version|name|title|author|editor|copyright|publisher):?\s+(.+)$").unwrap()
});

pub(crate) static PUBDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^pubdate:?\s+(\d{4}/\d\d/\d\d)$").unwrap());

pub(crate) static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:size|dimensions):?\s+(15x15|17x17)$").unwrap());

pub(crate) static GROUPING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(across|down):?$").unwrap());

/// `- (X,Y) ID. BODY (ANSWERSPEC)`
pub(crate) static CLUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s\((\d+),(\d+)\)\s+(\d+)\.\s+(.+)\s+\(([A-Z,\-*]+|[0-9,-]+)\)$").unwrap()
});

/// A metadata field settable with a `key: value` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Version,
    Name,
    Author,
    Editor,
    Copyright,
    Publisher,
    Pubdate,
}

impl MetaField {
    fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "version" => Some(MetaField::Version),
            "name" | "title" => Some(MetaField::Name),
            "author" => Some(MetaField::Author),
            "editor" => Some(MetaField::Editor),
            "copyright" => Some(MetaField::Copyright),
            "publisher" => Some(MetaField::Publisher),
            "pubdate" => Some(MetaField::Pubdate),
            _ => None,
        }
    }

    /// The canonical key, as the DSL generator writes it.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MetaField::Version => "version",
            MetaField::Name => "name",
            MetaField::Author => "author",
            MetaField::Editor => "editor",
            MetaField::Copyright => "copyright",
            MetaField::Publisher => "publisher",
            MetaField::Pubdate => "pubdate",
        }
    }
}

/// The pieces of a clue line, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueLine<'a> {
    pub coordinates: Coord,
    pub id: u32,
    pub body: &'a str,
    pub answer_csv: &'a str,
}

/// What a cleaned line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Blank, `---`, or a front-matter key; all ignored.
    Ignored,
    Field(MetaField, &'a str),
    Size(Dimensions),
    Grouping(Direction),
    Clue(ClueLine<'a>),
    Unrecognised,
}

/// Everything before the first `#`.
#[must_use]
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn captures<'t>(re: &Regex, line: &'t str) -> Option<Captures<'t>> {
    match re.captures(line) {
        Ok(caps) => caps,
        Err(e) => {
            // only reachable if the backtrack limit is hit
            log::warn!("regex failed on line {line:?}: {e}");
            None
        }
    }
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Classify an already comment-stripped and trimmed line.
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.is_empty() || line == "---" {
        return LineKind::Ignored;
    }
    if captures(&FRONT_MATTER_FIELD_RE, line).is_some() {
        return LineKind::Ignored;
    }
    if let Some(caps) = captures(&FIELD_RE, line) {
        if let Some(field) = MetaField::from_key(group(&caps, 1)) {
            return LineKind::Field(field, group(&caps, 2));
        }
    }
    if let Some(caps) = captures(&PUBDATE_RE, line) {
        return LineKind::Field(MetaField::Pubdate, group(&caps, 1));
    }
    if let Some(caps) = captures(&SIZE_RE, line) {
        if let Ok(dimensions) = group(&caps, 1).parse() {
            return LineKind::Size(dimensions);
        }
    }
    if let Some(caps) = captures(&GROUPING_RE, line) {
        if let Ok(direction) = group(&caps, 1).parse() {
            return LineKind::Grouping(direction);
        }
    }
    if let Some(caps) = captures(&CLUE_RE, line) {
        // digit runs too long for the integer types are treated as unparseable
        let x = group(&caps, 1).parse::<usize>();
        let y = group(&caps, 2).parse::<usize>();
        let id = group(&caps, 3).parse::<u32>();
        if let (Ok(x), Ok(y), Ok(id)) = (x, y, id) {
            return LineKind::Clue(ClueLine {
                coordinates: Coord::new(x, y),
                id,
                body: group(&caps, 4),
                answer_csv: group(&caps, 5),
            });
        }
    }
    LineKind::Unrecognised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_regexes_compile() {
        for re in [&FRONT_MATTER_FIELD_RE, &FIELD_RE, &PUBDATE_RE, &SIZE_RE, &GROUPING_RE, &CLUE_RE] {
            assert!(re.is_match("").is_ok());
        }
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("size: 15x15 # the grid"), "size: 15x15 ");
        assert_eq!(strip_comment("# whole line"), "");
        assert_eq!(strip_comment("no comment"), "no comment");
    }

    #[test]
    fn test_ignored_lines() {
        assert_eq!(classify_line(""), LineKind::Ignored);
        assert_eq!(classify_line("---"), LineKind::Ignored);
        assert_eq!(classify_line("layout: crossword"), LineKind::Ignored);
        assert_eq!(classify_line("permalink: /x/"), LineKind::Ignored);
    }

    #[test]
    fn test_metadata_fields() {
        assert_eq!(classify_line("author: Someone"), LineKind::Field(MetaField::Author, "Someone"));
        assert_eq!(classify_line("Name Puzzle 1"), LineKind::Field(MetaField::Name, "Puzzle 1"));
        assert_eq!(classify_line("title: Puzzle 2"), LineKind::Field(MetaField::Name, "Puzzle 2"));
        assert_eq!(classify_line("pubdate: 2018/01/31"), LineKind::Field(MetaField::Pubdate, "2018/01/31"));
    }

    #[test]
    fn test_bad_pubdate_is_unrecognised() {
        assert_eq!(classify_line("pubdate: today"), LineKind::Unrecognised);
        assert_eq!(classify_line("pubdate: 31/01/2018"), LineKind::Unrecognised);
    }

    #[test]
    fn test_size_and_grouping() {
        assert_eq!(classify_line("size: 15x15"), LineKind::Size(Dimensions::Fifteen));
        assert_eq!(classify_line("dimensions 17x17"), LineKind::Size(Dimensions::Seventeen));
        assert_eq!(classify_line("size: 13x13"), LineKind::Unrecognised);
        assert_eq!(classify_line("across:"), LineKind::Grouping(Direction::Across));
        assert_eq!(classify_line("DOWN"), LineKind::Grouping(Direction::Down));
    }

    #[test]
    fn test_clue_line_with_letters() {
        let kind = classify_line("- (1,2) 3. Breakfast dish (SCRAMBLED,EGGS)");
        assert_eq!(
            kind,
            LineKind::Clue(ClueLine {
                coordinates: Coord::new(1, 2),
                id: 3,
                body: "Breakfast dish",
                answer_csv: "SCRAMBLED,EGGS",
            })
        );
    }

    #[test]
    fn test_clue_line_body_may_contain_parentheses() {
        match classify_line("- (5,1) 2. A clue (with aside) here (4-4)") {
            LineKind::Clue(clue) => {
                assert_eq!(clue.body, "A clue (with aside) here");
                assert_eq!(clue.answer_csv, "4-4");
            }
            other => panic!("expected clue, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_answer_spec_is_unrecognised() {
        assert_eq!(classify_line("- (1,1) 1. Mixed (CAT,3)"), LineKind::Unrecognised);
        assert_eq!(classify_line("- (1,1) 1. Lowercase (cat)"), LineKind::Unrecognised);
        assert_eq!(classify_line("-(1,1) 1. No space (CAT)"), LineKind::Unrecognised);
    }
}
