//! Answer specifications and length formats.
//!
//! A clue's answer is written either as letters grouped into words (`SCRAMBLED,EGGS`),
//! as word lengths (`6,5-4,6`), or as placeholders (`*****`). A comma separates
//! distinct words and a hyphen joins the parts of a compound.
//!
//! The grammar is small enough that a single `nom` parser covers every spelling:
//!
//! ```text
//! spec      = piece { separator piece }
//! separator = "," | "-"
//! piece     = { any char except separator }      (may be empty)
//! ```
//!
//! Deciding what a piece *means* (letters, a length, or nonsense) is left to callers.

use nom::bytes::complete::take_while;
use nom::character::complete::one_of;
use nom::combinator::all_consuming;
use nom::multi::many0;
use nom::sequence::pair;
use nom::{IResult, Parser};
use std::fmt;
use std::str::FromStr;

/// What sits between two words of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Comma,
    Hyphen,
}

impl Separator {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Separator::Comma => ',',
            Separator::Hyphen => '-',
        }
    }

    fn from_char(c: char) -> Self {
        if c == '-' { Separator::Hyphen } else { Separator::Comma }
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '-'
}

fn piece(input: &str) -> IResult<&str, &str> {
    take_while(|c| !is_separator(c)).parse(input)
}

fn spec(input: &str) -> IResult<&str, (&str, Vec<(char, &str)>)> {
    all_consuming(pair(piece, many0(pair(one_of(",-"), piece)))).parse(input)
}

/// A spec split into its pieces and the separators between them.
///
/// Invariant: `separators.len() + 1 == pieces.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSpec<'a> {
    pub pieces: Vec<&'a str>,
    pub separators: Vec<Separator>,
}

impl<'a> SplitSpec<'a> {
    #[must_use]
    pub fn parse(input: &'a str) -> Self {
        match spec(input) {
            Ok((_, (first, rest))) => {
                let mut pieces = Vec::with_capacity(rest.len() + 1);
                let mut separators = Vec::with_capacity(rest.len());
                pieces.push(first);
                for (sep, p) in rest {
                    separators.push(Separator::from_char(sep));
                    pieces.push(p);
                }
                SplitSpec { pieces, separators }
            }
            // `piece` accepts anything up to a separator, so this only happens on a nom bug
            Err(_) => SplitSpec { pieces: vec![input], separators: Vec::new() },
        }
    }

    /// Rejoin transformed pieces with the original separators.
    pub fn join_with<F>(&self, mut f: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        for (i, p) in self.pieces.iter().enumerate() {
            if i > 0 {
                out.push(self.separators[i - 1].as_char());
            }
            out.push_str(&f(p));
        }
        out
    }
}

/// True for `[A-Z,\-*]+`: an answer written with letters and/or placeholders.
#[must_use]
pub fn is_letter_spec(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c == '*' || is_separator(c))
}

/// True for `[*,\-]+`: an answer that is placeholders only.
#[must_use]
pub fn is_placeholder_spec(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == '*' || is_separator(c))
}

/// True for `[0-9]+`.
#[must_use]
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Lengths-only form of an answer spec.
///
/// Letter specs have every run of letters/asterisks replaced by its length
/// (`SCRAMBLED,EGGS` -> `9,4`). Anything else is returned unchanged.
#[must_use]
pub fn numeric_csv(answer_csv: &str) -> String {
    if !is_letter_spec(answer_csv) {
        return answer_csv.to_string();
    }
    SplitSpec::parse(answer_csv).join_with(|p| if p.is_empty() { String::new() } else { p.chars().count().to_string() })
}

/// A parsed length format such as `6,5-4,6`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFormat {
    pub lengths: Vec<usize>,
    /// `separators[i]` sits between `lengths[i]` and `lengths[i + 1]`.
    pub separators: Vec<Separator>,
}

impl AnswerFormat {
    #[must_use]
    pub fn total(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Cut `text` into pieces of the format's lengths and rejoin them with its separators.
    ///
    /// `"SCRAMBLEDEGGS"` with `9,4` gives `"SCRAMBLED,EGGS"`. Short text yields short
    /// (possibly empty) trailing pieces; callers check the total beforehand.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len() + self.separators.len());
        let mut pos = 0;
        for (i, &len) in self.lengths.iter().enumerate() {
            if i > 0 {
                out.push(self.separators[i - 1].as_char());
            }
            let end = (pos + len).min(chars.len());
            let start = pos.min(end);
            out.extend(&chars[start..end]);
            pos += len;
        }
        out
    }
}

impl FromStr for AnswerFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = SplitSpec::parse(s.trim());
        let lengths = split
            .pieces
            .iter()
            .map(|p| {
                let p = p.trim();
                if is_all_digits(p) {
                    p.parse::<usize>().map_err(|e| format!("bad length '{p}': {e}"))
                } else {
                    Err(format!("bad length '{p}'"))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AnswerFormat { lengths, separators: split.separators })
    }
}

impl fmt::Display for AnswerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, len) in self.lengths.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.separators[i - 1].as_char())?;
            }
            write!(f, "{len}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_separators_and_empty_pieces() {
        let split = SplitSpec::parse("CAT,,DOG-S");
        assert_eq!(split.pieces, vec!["CAT", "", "DOG", "S"]);
        assert_eq!(split.separators, vec![Separator::Comma, Separator::Comma, Separator::Hyphen]);

        let single = SplitSpec::parse("ABC");
        assert_eq!(single.pieces, vec!["ABC"]);
        assert!(single.separators.is_empty());
    }

    #[test]
    fn test_numeric_csv_from_letters() {
        assert_eq!(numeric_csv("SCRAMBLED,EGGS"), "9,4");
        assert_eq!(numeric_csv("SELF-MADE,MAN"), "4-4,3");
        assert_eq!(numeric_csv("*****"), "5");
        assert_eq!(numeric_csv("**,***"), "2,3");
    }

    #[test]
    fn test_numeric_csv_passes_numbers_through() {
        assert_eq!(numeric_csv("6,5-4,6"), "6,5-4,6");
    }

    #[test]
    fn test_spec_classifiers() {
        assert!(is_letter_spec("AB-C*"));
        assert!(!is_letter_spec("4,4"));
        assert!(!is_letter_spec(""));
        assert!(is_placeholder_spec("**-*"));
        assert!(!is_placeholder_spec("A*"));
        assert!(is_all_digits("12"));
        assert!(!is_all_digits("1a"));
    }

    #[test]
    fn test_answer_format_parse_and_display() {
        let format: AnswerFormat = "6,5-4,6".parse().unwrap();
        assert_eq!(format.lengths, vec![6, 5, 4, 6]);
        assert_eq!(format.total(), 21);
        assert_eq!(format.to_string(), "6,5-4,6");
        assert!("6,x".parse::<AnswerFormat>().is_err());
        assert!("".parse::<AnswerFormat>().is_err());
    }

    #[test]
    fn test_answer_format_apply() {
        let format: AnswerFormat = "4-6,3".parse().unwrap();
        assert_eq!(format.apply("SELFSTYLEDMAN"), "SELF-STYLED,MAN");
        assert_eq!(format.apply("SELF"), "SELF-,");
        let format: AnswerFormat = "9,4".parse().unwrap();
        assert_eq!(format.apply("SCRAMBLEDEGGS"), "SCRAMBLED,EGGS");
    }
}
