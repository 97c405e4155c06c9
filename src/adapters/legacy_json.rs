//! Legacy JSON specs back to canonical DSL.
//!
//! Older exports stored only the spec (the shape [`crate::generate::Spec`] serializes
//! to). The clue texts, word lengths and `gridnums` are enough to rebuild the DSL. Answer
//! letters come from `answers` when present, otherwise every cell becomes an `X`
//! placeholder.

use crate::config::CompileConfig;
use crate::crossword::{Coord, Direction};
use crate::dsl_writer::{DslClueLine, DslDocument};
use crate::errors::AdapterError;
use crate::format::{AnswerFormat, Separator};
use crate::parser::line::{classify_line, LineKind, MetaField};
use fancy_regex::Regex;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Letter used for cells of a spec that had no answers.
pub const PLACEHOLDER_LETTER: char = 'X';

/// Fields every spec carries, checked in this order.
pub const REQUIRED_FIELDS: [&str; 9] =
    ["author", "editor", "publisher", "copyright", "date", "size", "grid", "gridnums", "clues"];

/// The ` (6,5-4,6)` the spec appends to each clue body.
pub(crate) static TRAILING_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\([0-9,\-]+\)$").unwrap());

type Object = Map<String, Value>;

fn invalid(field: &str, reason: impl Into<String>) -> AdapterError {
    AdapterError::InvalidField { field: field.to_string(), reason: reason.into() }
}

fn str_field<'a>(spec: &'a Object, field: &str) -> Result<&'a str, AdapterError> {
    spec.get(field)
        .ok_or_else(|| AdapterError::MissingField { field: field.to_string() })?
        .as_str()
        .ok_or_else(|| invalid(field, "expected a string"))
}

fn array<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>, AdapterError> {
    value.as_array().ok_or_else(|| invalid(field, "expected an array"))
}

/// Clue id -> 1-based coordinate, from the 0-based `gridnums` rows.
fn parse_gridnums(gridnums: &Value) -> Result<BTreeMap<u64, Coord>, AdapterError> {
    let mut coords = BTreeMap::new();
    for (y, row) in array(gridnums, "gridnums")?.iter().enumerate() {
        for (x, cell) in array(row, "gridnums")?.iter().enumerate() {
            let id = cell.as_u64().ok_or_else(|| invalid("gridnums", format!("non-integer entry {cell}")))?;
            if id > 0 {
                coords.insert(id, Coord::new(x + 1, y + 1));
            }
        }
    }
    Ok(coords)
}

/// `[id, "body (numericCSV)", wordsLengths, numericCSV]`
#[derive(Debug, Clone, PartialEq, Eq)]
struct SpecClue {
    id: u32,
    body: String,
    lengths: Vec<usize>,
    numeric_csv: Option<String>,
}

fn parse_clue(item: &Value, field: &str) -> Result<SpecClue, AdapterError> {
    let parts = array(item, field)?;
    let id = parts
        .first()
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| invalid(field, format!("clue without an integer id: {item}")))?;
    let body = parts
        .get(1)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(field, format!("clue {id} has no text")))?;
    let raw_lengths = parts
        .get(2)
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(field, format!("clue {id} has no word lengths")))?;

    // some old exports have stray non-integer values in the lengths
    let lengths: Vec<usize> = raw_lengths
        .iter()
        .filter_map(|v| v.as_u64().and_then(|n| usize::try_from(n).ok()))
        .collect();
    if lengths.len() != raw_lengths.len() {
        warn!("dropped {} non-integer word lengths from clue {id}", raw_lengths.len() - lengths.len());
    }

    let body = match TRAILING_FORMAT_RE.find(body).ok().flatten() {
        Some(m) => &body[..m.start()],
        None => body,
    };
    let numeric_csv = parts.get(3).and_then(Value::as_str).map(str::to_string);
    Ok(SpecClue { id, body: body.to_string(), lengths, numeric_csv })
}

/// Cut `letters` into words of `lengths`, joined with the clue's own separators when
/// its numeric CSV lines up with the lengths, with commas otherwise.
fn split_answer(letters: &str, lengths: &[usize], numeric_csv: Option<&str>) -> String {
    let separators = numeric_csv
        .and_then(|csv| csv.parse::<AnswerFormat>().ok())
        .filter(|format| format.lengths == lengths)
        .map(|format| format.separators)
        .unwrap_or_else(|| vec![Separator::Comma; lengths.len().saturating_sub(1)]);
    AnswerFormat { lengths: lengths.to_vec(), separators }.apply(letters)
}

fn clue_lines(
    spec: &Object,
    direction: Direction,
    coords: &BTreeMap<u64, Coord>,
    doc: &mut DslDocument,
) -> Result<(), AdapterError> {
    let field = format!("clues.{direction}");
    let clues = match spec.get("clues").and_then(|c| c.get(direction.as_str())) {
        Some(list) => array(list, &field)?,
        None => return Err(AdapterError::MissingField { field }),
    };
    let answers = match spec.get("answers").and_then(|a| a.get(direction.as_str())) {
        Some(list) => Some(array(list, &format!("answers.{direction}"))?),
        None => None,
    };
    if let Some(answers) = answers {
        if answers.len() != clues.len() {
            return Err(AdapterError::AnswerCountMismatch {
                direction,
                clues: clues.len(),
                answers: answers.len(),
            });
        }
    }

    for (i, item) in clues.iter().enumerate() {
        let clue = parse_clue(item, &field)?;
        let expected: usize = clue.lengths.iter().sum();
        let letters = match answers.and_then(|a| a.get(i)) {
            Some(answer) => {
                let answer = answer
                    .as_str()
                    .ok_or_else(|| invalid(&format!("answers.{direction}"), "expected strings"))?
                    .to_uppercase();
                let actual = answer.chars().count();
                if actual != expected {
                    return Err(AdapterError::AnswerLengthMismatch { direction, id: clue.id, expected, actual });
                }
                answer
            }
            None => PLACEHOLDER_LETTER.to_string().repeat(expected),
        };
        let coord = *coords
            .get(&u64::from(clue.id))
            .ok_or(AdapterError::UnresolvableId { direction, id: clue.id })?;
        doc.clues_mut(direction).push(DslClueLine {
            coord,
            id: clue.id,
            answer: split_answer(&letters, &clue.lengths, clue.numeric_csv.as_deref()),
            body: clue.body,
        });
    }
    Ok(())
}

/// Convert a legacy JSON spec into canonical DSL text.
pub fn legacy_json_to_dsl(text: &str, config: &CompileConfig) -> Result<String, AdapterError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| AdapterError::MalformedJson { message: e.to_string() })?;
    let spec = value.as_object().ok_or_else(|| invalid("(root)", "expected an object"))?;
    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !spec.contains_key(**f)) {
        return Err(AdapterError::MissingField { field: (*missing).to_string() });
    }

    let rows = spec["size"]
        .get("rows")
        .and_then(Value::as_u64)
        .ok_or_else(|| invalid("size", "expected an integer size.rows"))?;
    let coords = parse_gridnums(&spec["gridnums"])?;
    debug!("legacy spec: {rows}x{rows}, {} numbered cells", coords.len());

    let mut doc = DslDocument::default();
    let name = spec.get("name").or_else(|| spec.get("id")).and_then(Value::as_str);
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        doc.field("name", name.trim());
    }
    for field in [MetaField::Author, MetaField::Editor, MetaField::Copyright, MetaField::Publisher] {
        let value = str_field(spec, field.key())?.trim();
        if !value.is_empty() {
            doc.field(field.key(), value);
        }
    }
    doc.field("size", format!("{rows}x{rows}"));
    let date = str_field(spec, "date")?.trim();
    let is_pubdate = matches!(classify_line(&format!("pubdate: {date}")), LineKind::Field(MetaField::Pubdate, _));
    doc.field("pubdate", if is_pubdate { date.to_string() } else { config.default_pubdate.clone() });

    for direction in Direction::ALL {
        clue_lines(spec, direction, &coords, &mut doc)?;
    }
    Ok(doc.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> CompileConfig {
        CompileConfig::default().with_pubdate("2020/01/02")
    }

    fn spec() -> Value {
        json!({
            "name": "Mini",
            "author": "Setter",
            "editor": "Ed",
            "copyright": "2017, Financial Times",
            "publisher": "Financial Times",
            "date": "2018/02/03",
            "size": {"rows": 15, "cols": 15},
            "grid": [],
            "gridnums": [[1, 0, 2], [0, 0, 0], [3, 0, 0]],
            "clues": {
                "across": [[1, "Feline (3)", [3], "3"], [3, "Self-made man (4-4,3)", [4, 4, 3], "4-4,3"]],
                "down": [[1, "Hen's sound (3)", [3], "3"], [2, "Sesame (3)", [3], "3"]]
            },
            "answers": {"across": ["CAT", "SELFMADEMAN"], "down": ["COO", "TIL"]},
            "notepad": ""
        })
    }

    #[test]
    fn test_spec_to_dsl() {
        let dsl = legacy_json_to_dsl(&spec().to_string(), &config()).unwrap();
        let expected = "name: Mini\nauthor: Setter\neditor: Ed\ncopyright: 2017, Financial Times\npublisher: Financial Times\nsize: 15x15\npubdate: 2018/02/03\nacross:\n- (1,1) 1. Feline (CAT)\n- (1,3) 3. Self-made man (SELF-MADE,MAN)\ndown:\n- (1,1) 1. Hen's sound (COO)\n- (3,1) 2. Sesame (TIL)";
        assert_eq!(dsl, expected);
    }

    #[test]
    fn test_missing_answers_become_placeholders() {
        let mut spec = spec();
        spec.as_object_mut().unwrap().remove("answers");
        let dsl = legacy_json_to_dsl(&spec.to_string(), &config()).unwrap();
        assert!(dsl.contains("- (1,3) 3. Self-made man (XXXX-XXXX,XXX)"), "{dsl}");
    }

    #[test]
    fn test_stray_lengths_dropped() {
        let mut spec = spec();
        spec["clues"]["across"][0] = json!([1, "Feline (3)", [3, "3", null], "3"]);
        let dsl = legacy_json_to_dsl(&spec.to_string(), &config()).unwrap();
        assert!(dsl.contains("- (1,1) 1. Feline (CAT)"));
    }

    #[test]
    fn test_missing_field() {
        let mut spec = spec();
        spec.as_object_mut().unwrap().remove("clues");
        let err = legacy_json_to_dsl(&spec.to_string(), &config()).unwrap_err();
        assert_eq!(err.to_string(), "ERROR: missing field: clues");
    }

    #[test]
    fn test_structural_mismatches() {
        let mut spec = spec();
        spec["answers"]["down"] = json!(["COO"]);
        assert!(matches!(
            legacy_json_to_dsl(&spec.to_string(), &config()),
            Err(AdapterError::AnswerCountMismatch { direction: Direction::Down, clues: 2, answers: 1 })
        ));

        let mut spec = self::spec();
        spec["answers"]["across"][0] = json!("CATS");
        assert!(matches!(
            legacy_json_to_dsl(&spec.to_string(), &config()),
            Err(AdapterError::AnswerLengthMismatch { id: 1, expected: 3, actual: 4, .. })
        ));

        let mut spec = self::spec();
        spec["gridnums"] = json!([[1, 0, 0], [0, 0, 0], [3, 0, 0]]);
        assert_eq!(
            legacy_json_to_dsl(&spec.to_string(), &config()).unwrap_err(),
            AdapterError::UnresolvableId { direction: Direction::Down, id: 2 }
        );
    }

    #[test]
    fn test_non_date_falls_back_to_config() {
        let mut spec = spec();
        spec["date"] = json!("today");
        let dsl = legacy_json_to_dsl(&spec.to_string(), &config()).unwrap();
        assert!(dsl.contains("pubdate: 2020/01/02"));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(legacy_json_to_dsl("{ nope", &config()), Err(AdapterError::MalformedJson { .. })));
    }
}
