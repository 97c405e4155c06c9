//! Quick-Slow clue lists to canonical DSL.
//!
//! A Quick-Slow puzzle is a plain clue list, as printed in a paper's tabloid section:
//!
//! ```text
//! Quick Slow
//! name: Quick Slow 12
//! ACROSS
//! 1 Domestic feline (3)
//! 3. Spider's creation (3)
//! DOWN
//! 1 Dairy animal (3)
//! 2 Restaurant bill (3)
//! ```
//!
//! There are no coordinates and no answers. The grid comes from the first template in
//! the configured [`TemplateLibrary`] whose across numbering matches the list exactly.
//!
//! [`TemplateLibrary`]: crate::templates::TemplateLibrary

use crate::config::CompileConfig;
use crate::crossword::Direction;
use crate::dsl_writer::{DslClueLine, DslDocument};
use crate::errors::AdapterError;
use crate::format::AnswerFormat;
use crate::parser::line::{classify_line, strip_comment, LineKind, MetaField};
use fancy_regex::Regex;
use log::debug;
use std::sync::LazyLock;

/// The marker line that identifies a Quick-Slow list.
pub(crate) static QUICK_SLOW_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*quick[\s_-]*slow\b").unwrap());

/// `ID[.] CLUE TEXT (FORMAT)`
pub(crate) static QUICK_SLOW_CLUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.?\s+(.+?)\s*\((\d+(?:[,\-]\d+)*)\)$").unwrap());

/// Does `text` carry the Quick-Slow marker?
#[must_use]
pub fn is_quick_slow(text: &str) -> bool {
    QUICK_SLOW_MARKER_RE.is_match(text).unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListedClue {
    id: u32,
    text: String,
    format: AnswerFormat,
}

fn parse_clue_line(line: &str) -> Option<ListedClue> {
    let caps = QUICK_SLOW_CLUE_RE.captures(line).ok().flatten()?;
    let id = caps.get(1)?.as_str().parse().ok()?;
    let text = caps.get(2)?.as_str().to_string();
    let format = caps.get(3)?.as_str().parse().ok()?;
    Some(ListedClue { id, text, format })
}

/// Convert a Quick-Slow clue list into canonical DSL text, without answers.
pub fn quick_slow_to_dsl(text: &str, config: &CompileConfig) -> Result<String, AdapterError> {
    let mut fields: Vec<(MetaField, String)> = Vec::new();
    let mut across = Vec::new();
    let mut down = Vec::new();
    let mut grouping = None;

    for raw_line in text.split(['\r', '\n']) {
        let line = strip_comment(raw_line).trim();
        if QUICK_SLOW_MARKER_RE.is_match(line).unwrap_or(false) {
            continue;
        }
        match classify_line(line) {
            LineKind::Ignored | LineKind::Size(_) => {}
            LineKind::Field(field, value) => fields.push((field, value.to_string())),
            LineKind::Grouping(direction) => grouping = Some(direction),
            LineKind::Clue(_) | LineKind::Unrecognised => {
                let clue = parse_clue_line(line)
                    .ok_or_else(|| AdapterError::UnparseableQuickSlowLine { line: line.to_string() })?;
                match grouping {
                    Some(Direction::Across) => across.push(clue),
                    Some(Direction::Down) => down.push(clue),
                    None => return Err(AdapterError::QuickSlowNoGrouping { line: line.to_string() }),
                }
            }
        }
    }

    let across_ids: Vec<u32> = across.iter().map(|c| c.id).collect();
    let template = config.templates.find_by_across_ids(&across_ids).ok_or_else(|| {
        let ids: Vec<String> = across_ids.iter().map(ToString::to_string).collect();
        AdapterError::NoMatchingTemplate { ids: ids.join(",") }
    })?;
    debug!("quick slow list matches template {}", template.name);

    let slots = template.numbered_slots();
    let mut doc = DslDocument::default();
    for (field, value) in &fields {
        doc.field(field.key(), value.clone());
    }
    doc.field("size", format!("{0}x{0}", template.size()));
    if !fields.iter().any(|(f, _)| *f == MetaField::Pubdate) {
        doc.field("pubdate", config.default_pubdate.clone());
    }

    for (direction, clues) in [(Direction::Across, across), (Direction::Down, down)] {
        for clue in clues {
            let missing = || AdapterError::TemplateMissingSlot {
                template: template.name.clone(),
                direction,
                id: clue.id,
            };
            let (coord, starts) = slots.get(&clue.id).ok_or_else(missing)?;
            let slot = starts.get(direction).ok_or_else(missing)?;
            if slot.length != clue.format.total() {
                return Err(AdapterError::TemplateLengthMismatch {
                    template: template.name.clone(),
                    direction,
                    id: clue.id,
                    slot_length: slot.length,
                    format_length: clue.format.total(),
                });
            }
            doc.clues_mut(direction).push(DslClueLine {
                coord: *coord,
                id: clue.id,
                body: clue.text,
                answer: clue.format.to_string(),
            });
        }
    }
    Ok(doc.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{GridTemplate, TemplateLibrary};

    fn config() -> CompileConfig {
        CompileConfig {
            default_pubdate: "2019/05/06".to_string(),
            templates: TemplateLibrary::new(vec![GridTemplate::new("tiny", ["...", ".#.", "..."])]),
        }
    }

    const LIST: &str = "Quick Slow\nname: Tiny One\nACROSS\n1 Domestic feline (3)\n3. Spider's creation (3)\nDOWN\n1 Dairy animal (3)\n2 Restaurant bill (3)\n";

    #[test]
    fn test_marker_detection() {
        assert!(is_quick_slow(LIST));
        assert!(is_quick_slow("  quick-slow\n"));
        assert!(is_quick_slow("# header\nQUICK_SLOW 7\n"));
        assert!(!is_quick_slow("name: Quick Slow\nacross:\n"));
    }

    #[test]
    fn test_list_to_dsl() {
        let dsl = quick_slow_to_dsl(LIST, &config()).unwrap();
        let expected = "name: Tiny One\nsize: 3x3\npubdate: 2019/05/06\nacross:\n- (1,1) 1. Domestic feline (3)\n- (1,3) 3. Spider's creation (3)\ndown:\n- (1,1) 1. Dairy animal (3)\n- (3,1) 2. Restaurant bill (3)";
        assert_eq!(dsl, expected);
    }

    #[test]
    fn test_explicit_pubdate_kept() {
        let list = LIST.replace("name: Tiny One", "pubdate: 2001/01/01");
        let dsl = quick_slow_to_dsl(&list, &config()).unwrap();
        assert!(dsl.contains("pubdate: 2001/01/01"));
        assert!(!dsl.contains("2019/05/06"));
    }

    #[test]
    fn test_no_matching_template() {
        let list = LIST.replace("3. Spider's", "4. Spider's");
        assert_eq!(
            quick_slow_to_dsl(&list, &config()).unwrap_err(),
            AdapterError::NoMatchingTemplate { ids: "1,4".to_string() }
        );
    }

    #[test]
    fn test_slot_checks() {
        let list = LIST.replace("2 Restaurant bill", "5 Restaurant bill");
        assert!(matches!(
            quick_slow_to_dsl(&list, &config()),
            Err(AdapterError::TemplateMissingSlot { id: 5, direction: Direction::Down, .. })
        ));

        let list = LIST.replace("Dairy animal (3)", "Dairy animal (2,2)");
        assert!(matches!(
            quick_slow_to_dsl(&list, &config()),
            Err(AdapterError::TemplateLengthMismatch { slot_length: 3, format_length: 4, .. })
        ));
    }

    #[test]
    fn test_line_errors() {
        let list = "quick slow\n1 Domestic feline (3)\n";
        assert!(matches!(quick_slow_to_dsl(list, &config()), Err(AdapterError::QuickSlowNoGrouping { .. })));

        let list = LIST.replace("1 Dairy animal (3)", "Dairy animal");
        assert_eq!(
            quick_slow_to_dsl(&list, &config()).unwrap_err(),
            AdapterError::UnparseableQuickSlowLine { line: "Dairy animal".to_string() }
        );
    }
}
