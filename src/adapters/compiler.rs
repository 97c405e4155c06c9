//! CrosswordCompiler XML export to canonical DSL.
//!
//! The export describes the solved grid cell by cell and lists the clues per direction.
//! Answers are recovered from the grid itself; each clue's `format` attribute then says
//! how to cut its answer into words. Multi-clue answers are handled in [`multi_clue`].
//!
//! Any structural problem aborts the conversion with an [`AdapterError`].
//!
//! [`multi_clue`]: crate::adapters::multi_clue

use crate::adapters::multi_clue::{distribute_format, is_composite, multi_prefix, parse_composite_id, resolve_sequence};
use crate::adapters::xml_tree::{parse_xml, XmlElement};
use crate::config::CompileConfig;
use crate::crossword::{Coord, Direction};
use crate::dsl_writer::{DslClueLine, DslDocument};
use crate::errors::AdapterError;
use crate::format::AnswerFormat;
use crate::grid_shape::{Cell, GridShape, SlotStarts};
use log::debug;
use std::collections::{BTreeMap, HashSet};

pub const ROOT_ELEMENT: &str = "crossword-compiler";
pub const UNSPECIFIED: &str = "UNSPECIFIED";

/// A clue as listed in the export, before multi-clue resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListedClue {
    number: String,
    format: String,
    text: String,
}

/// A clue ready to render: its text, its format and, for a composite primary, the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedClue {
    text: String,
    format: String,
    prefix: Option<String>,
}

type ClueTable = BTreeMap<Direction, BTreeMap<u32, ResolvedClue>>;

/// The parts of the document every later step relies on.
struct Sections<'a> {
    metadata: &'a XmlElement,
    crossword: &'a XmlElement,
    grid: &'a XmlElement,
    size: usize,
}

fn check_main_fields(root: &XmlElement) -> Result<Sections<'_>, AdapterError> {
    if root.name != ROOT_ELEMENT {
        return Err(AdapterError::MissingElement { path: ROOT_ELEMENT.to_string() });
    }
    let puzzle = root.child("rectangular-puzzle")?;
    let metadata = puzzle.child("metadata")?;
    let crossword = puzzle.child("crossword")?;
    let grid = crossword.child("grid")?;
    if !grid.has_child("cell") {
        return Err(AdapterError::MissingElement { path: format!("{}.cell", grid.path) });
    }
    let width = grid.required_attr("width")?;
    let height = grid.required_attr("height")?;
    if width != height {
        return Err(AdapterError::GridNotSquare {
            path: grid.path.clone(),
            width: width.to_string(),
            height: height.to_string(),
        });
    }
    let size = parse_attr::<usize>(grid, "width")?;
    for required in ["word", "clues"] {
        if !crossword.has_child(required) {
            return Err(AdapterError::MissingElement { path: format!("{}.{required}", crossword.path) });
        }
    }
    Ok(Sections { metadata, crossword, grid, size })
}

fn parse_attr<T: std::str::FromStr>(element: &XmlElement, attribute: &str) -> Result<T, AdapterError> {
    let value = element.required_attr(attribute)?;
    value.trim().parse::<T>().map_err(|_| AdapterError::InvalidAttribute {
        path: element.path.clone(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

/// Rebuild the solved grid and the clue numbers' coordinates from the `cell` elements.
fn parse_grid(grid: &XmlElement, size: usize) -> Result<(GridShape, BTreeMap<u32, Coord>), AdapterError> {
    let mut shape = GridShape::open(size);
    let mut numbers = BTreeMap::new();
    let mut seen = HashSet::new();

    for cell in grid.children_named("cell") {
        let x = parse_attr::<usize>(cell, "x")?;
        let y = parse_attr::<usize>(cell, "y")?;
        for (attribute, value) in [("x", x), ("y", y)] {
            if value == 0 || value > size {
                return Err(AdapterError::InvalidAttribute {
                    path: cell.path.clone(),
                    attribute: attribute.to_string(),
                    value: value.to_string(),
                });
            }
        }
        let coord = Coord::new(x, y);
        seen.insert(coord);

        if cell.attr("type") == Some("block") {
            shape.set(coord, Cell::Block);
            continue;
        }
        let letter = cell.attr("solution").and_then(|s| s.trim().chars().next()).map(|c| c.to_ascii_uppercase());
        shape.set(coord, Cell::Open(letter));
        if cell.attr("number").is_some() {
            numbers.insert(parse_attr::<u32>(cell, "number")?, coord);
        }
    }

    for y in 1..=size {
        for x in 1..=size {
            if !seen.contains(&Coord::new(x, y)) {
                return Err(AdapterError::MissingCell { path: grid.path.clone(), x, y });
            }
        }
    }
    Ok((shape, numbers))
}

/// The clues of every `clues` group, keyed by direction, in document order.
fn parse_listed_clues(crossword: &XmlElement) -> Result<BTreeMap<Direction, Vec<ListedClue>>, AdapterError> {
    let mut listed: BTreeMap<Direction, Vec<ListedClue>> = BTreeMap::new();
    for group in crossword.children_named("clues") {
        let title = group
            .optional_child("title")?
            .map(XmlElement::text_content)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AdapterError::MissingClueTitle { path: group.path.clone() })?;
        let direction = title.to_lowercase().parse::<Direction>().map_err(|_| AdapterError::UnrecognisedDirection {
            path: group.path.clone(),
            direction: title.to_lowercase(),
        })?;

        let clues = listed.entry(direction).or_default();
        for clue in group.children_named("clue") {
            let number = clue.required_attr("number")?.trim().to_string();
            let format = clue.required_attr("format")?.trim().to_string();
            let text = clue.text_content();
            if text.is_empty() {
                return Err(AdapterError::MissingClueText { number });
            }
            clues.push(ListedClue { number, format, text });
        }
    }
    Ok(listed)
}

/// Plain clues first, then every composite, which may overwrite plain entries for its
/// members with the redistributed formats.
fn resolve_clues(
    listed: &BTreeMap<Direction, Vec<ListedClue>>,
    answers: &BTreeMap<u32, SlotStarts>,
) -> Result<ClueTable, AdapterError> {
    let mut table: ClueTable = Direction::ALL.iter().map(|&d| (d, BTreeMap::new())).collect();

    for (&direction, clues) in listed {
        for clue in clues.iter().filter(|c| !is_composite(&c.number)) {
            let id = clue
                .number
                .parse::<u32>()
                .map_err(|_| AdapterError::UnparseableClueId { id: clue.number.clone() })?;
            let resolved = ResolvedClue { text: clue.text.clone(), format: clue.format.clone(), prefix: None };
            table.entry(direction).or_default().insert(id, resolved);
        }
    }

    for (&direction, clues) in listed {
        for clue in clues.iter().filter(|c| is_composite(&c.number)) {
            let composite = parse_composite_id(&clue.number)?;
            let sequence = resolve_sequence(direction, &composite, answers)?;
            let label = format!("{} {direction}", clue.number);
            let whole: AnswerFormat = clue.format.parse().map_err(|_| AdapterError::InvalidFormat {
                id: composite.primary,
                direction,
                format: clue.format.clone(),
            })?;
            let formats = distribute_format(&label, &whole, &sequence)?;
            debug!("multi-clue {label}: {} members", sequence.len());

            let prefix = multi_prefix(&sequence, answers);
            for (i, (member, format)) in sequence.iter().zip(formats).enumerate() {
                let resolved = if i == 0 {
                    ResolvedClue { text: clue.text.clone(), format: format.to_string(), prefix: Some(prefix.clone()) }
                } else {
                    ResolvedClue {
                        text: format!("See {} {direction}", composite.primary),
                        format: format.to_string(),
                        prefix: None,
                    }
                };
                table.entry(member.direction).or_default().insert(member.id, resolved);
            }
        }
    }
    Ok(table)
}

/// One DSL clue line per grid answer, answer letters cut up by the clue's format.
fn clue_lines(
    numbers: &BTreeMap<u32, Coord>,
    answers: &BTreeMap<u32, SlotStarts>,
    table: &ClueTable,
    doc: &mut DslDocument,
) -> Result<(), AdapterError> {
    for (&id, &coord) in numbers {
        let Some(starts) = answers.get(&id) else { continue };
        for direction in Direction::ALL {
            let Some(slot) = starts.get(direction) else { continue };
            let clue = table
                .get(&direction)
                .and_then(|clues| clues.get(&id))
                .ok_or(AdapterError::MissingClue { id, direction })?;
            let format: AnswerFormat = clue.format.parse().map_err(|_| AdapterError::InvalidFormat {
                id,
                direction,
                format: clue.format.clone(),
            })?;
            if format.total() != slot.length {
                return Err(AdapterError::FormatLengthMismatch {
                    id,
                    direction,
                    format: clue.format.clone(),
                    length: slot.length,
                });
            }
            let body = match &clue.prefix {
                Some(prefix) => format!("{prefix}. {}", clue.text),
                None => clue.text.clone(),
            };
            doc.clues_mut(direction).push(DslClueLine {
                coord,
                id,
                body,
                answer: format.apply(&slot.text),
            });
        }
    }
    Ok(())
}

fn metadata_text(metadata: &XmlElement, name: &str) -> Result<Option<String>, AdapterError> {
    Ok(metadata.optional_child(name)?.map(XmlElement::text_content).filter(|t| !t.is_empty()))
}

/// Convert a CrosswordCompiler XML export into canonical DSL text.
pub fn compiler_xml_to_dsl(text: &str, config: &CompileConfig) -> Result<String, AdapterError> {
    let root = parse_xml(text)?;
    let sections = check_main_fields(&root)?;

    let (shape, numbers) = parse_grid(sections.grid, sections.size)?;
    let answers: BTreeMap<u32, SlotStarts> =
        numbers.iter().map(|(&id, &coord)| (id, shape.slot_starts(coord))).collect();
    debug!("grid {0}x{0} with {1} numbered cells", sections.size, numbers.len());

    let listed = parse_listed_clues(sections.crossword)?;
    let table = resolve_clues(&listed, &answers)?;

    let mut doc = DslDocument::default();
    doc.field("name", metadata_text(sections.metadata, "title")?.unwrap_or_else(|| UNSPECIFIED.to_string()));
    doc.field("author", metadata_text(sections.metadata, "creator")?.unwrap_or_else(|| UNSPECIFIED.to_string()));
    for key in ["editor", "copyright", "publisher"] {
        if let Some(value) = metadata_text(sections.metadata, key)? {
            doc.field(key, value);
        }
    }
    doc.field("size", format!("{0}x{0}", sections.size));
    doc.field("pubdate", config.default_pubdate.clone());

    clue_lines(&numbers, &answers, &table, &mut doc)?;
    debug!("converted {} across and {} down clues", doc.across.len(), doc.down.len());
    Ok(doc.render())
}
