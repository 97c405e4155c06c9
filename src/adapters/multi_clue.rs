//! Multi-clue answers: one clue text covering several grid answers in sequence.
//!
//! A composite clue is numbered like `5,12` or `3,14 down`. The first id (the primary)
//! keeps the clue text; every other id (a child) gets a `See 5 across` stub. The
//! composite's format (`6,5-4,6`) describes the whole phrase and has to be split so each
//! member gets exactly the segments that fill its own answer.

use crate::crossword::Direction;
use crate::errors::AdapterError;
use crate::format::{AnswerFormat, Separator};
use crate::grid_shape::SlotStarts;
use fancy_regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// One member of a composite id: `14` or `14 down`.
pub(crate) static COMPOSITE_PIECE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)(?:\s+(across|down))?$").unwrap());

/// A parsed composite id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeId {
    pub primary: u32,
    /// Child ids with their explicit direction suffix, if any.
    pub children: Vec<(u32, Option<Direction>)>,
}

/// One grid answer taking part in a composite clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceMember {
    pub id: u32,
    pub direction: Direction,
    pub length: usize,
}

impl SequenceMember {
    fn label(&self) -> String {
        format!("{} {}", self.id, self.direction)
    }
}

#[must_use]
pub fn is_composite(raw_id: &str) -> bool {
    raw_id.contains(',')
}

fn parse_piece(piece: &str, raw_id: &str) -> Result<(u32, Option<Direction>), AdapterError> {
    let unparseable = || AdapterError::UnparseableClueId { id: raw_id.to_string() };
    let caps = COMPOSITE_PIECE_RE.captures(piece.trim()).ok().flatten().ok_or_else(unparseable)?;
    let id = caps.get(1).ok_or_else(unparseable)?.as_str().parse::<u32>().map_err(|_| unparseable())?;
    let direction = caps.get(2).and_then(|m| m.as_str().parse::<Direction>().ok());
    Ok((id, direction))
}

/// Split `5,12` / `3,14 down` into the primary and its children.
pub fn parse_composite_id(raw_id: &str) -> Result<CompositeId, AdapterError> {
    let mut pieces = raw_id.split(',');
    let (primary, _) = parse_piece(pieces.next().unwrap_or_default(), raw_id)?;
    let children = pieces.map(|p| parse_piece(p, raw_id)).collect::<Result<Vec<_>, _>>()?;
    Ok(CompositeId { primary, children })
}

/// Work out each member's direction and answer length, in sequence order.
///
/// A child with an explicit suffix uses it. A child whose id starts answers in both
/// directions is assumed to run the same way as the primary; that guess can be wrong
/// for grids where the phrase turns a corner, but it is what existing puzzle files
/// were built against. Otherwise the child takes the one direction its answer has.
pub fn resolve_sequence(
    direction: Direction,
    composite: &CompositeId,
    answers: &BTreeMap<u32, SlotStarts>,
) -> Result<Vec<SequenceMember>, AdapterError> {
    let member = |id: u32, direction: Direction| -> Result<SequenceMember, AdapterError> {
        let slot = answers
            .get(&id)
            .and_then(|starts| starts.get(direction))
            .ok_or(AdapterError::UnknownAnswer { id, direction })?;
        Ok(SequenceMember { id, direction, length: slot.length })
    };

    let mut sequence = vec![member(composite.primary, direction)?];
    for &(id, explicit) in &composite.children {
        let starts = answers.get(&id).ok_or(AdapterError::UnknownAnswer { id, direction })?;
        let child_direction = match explicit {
            Some(d) => d,
            None if starts.num_directions() == 2 => direction,
            None => starts.single_direction().ok_or(AdapterError::UnknownAnswer { id, direction })?,
        };
        sequence.push(member(id, child_direction)?);
    }
    Ok(sequence)
}

/// The `,12` / `,14 down` prefix spliced into the primary clue's body.
///
/// The direction is only spelled out for members whose id is ambiguous.
#[must_use]
pub fn multi_prefix(sequence: &[SequenceMember], answers: &BTreeMap<u32, SlotStarts>) -> String {
    let pieces: Vec<String> = sequence
        .iter()
        .skip(1)
        .map(|m| match answers.get(&m.id).map(SlotStarts::num_directions) {
            Some(1) => m.id.to_string(),
            _ => m.label(),
        })
        .collect();
    format!(",{}", pieces.join(","))
}

/// Partition the composite `format` among the sequence members.
///
/// Segments are consumed greedily from the front. A segment larger than what's left of
/// the current member, running out of segments, or segments left over at the end are
/// all errors. Each member keeps the separators that sat between its own segments.
pub fn distribute_format(
    clue: &str,
    format: &AnswerFormat,
    sequence: &[SequenceMember],
) -> Result<Vec<AnswerFormat>, AdapterError> {
    let mut next = 0;
    let mut distributed = Vec::with_capacity(sequence.len());

    for member in sequence {
        let mut lengths = Vec::new();
        let mut separators: Vec<Separator> = Vec::new();
        let mut remaining = member.length;
        while remaining > 0 {
            let Some(&value) = format.lengths.get(next) else {
                return Err(AdapterError::FormatExhausted { clue: clue.to_string(), member: member.label() });
            };
            if value > remaining {
                return Err(AdapterError::FormatOvershoot {
                    clue: clue.to_string(),
                    value,
                    remaining,
                    member: member.label(),
                });
            }
            if !lengths.is_empty() {
                separators.push(format.separators[next - 1]);
            }
            lengths.push(value);
            remaining -= value;
            next += 1;
        }
        distributed.push(AnswerFormat { lengths, separators });
    }

    if next < format.lengths.len() {
        let leftover: Vec<String> = format.lengths[next..].iter().map(ToString::to_string).collect();
        return Err(AdapterError::FormatLeftover { clue: clue.to_string(), leftover: leftover.join(",") });
    }
    Ok(distributed)
}
