//! Rendering of canonical DSL lines.
//!
//! Shared by the DSL generator and every format adapter, so that whatever an adapter
//! emits is shaped exactly like what the line parser reads back.

use crate::crossword::{Coord, Direction};
use std::fmt;

/// One `- (x,y) id. body (answer)` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DslClueLine {
    pub coord: Coord,
    pub id: u32,
    pub body: String,
    pub answer: String,
}

impl fmt::Display for DslClueLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} {}. {} ({})", self.coord, self.id, self.body, self.answer)
    }
}

/// Metadata fields followed by the across and down blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DslDocument {
    pub fields: Vec<(&'static str, String)>,
    pub across: Vec<DslClueLine>,
    pub down: Vec<DslClueLine>,
}

impl DslDocument {
    pub fn field(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.push((key, value.into()));
    }

    pub fn clues_mut(&mut self, direction: Direction) -> &mut Vec<DslClueLine> {
        match direction {
            Direction::Across => &mut self.across,
            Direction::Down => &mut self.down,
        }
    }

    /// The document as lines, without front matter or trailing newline.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        for direction in Direction::ALL {
            lines.push(format!("{direction}:"));
            let clues = match direction {
                Direction::Across => &self.across,
                Direction::Down => &self.down,
            };
            lines.extend(clues.iter().map(ToString::to_string));
        }
        lines
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}
