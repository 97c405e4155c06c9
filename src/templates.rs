//! Known grid layouts for Quick-Slow puzzles.
//!
//! A Quick-Slow clue list carries clue numbers and lengths but no coordinates. The
//! layout is recovered by finding the template whose across numbering is exactly the
//! list's across numbers. Templates are plain block patterns (`#` block, `.` open);
//! numbers and coordinates come from standard crossword numbering.

use crate::crossword::{Coord, Direction};
use crate::grid_shape::{GridShape, SlotStarts};
use std::collections::BTreeMap;

const QUICK_SLOW_A: [&str; 15] = [
    ".......#.......",
    ".#.#.#.#.#.#.#.",
    ".........#.....",
    ".#.#.#.#.#.#.#.",
    ".....#.........",
    ".#.#.#.#.#.#.#.",
    ".......#.......",
    ".#.#.#...#.#.#.",
    ".......#.......",
    ".#.#.#.#.#.#.#.",
    ".........#.....",
    ".#.#.#.#.#.#.#.",
    ".....#.........",
    ".#.#.#.#.#.#.#.",
    ".......#.......",
];

const QUICK_SLOW_B: [&str; 15] = [
    ".........#.....",
    ".#.#.#.#.#.#.#.",
    ".......#.......",
    ".#.#.#.#.#.#.#.",
    "....#..........",
    ".#.#.#.#.#.#.#.",
    "...#.......#...",
    ".#.#.#.#.#.#.#.",
    "...#.......#...",
    ".#.#.#.#.#.#.#.",
    "..........#....",
    ".#.#.#.#.#.#.#.",
    ".......#.......",
    ".#.#.#.#.#.#.#.",
    ".....#.........",
];

/// A named block pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTemplate {
    pub name: String,
    pub rows: Vec<String>,
}

impl GridTemplate {
    pub fn new<S: Into<String>>(name: impl Into<String>, rows: impl IntoIterator<Item = S>) -> Self {
        GridTemplate { name: name.into(), rows: rows.into_iter().map(Into::into).collect() }
    }

    /// `None` when the rows don't form a square.
    #[must_use]
    pub fn shape(&self) -> Option<GridShape> {
        GridShape::from_pattern(self.rows.as_slice())
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Clue number -> starting cell and slots.
    #[must_use]
    pub fn numbered_slots(&self) -> BTreeMap<u32, (Coord, SlotStarts)> {
        self.shape().map(|shape| shape.numbered_slots()).unwrap_or_default()
    }

    /// Ids of the clues running in `direction`, ascending.
    #[must_use]
    pub fn ids(&self, direction: Direction) -> Vec<u32> {
        self.numbered_slots()
            .into_iter()
            .filter(|(_, (_, starts))| starts.get(direction).is_some())
            .map(|(id, _)| id)
            .collect()
    }
}

/// A read-only set of templates, searched in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLibrary {
    templates: Vec<GridTemplate>,
}

impl TemplateLibrary {
    #[must_use]
    pub fn new(templates: Vec<GridTemplate>) -> Self {
        TemplateLibrary { templates }
    }

    /// The layouts the Quick-Slow puzzles have been published in.
    #[must_use]
    pub fn builtin() -> Self {
        TemplateLibrary::new(vec![
            GridTemplate::new("quick-slow-a", QUICK_SLOW_A),
            GridTemplate::new("quick-slow-b", QUICK_SLOW_B),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridTemplate> {
        self.templates.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The first template whose across ids are exactly `across_ids`, in order.
    #[must_use]
    pub fn find_by_across_ids(&self, across_ids: &[u32]) -> Option<&GridTemplate> {
        self.templates.iter().find(|t| t.ids(Direction::Across) == across_ids)
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        TemplateLibrary::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_are_square_and_symmetric() {
        for template in TemplateLibrary::builtin().iter() {
            assert_eq!(template.size(), 15, "{}", template.name);
            assert!(template.shape().is_some(), "{}", template.name);
            let n = template.rows.len();
            for (i, row) in template.rows.iter().enumerate() {
                let mirrored: String = template.rows[n - 1 - i].chars().rev().collect();
                assert_eq!(*row, mirrored, "{} row {}", template.name, i + 1);
            }
        }
    }

    #[test]
    fn test_template_numbering() {
        let library = TemplateLibrary::builtin();
        let a = library.iter().next().unwrap();
        assert_eq!(
            a.ids(Direction::Across),
            vec![1, 5, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23]
        );
        assert_eq!(a.ids(Direction::Down), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let slots = a.numbered_slots();
        let (coord, starts) = &slots[&15];
        assert_eq!(*coord, Coord::new(7, 8));
        assert_eq!(starts.get(Direction::Across).map(|s| s.length), Some(3));
        let (coord, starts) = &slots[&19];
        assert_eq!(*coord, Coord::new(11, 11));
        assert_eq!(starts.get(Direction::Across).map(|s| s.length), Some(5));
    }

    #[test]
    fn test_find_by_across_ids() {
        let library = TemplateLibrary::builtin();
        let b_ids = [1, 6, 9, 10, 11, 12, 14, 15, 16, 17, 18, 19, 20, 21, 23, 24, 25, 26];
        assert_eq!(library.find_by_across_ids(&b_ids).map(|t| t.name.as_str()), Some("quick-slow-b"));
        assert!(library.find_by_across_ids(&[1, 2, 3]).is_none());
    }

    #[test]
    fn test_custom_library() {
        let library = TemplateLibrary::new(vec![GridTemplate::new("tiny", ["...", ".#.", "..."])]);
        assert_eq!(library.find_by_across_ids(&[1, 3]).map(|t| t.name.as_str()), Some("tiny"));
        assert!(TemplateLibrary::new(Vec::new()).is_empty());
    }
}
