//! Block/open grids and the slots (answers) they contain.
//!
//! A cell starts an across answer when the cell to its right is open and the cell to
//! its left is a block or the edge; likewise for down. Anything outside the grid counts
//! as a block.

use crate::crossword::{Coord, Direction};
use std::collections::BTreeMap;

/// A placeholder letter for open cells whose solution isn't known.
pub const UNKNOWN_LETTER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Block,
    Open(Option<char>),
}

/// One answer's worth of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub length: usize,
    /// Solution letters; `*` where a cell has none.
    pub text: String,
}

/// The across and/or down slots starting at one numbered cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotStarts {
    pub across: Option<Slot>,
    pub down: Option<Slot>,
}

impl SlotStarts {
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<&Slot> {
        match direction {
            Direction::Across => self.across.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    #[must_use]
    pub fn num_directions(&self) -> usize {
        usize::from(self.across.is_some()) + usize::from(self.down.is_some())
    }

    /// The only direction, if exactly one slot starts here.
    #[must_use]
    pub fn single_direction(&self) -> Option<Direction> {
        match (&self.across, &self.down) {
            (Some(_), None) => Some(Direction::Across),
            (None, Some(_)) => Some(Direction::Down),
            _ => None,
        }
    }
}

/// A square grid of cells, row-major, with 1-based coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridShape {
    size: usize,
    cells: Vec<Cell>,
}

impl GridShape {
    /// A grid of open, letterless cells.
    #[must_use]
    pub fn open(size: usize) -> Self {
        GridShape { size, cells: vec![Cell::Open(None); size * size] }
    }

    /// Build from rows of `#` (block) and anything else (open).
    ///
    /// Returns `None` unless the rows form a square.
    #[must_use]
    pub fn from_pattern<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != size {
                return None;
            }
            cells.extend(row.chars().map(|c| if c == '#' { Cell::Block } else { Cell::Open(None) }));
        }
        Some(GridShape { size, cells })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.x == 0 || coord.y == 0 || coord.x > self.size || coord.y > self.size {
            None
        } else {
            Some(coord.flat_index(self.size))
        }
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = cell;
        }
    }

    #[must_use]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.index(coord).map_or(Cell::Block, |i| self.cells[i])
    }

    fn is_block(&self, x: usize, y: usize) -> bool {
        matches!(self.cell(Coord::new(x, y)), Cell::Block)
    }

    /// Does an answer in `direction` start at `coord`?
    #[must_use]
    pub fn starts(&self, coord: Coord, direction: Direction) -> bool {
        let Coord { x, y } = coord;
        if self.is_block(x, y) {
            return false;
        }
        match direction {
            Direction::Across => !self.is_block(x + 1, y) && (x == 1 || self.is_block(x - 1, y)),
            Direction::Down => !self.is_block(x, y + 1) && (y == 1 || self.is_block(x, y - 1)),
        }
    }

    /// Scan from `coord` to the next block or edge.
    #[must_use]
    pub fn scan(&self, coord: Coord, direction: Direction) -> Slot {
        let mut text = String::new();
        let mut here = coord;
        while let Cell::Open(letter) = self.cell(here) {
            text.push(letter.unwrap_or(UNKNOWN_LETTER));
            match direction {
                Direction::Across => here.x += 1,
                Direction::Down => here.y += 1,
            }
        }
        Slot { length: text.chars().count(), text }
    }

    /// The slots starting at `coord`.
    #[must_use]
    pub fn slot_starts(&self, coord: Coord) -> SlotStarts {
        let slot = |direction| self.starts(coord, direction).then(|| self.scan(coord, direction));
        SlotStarts {
            across: slot(Direction::Across),
            down: slot(Direction::Down),
        }
    }

    /// Standard crossword numbering: every cell that starts a slot gets the next
    /// number, scanning rows top to bottom and left to right.
    #[must_use]
    pub fn numbered_slots(&self) -> BTreeMap<u32, (Coord, SlotStarts)> {
        let mut numbered = BTreeMap::new();
        let mut next = 1;
        for y in 1..=self.size {
            for x in 1..=self.size {
                let coord = Coord::new(x, y);
                let starts = self.slot_starts(coord);
                if starts.num_directions() > 0 {
                    numbered.insert(next, (coord, starts));
                    next += 1;
                }
            }
        }
        numbered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> GridShape {
        GridShape::from_pattern(&["...#", ".#..", "....", "#..."]).unwrap()
    }

    #[test]
    fn test_from_pattern_rejects_ragged_rows() {
        assert!(GridShape::from_pattern(&["...", ".."]).is_none());
        assert_eq!(shape().size(), 4);
    }

    #[test]
    fn test_starts_rule() {
        let g = shape();
        assert!(g.starts(Coord::new(1, 1), Direction::Across));
        assert!(g.starts(Coord::new(1, 1), Direction::Down));
        assert!(!g.starts(Coord::new(2, 1), Direction::Across));
        // (2,1) has a block below it
        assert!(!g.starts(Coord::new(2, 1), Direction::Down));
        assert!(g.starts(Coord::new(3, 2), Direction::Across));
        assert!(!g.starts(Coord::new(4, 1), Direction::Down));
    }

    #[test]
    fn test_scan_stops_at_block_and_edge() {
        let g = shape();
        assert_eq!(g.scan(Coord::new(1, 1), Direction::Across).length, 3);
        assert_eq!(g.scan(Coord::new(1, 1), Direction::Down).length, 3);
        assert_eq!(g.scan(Coord::new(3, 1), Direction::Down).length, 4);
        assert_eq!(g.scan(Coord::new(1, 1), Direction::Across).text, "***");
    }

    #[test]
    fn test_scan_collects_letters() {
        let mut g = GridShape::open(3);
        g.set(Coord::new(1, 1), Cell::Open(Some('C')));
        g.set(Coord::new(2, 1), Cell::Open(Some('A')));
        g.set(Coord::new(3, 1), Cell::Open(Some('T')));
        assert_eq!(g.scan(Coord::new(1, 1), Direction::Across).text, "CAT");
    }

    #[test]
    fn test_numbering() {
        let numbered = shape().numbered_slots();
        let ids: Vec<(u32, Coord)> = numbered.iter().map(|(id, (c, _))| (*id, *c)).collect();
        assert_eq!(
            ids,
            vec![
                (1, Coord::new(1, 1)),
                (2, Coord::new(3, 1)),
                (3, Coord::new(3, 2)),
                (4, Coord::new(4, 2)),
                (5, Coord::new(1, 3)),
                (6, Coord::new(2, 3)),
                (7, Coord::new(2, 4)),
            ]
        );
        assert_eq!(numbered[&1].1.num_directions(), 2);
        assert_eq!(numbered[&3].1.single_direction(), Some(Direction::Across));
    }
}
