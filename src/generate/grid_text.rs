//! Plain-text picture of the solved grid.

use crate::crossword::{Crossword, BLANK_CELL};

/// Width of the coordinate ruler on the left and the top.
const RULER: usize = 3;

fn tens(n: usize) -> char {
    match n / 10 {
        0 => ' ',
        t => char::from_digit((t % 10) as u32, 10).unwrap_or('?'),
    }
}

fn units(n: usize) -> char {
    char::from_digit((n % 10) as u32, 10).unwrap_or('?')
}

/// The grid with tens/units rulers along the top and left; unfilled cells show as `.`.
///
/// Returns an empty string if the crossword never got as far as building a grid.
#[must_use]
pub fn generate_grid_text(crossword: &Crossword) -> String {
    let (Some(grid), Some(max_coord)) = (crossword.grid.as_ref(), crossword.max_coord) else {
        return String::new();
    };

    let pad = " ".repeat(RULER);
    let mut tens_row = pad.clone();
    let mut units_row = pad.clone();
    let mut spaces_row = pad;
    for x in 1..=max_coord {
        tens_row.push(tens(x));
        units_row.push(units(x));
        spaces_row.push(' ');
    }

    let mut rows = vec![tens_row, units_row, spaces_row];
    for (y, cells) in (1..=max_coord).zip(grid.chunks(max_coord)) {
        let mut row = String::with_capacity(RULER + max_coord);
        row.push(tens(y));
        row.push(units(y));
        row.push(' ');
        row.extend(cells.iter().map(|&c| if c == BLANK_CELL { '.' } else { c }));
        rows.push(row);
    }
    rows.join("\n")
}
