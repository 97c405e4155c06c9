//! The machine-readable spec consumed by the crossword-rendering widget.

use crate::crossword::{Answers, Crossword, Direction, BLANK_CELL};
use serde::Serialize;

/// `[id, "body (numericCSV)", wordsLengths, numericCSV]`
pub type SpecClue = (u32, String, Vec<usize>, String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecSize {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecClues {
    pub across: Vec<SpecClue>,
    pub down: Vec<SpecClue>,
}

/// Serialized with the fields in this order; `answers` is left out for puzzles
/// whose answers are only placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub author: String,
    pub editor: String,
    pub copyright: String,
    pub publisher: String,
    pub date: String,
    pub size: SpecSize,
    /// `X` for a filled cell, `.` for a blank one.
    pub grid: Vec<Vec<char>>,
    /// Clue id at each clue's starting cell, 0 elsewhere.
    pub gridnums: Vec<Vec<u32>>,
    pub clues: SpecClues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Answers>,
    pub notepad: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Spec {
    #[must_use]
    pub fn without_answers(mut self) -> Self {
        self.answers = None;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// True when every answer letter is `X`, or every one is `*`.
fn placeholders_only(answers: &Answers) -> bool {
    let all = answers.concatenated();
    !all.is_empty() && (all.chars().all(|c| c == 'X') || all.chars().all(|c| c == '*'))
}

/// Project a validated crossword into its spec.
#[must_use]
pub fn generate_spec(crossword: &Crossword) -> Spec {
    let max_coord = crossword.max_coord.unwrap_or_else(|| crossword.dimensions.max_coord());
    let blank = vec![BLANK_CELL; max_coord * max_coord];
    let cells = crossword.grid.as_ref().unwrap_or(&blank);

    let grid = cells
        .chunks(max_coord)
        .map(|row| row.iter().map(|&c| if c == BLANK_CELL { '.' } else { 'X' }).collect())
        .collect();

    let mut gridnums = vec![vec![0u32; max_coord]; max_coord];
    for (&id, clue) in &crossword.known_ids {
        let c = clue.coordinates;
        if let Some(cell) = gridnums.get_mut(c.y.wrapping_sub(1)).and_then(|row| row.get_mut(c.x.wrapping_sub(1))) {
            *cell = id;
        }
    }

    let mut clues = SpecClues::default();
    for direction in Direction::ALL {
        let items = crossword
            .clues(direction)
            .iter()
            .map(|clue| {
                let numeric = clue.numeric_or_raw().to_string();
                (clue.id, format!("{} ({numeric})", clue.body), clue.words_lengths.clone(), numeric)
            })
            .collect();
        match direction {
            Direction::Across => clues.across = items,
            Direction::Down => clues.down = items,
        }
    }

    let answers = crossword.answers.clone().filter(|a| !placeholders_only(a));

    Spec {
        name: crossword.name.clone(),
        author: crossword.author.clone(),
        editor: crossword.editor.clone(),
        copyright: crossword.copyright.clone(),
        publisher: crossword.publisher.clone(),
        date: crossword.pubdate.clone(),
        size: SpecSize { rows: max_coord, cols: max_coord },
        grid,
        gridnums,
        clues,
        answers,
        notepad: String::new(),
        id: crossword.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_dsl;
    use crate::validator::validate_and_embellish;

    fn validated(text: &str) -> Crossword {
        let mut crossword = parse_dsl(text);
        validate_and_embellish(&mut crossword);
        assert!(crossword.errors.is_empty(), "{:?}", crossword.errors);
        crossword
    }

    #[test]
    fn test_spec_grid_and_gridnums() {
        let crossword = validated("name: T\nsize: 15x15\nacross:\n- (1,1) 1. Feline (CAT)\n- (1,3) 3. Bird (OWL)\ndown:\n- (1,1) 1. Henhouse sound (COO)\n- (3,1) 2. Sesame (TIL)\n");
        let spec = generate_spec(&crossword);
        assert_eq!(spec.size, SpecSize { rows: 15, cols: 15 });
        assert_eq!(&spec.grid[0][0..4], &['X', 'X', 'X', '.']);
        assert_eq!(spec.gridnums[0][0], 1);
        assert_eq!(spec.gridnums[0][2], 2);
        assert_eq!(spec.gridnums[2][0], 3);
        assert_eq!(spec.clues.across[0], (1, "Feline (3)".to_string(), vec![3], "3".to_string()));
        assert_eq!(spec.id.as_deref(), Some("T"));
        assert!(spec.answers.is_some());
    }

    #[test]
    fn test_placeholder_answers_dropped() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. Unknown (3,2)\n");
        let spec = generate_spec(&crossword);
        assert!(spec.answers.is_none());
        let json = spec.to_json().unwrap();
        assert!(!json.contains("\"answers\""));
        assert!(!json.contains("\"name\""));
    }

    #[test]
    fn test_json_field_order() {
        let crossword = validated("name: T\nsize: 15x15\nacross:\n- (1,1) 1. Feline (CAT)\n");
        let json = generate_spec(&crossword).to_json().unwrap();
        let order = ["\"name\"", "\"author\"", "\"editor\"", "\"copyright\"", "\"publisher\"", "\"date\"", "\"size\"", "\"grid\"", "\"gridnums\"", "\"clues\"", "\"answers\"", "\"notepad\"", "\"id\""];
        let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.contains("[1,\"Feline (3)\",[3],\"3\"]"));
    }

    #[test]
    fn test_generate_spec_is_repeatable() {
        let crossword = validated("size: 15x15\nacross:\n- (1,1) 1. Feline (CAT)\n");
        assert_eq!(generate_spec(&crossword), generate_spec(&crossword));
    }
}
