//! Canonical DSL regenerated from a validated crossword.

use crate::crossword::{Crossword, Direction};
use crate::dsl_writer::{DslClueLine, DslDocument};
use crate::parser::line::{classify_line, LineKind, MetaField};

const FRONT_MATTER: &str = "---";

const FOOTER_COMMENTS: [&str; 9] = [
    "",
    "Notes on the text format...",
    "Can't use square brackets or speech marks.",
    "A clue has the form",
    "- (COORDINATES) ID. Clue text (ANSWER)",
    "Coordinates of clue in grid are (across,down), so (1,1) = top left, (17,17) = bottom right.",
    "ID is a number, followed by a full stop.",
    "(WORDS,IN,ANSWER): capitalised, and separated by commas or hyphens, or (numbers) separated by commas or hyphens.",
    "ANSWERS with all words of ***** are converted to numbers.",
];

/// Only keep a field line if the parser would read it back as that same field.
/// Drops the empty default author and the non-date default pubdate.
fn reparses_as(field: MetaField, line: &str) -> bool {
    matches!(classify_line(line), LineKind::Field(f, _) if f == field)
}

/// Render `crossword` back into DSL text, with answers or with lengths only.
///
/// The output is wrapped in `---` front-matter lines and ends with a block of
/// explanatory comments. For a valid crossword, parsing the result gives the same grid.
#[must_use]
pub fn generate_dsl(crossword: &Crossword, with_answers: bool) -> String {
    let mut doc = DslDocument::default();

    let fields = [
        (MetaField::Version, Some(&crossword.version)),
        (MetaField::Name, crossword.name.as_ref()),
        (MetaField::Author, Some(&crossword.author)),
        (MetaField::Editor, Some(&crossword.editor)),
        (MetaField::Copyright, Some(&crossword.copyright)),
        (MetaField::Publisher, Some(&crossword.publisher)),
        (MetaField::Pubdate, Some(&crossword.pubdate)),
    ];
    for (field, value) in fields {
        let Some(value) = value else { continue };
        if reparses_as(field, &format!("{}: {value}", field.key())) {
            doc.field(field.key(), value.clone());
        }
    }
    doc.field("size", crossword.dimensions.to_string());

    for direction in Direction::ALL {
        let lines = crossword
            .clues(direction)
            .iter()
            .map(|clue| DslClueLine {
                coord: clue.coordinates,
                id: clue.id,
                body: clue.body.clone(),
                answer: if with_answers {
                    clue.answer_csv.clone()
                } else {
                    clue.numeric_or_raw().to_string()
                },
            })
            .collect();
        *doc.clues_mut(direction) = lines;
    }

    let mut lines = vec![FRONT_MATTER.to_string()];
    lines.extend(doc.lines());
    lines.extend(FOOTER_COMMENTS.iter().map(|c| format!("# {c}")));
    lines.push(FRONT_MATTER.to_string());
    lines.join("\n")
}
