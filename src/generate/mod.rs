//! Projections of a validated `Crossword`: the spec, regenerated DSL, and a text grid.
//!
//! None of these fail. They are meant to run on valid crosswords, and on anything
//! else they produce whatever partial output the record supports.

pub mod dsl;
pub mod grid_text;
pub mod spec;

pub use dsl::generate_dsl;
pub use grid_text::generate_grid_text;
pub use spec::{generate_spec, Spec};
