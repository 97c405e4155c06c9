//! Converters from the other puzzle formats into canonical DSL text.
//!
//! Each adapter is all-or-nothing: it returns the DSL, or the first structural problem
//! it hit as an [`AdapterError`](crate::errors::AdapterError).

pub mod compiler;
pub mod legacy_json;
pub mod multi_clue;
pub mod quick_slow;
pub mod xml_tree;

pub use compiler::compiler_xml_to_dsl;
pub use legacy_json::legacy_json_to_dsl;
pub use quick_slow::{is_quick_slow, quick_slow_to_dsl};
