// Reusable library API, shared by the CLI and WASM builds
pub mod adapters;
pub mod config;
pub mod crossword;
pub mod dispatch;
pub mod dsl_writer;
pub mod errors;
pub mod format;
pub mod generate;
pub mod grid_shape;
pub mod log;
pub mod parser;
pub mod templates;
pub mod validator;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::CompileConfig;
pub use crossword::Crossword;
pub use dispatch::{into_spec_json, parse_whatever_it_is, parse_whatever_it_is_with, CompileResult, InputFormat};
