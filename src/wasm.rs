use crate::dispatch::{self, CompileResult};
use crate::log::init_logger;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        // Create a JavaScript Error object with the formatted message
        js_sys::Error::new(&msg).into()
    }
}

/// Validate all internal regex patterns compile successfully.
///
/// Forces LazyLock initialization of all static regexes so any compilation
/// errors occur at startup rather than on the first puzzle.
///
/// ## IMPORTANT: Adding a new regex?
/// If you add a new `LazyLock<Regex>` anywhere in the codebase, you MUST add it here.
/// See: `tests::test_all_regexes_validated` for a reminder.
pub(crate) fn validate_internal_regexes() {
    let _ = &*crate::parser::line::FRONT_MATTER_FIELD_RE;
    let _ = &*crate::parser::line::FIELD_RE;
    let _ = &*crate::parser::line::PUBDATE_RE;
    let _ = &*crate::parser::line::SIZE_RE;
    let _ = &*crate::parser::line::GROUPING_RE;
    let _ = &*crate::parser::line::CLUE_RE;
    let _ = &*crate::adapters::multi_clue::COMPOSITE_PIECE_RE;
    let _ = &*crate::adapters::quick_slow::QUICK_SLOW_MARKER_RE;
    let _ = &*crate::adapters::quick_slow::QUICK_SLOW_CLUE_RE;
    let _ = &*crate::adapters::legacy_json::TRAILING_FORMAT_RE;
    log::debug!("Internal regex patterns validated successfully");
}

/// Initialize logging and validation with the specified debug setting.
///
/// # Arguments
/// * `debug_enabled` - If true, use Debug log level; if false, use Info level
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    // 1. Set up panic hook
    console_error_panic_hook::set_once();

    // 2. Validate internal regexes early
    validate_internal_regexes();

    // 3. Initialize logging with the provided debug setting
    init_logger(debug_enabled);

    log::info!("WASM module initialized");
}

/// JS entry: (text: string) -> the full compile result.
///
/// Always succeeds for any input text; problems with the puzzle are in the
/// result's `errors` array. Only a serialization failure is thrown.
#[wasm_bindgen]
pub fn compile(text: &str) -> Result<JsValue, JsValue> {
    let result: CompileResult = dispatch::parse_whatever_it_is(text);
    serde_wasm_bindgen::to_value(&result).map_err(|e| {
        WasmError {
            code: "WASM001".to_string(),
            message: format!("serialization failed: {e}"),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
        .into()
    })
}

/// JS entry: () -> "0.3.0 (<full git hash>)"
#[wasm_bindgen]
pub fn version() -> String {
    format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH_FULL"))
}

/// JS entry: (text: string) -> the spec JSON, or `{"errors": [...], "text": ...}`.
#[wasm_bindgen]
pub fn into_spec_json(text: &str) -> String {
    dispatch::into_spec_json(text)
}
