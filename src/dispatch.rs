//! The top-level pipeline: sniff the input format, convert it to DSL, parse, validate,
//! and project.
//!
//! Every call returns a [`CompileResult`] of the same shape whether or not the input
//! was valid, so a caller can display it without special-casing failure.

use crate::adapters::{compiler_xml_to_dsl, is_quick_slow, legacy_json_to_dsl, quick_slow_to_dsl};
use crate::config::CompileConfig;
use crate::crossword::Crossword;
use crate::errors::AdapterError;
use crate::generate::{generate_dsl, generate_grid_text, generate_spec, Spec};
use crate::parser::parse_dsl;
use crate::validator::validate_and_embellish;
use log::{debug, info, warn};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

const XML_DECLARATION: &str = "<?xml";
const COMPILER_ROOT_TAG: &str = "<crossword-compiler";

/// What the input text looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    QuickSlow,
    LegacyJson,
    Dsl,
    CompilerXml,
    /// XML, but not a CrosswordCompiler export.
    ForeignXml,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputFormat::QuickSlow => "Quick-Slow clue list",
            InputFormat::LegacyJson => "legacy JSON spec",
            InputFormat::Dsl => "DSL",
            InputFormat::CompilerXml => "CrosswordCompiler XML",
            InputFormat::ForeignXml => "non-CrosswordCompiler XML",
        })
    }
}

/// Decide which converter `text` needs.
///
/// A Quick-Slow marker wins over everything; then a leading `{` means JSON; then
/// anything without an XML declaration is taken to be DSL already.
#[must_use]
pub fn detect_format(text: &str) -> InputFormat {
    let trimmed = text.trim_start();
    if is_quick_slow(text) {
        InputFormat::QuickSlow
    } else if trimmed.starts_with('{') {
        InputFormat::LegacyJson
    } else if !trimmed.starts_with(XML_DECLARATION) {
        InputFormat::Dsl
    } else if text.contains(COMPILER_ROOT_TAG) {
        InputFormat::CompilerXml
    } else {
        InputFormat::ForeignXml
    }
}

/// Everything one compile produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    pub format: InputFormat,
    /// Set when the input couldn't be converted to DSL at all; its message is also
    /// the only entry in `errors`.
    #[serde(skip)]
    pub adapter_error: Option<AdapterError>,
    /// The parsed (and, if error-free, validated) record.
    #[serde(skip)]
    pub crossword: Crossword,
    /// Empty means success.
    pub errors: Vec<String>,
    /// The DSL that went into the line parser.
    #[serde(rename = "originalDSL")]
    pub original_dsl: String,
    pub spec: Option<Spec>,
    pub spec_text_with_answers: String,
    /// The spec without answers, or the errors joined by newlines.
    pub spec_text_without_answers: String,
    pub grid_text: String,
    #[serde(rename = "DSLGeneratedFromDSLWithAnswers")]
    pub dsl_with_answers: Option<String>,
    #[serde(rename = "DSLGeneratedFromDSLWithoutAnswers")]
    pub dsl_without_answers: Option<String>,
}

impl CompileResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run the converter for `format`. DSL passes through untouched.
pub fn convert_to_dsl<'a>(
    format: InputFormat,
    text: &'a str,
    config: &CompileConfig,
) -> Result<Cow<'a, str>, AdapterError> {
    match format {
        InputFormat::Dsl => Ok(Cow::Borrowed(text)),
        InputFormat::QuickSlow => quick_slow_to_dsl(text, config).map(Cow::Owned),
        InputFormat::LegacyJson => legacy_json_to_dsl(text, config).map(Cow::Owned),
        InputFormat::CompilerXml => compiler_xml_to_dsl(text, config).map(Cow::Owned),
        InputFormat::ForeignXml => Err(AdapterError::NotCrosswordCompiler),
    }
}

/// `(with answers, without answers)`
fn spec_texts(spec: &Spec) -> Result<(String, String), serde_json::Error> {
    Ok((spec.to_json()?, spec.clone().without_answers().to_json()?))
}

/// Compile `text` in whatever supported format it is in, with the default config.
#[must_use]
pub fn parse_whatever_it_is(text: &str) -> CompileResult {
    parse_whatever_it_is_with(text, &CompileConfig::default())
}

/// Compile `text` in whatever supported format it is in.
#[must_use]
pub fn parse_whatever_it_is_with(text: &str, config: &CompileConfig) -> CompileResult {
    let format = detect_format(text);
    info!("input looks like {format}");

    let mut adapter_error = None;
    let mut crossword = match convert_to_dsl(format, text, config) {
        Ok(dsl) => parse_dsl(&dsl),
        Err(e) => {
            warn!("{format} conversion failed: {e}");
            let crossword = Crossword::from_errors(vec![e.to_string()]);
            adapter_error = Some(e);
            crossword
        }
    };

    if crossword.is_valid() {
        validate_and_embellish(&mut crossword);
    } else {
        debug!("skipping validation: {} parse errors", crossword.errors.len());
    }

    let mut spec = None;
    let mut spec_text_with_answers = String::new();
    if crossword.is_valid() {
        let generated = generate_spec(&crossword);
        match spec_texts(&generated) {
            Ok((with_answers, without_answers)) => {
                spec_text_with_answers = with_answers;
                spec = Some((generated, without_answers));
            }
            Err(e) => crossword.errors.push(format!("ERROR: couldn't serialize spec: {e}")),
        }
    }
    let (spec, spec_text_without_answers) = match spec {
        Some((spec, without_answers)) => (Some(spec), without_answers),
        None => (None, crossword.errors.join("\n")),
    };

    let grid_text = generate_grid_text(&crossword);
    let (dsl_with_answers, dsl_without_answers) = if crossword.is_valid() {
        (Some(generate_dsl(&crossword, true)), Some(generate_dsl(&crossword, false)))
    } else {
        info!("{} errors found", crossword.errors.len());
        (None, None)
    };

    CompileResult {
        format,
        adapter_error,
        errors: crossword.errors.clone(),
        original_dsl: crossword.original_dsl.clone(),
        crossword,
        spec,
        spec_text_with_answers,
        spec_text_without_answers,
        grid_text,
        dsl_with_answers,
        dsl_without_answers,
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    errors: &'a [String],
    text: &'a str,
}

/// The spec (with answers) as JSON, or `{"errors": [...], "text": ...}` on failure.
#[must_use]
pub fn into_spec_json(text: &str) -> String {
    into_spec_json_with(text, &CompileConfig::default())
}

#[must_use]
pub fn into_spec_json_with(text: &str, config: &CompileConfig) -> String {
    spec_json_response(&parse_whatever_it_is_with(text, config), text)
}

/// The `into_spec_json` answer for an existing result compiled from `text`.
#[must_use]
pub fn spec_json_response(result: &CompileResult, text: &str) -> String {
    if result.is_valid() {
        return result.spec_text_with_answers.clone();
    }
    let response = ErrorResponse { errors: &result.errors, text };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        warn!("couldn't serialize error response: {e}");
        String::from(r#"{"errors":[]}"#)
    })
}
