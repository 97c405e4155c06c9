use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use clap::{Parser, ValueEnum};
use std::time::Instant;

use crossword_dsl::dispatch::{self, CompileResult};
use crossword_dsl::errors::AdapterError;
use crossword_dsl::config::parse_pubdate;
use crossword_dsl::CompileConfig;

/// Which projection of the compiled puzzle to print.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Only the error lines (nothing when the puzzle is valid)
    Errors,
    /// Spec JSON without answers
    Spec,
    /// Spec JSON with answers
    SpecWithAnswers,
    /// The letter grid, one row per line
    Grid,
    /// Regenerated DSL with answers replaced by lengths
    Dsl,
    /// Regenerated DSL with answers
    DslWithAnswers,
    /// Spec JSON with answers, or `{"errors", "text"}` on failure
    SpecJson,
}

/// Crossword DSL compiler
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Puzzle file: DSL, CrosswordCompiler XML, legacy JSON or a Quick-Slow list ("-" for stdin)
    input: String,

    /// What to print on stdout
    #[arg(short, long, value_enum, default_value_t = Output::SpecWithAnswers)]
    output: Output,

    /// Publication date (YYYY/MM/DD) for imported puzzles that don't carry one; defaults to today
    #[arg(short, long, value_parser = parse_pubdate)]
    pubdate: Option<String>,

    /// Debug logging (also enabled by setting CROSSWORD_DSL_DEBUG)
    #[arg(short, long)]
    debug: bool,
}

/// Entry point of the crossword DSL compiler.
///
/// Delegates to [`try_main`], printing any error in a user-friendly way.
/// Exits with code 1 if the input couldn't be read or the puzzle has errors.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let debug_enabled = cli.debug || std::env::var("CROSSWORD_DSL_DEBUG").is_ok();
    crossword_dsl::log::init_logger(debug_enabled);

    log::info!("Starting crossword-dsl");

    match try_main(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            // Converter failures carry a suggestion worth showing
            if let Some(adapter_err) = e.downcast_ref::<AdapterError>() {
                eprintln!("{}", adapter_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(|e| format!("couldn't read {path}: {e}").into())
    }
}

/// The text `output` asks for.
fn render(result: CompileResult, output: Output, text: &str) -> String {
    match output {
        Output::Errors => result.errors.join("\n"),
        Output::Spec => result.spec_text_without_answers,
        Output::SpecWithAnswers => result.spec_text_with_answers,
        Output::Grid => result.grid_text,
        Output::Dsl => result.dsl_without_answers.unwrap_or_default(),
        Output::DslWithAnswers => result.dsl_with_answers.unwrap_or_default(),
        Output::SpecJson => dispatch::spec_json_response(&result, text),
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Read the puzzle from the file or stdin.
/// 2. Compile it, whatever its format.
/// 3. Print the requested output on stdout, and any puzzle errors on stderr.
///
/// Returns `Ok(false)` if the puzzle has errors, and `Err` if the input couldn't be
/// read or couldn't be converted to DSL at all.
fn try_main(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let text = read_input(&cli.input)?;

    let mut config = CompileConfig::default();
    if let Some(pubdate) = &cli.pubdate {
        config = config.with_pubdate(pubdate.as_str());
    }

    let t_compile = Instant::now();
    let mut result = dispatch::parse_whatever_it_is_with(&text, &config);
    let compile_secs = t_compile.elapsed().as_secs_f64();
    log::info!("Compiled {} in {compile_secs:.3}s", result.format);

    let valid = result.is_valid();
    if !valid && !matches!(cli.output, Output::Errors | Output::SpecJson) {
        // converter failures carry a typed error with help text
        if let Some(e) = result.adapter_error.take() {
            return Err(e.into());
        }
        for error in &result.errors {
            eprintln!("{error}");
        }
        eprintln!("{} error(s) found.", result.errors.len());
        return Ok(false);
    }

    let rendered = render(result, cli.output, &text);
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(valid)
}
