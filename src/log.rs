//! Logger setup for the two front ends.
//!
//! The compiler logs through the `log` facade only: format detection and conversion
//! failures at `info`/`warn`, per-line and per-clue decisions at `debug`. Nothing is
//! printed until a front end installs a logger here; `crossword-dsl` does it from
//! `main`, the browser build from `wasm::initialize`.

/// `Debug` when asked for, otherwise `Info`.
#[must_use]
pub fn default_level(debug_enabled: bool) -> log::LevelFilter {
    if debug_enabled {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Install the logger for this target.
///
/// - **CLI:** env_logger writing bare `LEVEL message` lines to stderr. `RUST_LOG`
///   overrides the level, e.g. `RUST_LOG=crossword_dsl::validator=debug`. Calling this
///   again keeps the first logger.
/// - **WASM:** console_log, so compile diagnostics land in the browser console.
pub fn init_logger(debug_enabled: bool) {
    let level = default_level(debug_enabled);

    #[cfg(target_arch = "wasm32")]
    {
        let console_level = level.to_level().unwrap_or(log::Level::Info);
        if let Err(e) = console_log::init_with_level(console_level) {
            // compiling still works, just silently
            let msg = format!("crossword-dsl: console logging unavailable: {e}");
            web_sys::console::error_1(&msg.into());
            return;
        }
        log::debug!("console logger at {console_level:?}");
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("stderr logger at {level:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), log::LevelFilter::Debug);
        assert_eq!(default_level(false), log::LevelFilter::Info);
    }

    #[test]
    fn test_second_init_is_harmless() {
        init_logger(false);
        init_logger(true);
        log::info!("still logging");
    }
}
