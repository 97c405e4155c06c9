//! Settings for one compile call.

use crate::templates::TemplateLibrary;

/// Date format of a DSL `pubdate:` line.
pub const PUBDATE_FORMAT: &str = "%Y/%m/%d";

/// What the adapters need beyond the input text.
///
/// The defaults are today's date and the built-in Quick-Slow templates. Tests pin
/// the date and swap in their own templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    /// `pubdate` written by the adapters, formatted `YYYY/MM/DD`.
    pub default_pubdate: String,
    pub templates: TemplateLibrary,
}

impl CompileConfig {
    #[must_use]
    pub fn with_pubdate(mut self, pubdate: impl Into<String>) -> Self {
        self.default_pubdate = pubdate.into();
        self
    }

    #[must_use]
    pub fn with_templates(mut self, templates: TemplateLibrary) -> Self {
        self.templates = templates;
        self
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        CompileConfig {
            default_pubdate: today_pubdate(),
            templates: TemplateLibrary::builtin(),
        }
    }
}

/// Today's local date as `YYYY/MM/DD`.
#[must_use]
pub fn today_pubdate() -> String {
    chrono::Local::now().format(PUBDATE_FORMAT).to_string()
}

/// Check a user-supplied date and normalize it to `YYYY/MM/DD`.
pub fn parse_pubdate(text: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(text.trim(), PUBDATE_FORMAT)
        .map(|date| date.format(PUBDATE_FORMAT).to_string())
        .map_err(|e| format!("expected a date like 2020/01/31, got {text:?} ({e})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::line::{classify_line, LineKind, MetaField};

    #[test]
    fn test_today_is_a_valid_pubdate_line() {
        let line = format!("pubdate: {}", today_pubdate());
        assert!(matches!(classify_line(&line), LineKind::Field(MetaField::Pubdate, _)), "{line}");
    }

    #[test]
    fn test_builders() {
        let config = CompileConfig::default()
            .with_pubdate("2001/02/03")
            .with_templates(TemplateLibrary::new(Vec::new()));
        assert_eq!(config.default_pubdate, "2001/02/03");
        assert!(config.templates.is_empty());
    }

    #[test]
    fn test_parse_pubdate() {
        assert_eq!(parse_pubdate("2020/01/31"), Ok("2020/01/31".to_string()));
        assert_eq!(parse_pubdate(" 2020/1/2 "), Ok("2020/01/02".to_string()));
        assert!(parse_pubdate("31/01/2020").is_err());
        assert!(parse_pubdate("2020/02/30").is_err());
        assert!(parse_pubdate("today").unwrap_err().contains("2020/01/31"));
    }
}
