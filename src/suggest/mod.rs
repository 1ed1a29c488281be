//! Test-case suggestion extraction
//!
//! Turns free-form model text into a short, numbered list of test cases.
//! Parsing is line-based and strict; when it yields nothing, deterministic
//! templates take over so callers always get at least one suggestion.

pub mod fallback;
pub mod parse;
pub mod prompts;


use crate::catalog::{FrameworkLabel, Language};
use serde::{Deserialize, Serialize};

/// Placeholder used in templates when the request named no file
pub const DEFAULT_REPRESENTATIVE_FILE: &str = "code";

/// One numbered test-case description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub id: usize,
    pub summary: String,
    pub framework: FrameworkLabel,
}

/// Noise filters for the line parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Shortest line (in chars) considered as a numbered suggestion
    pub min_line_chars: usize,
    /// Shortest accepted summary after cleaning (inclusive)
    pub min_summary_chars: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            min_line_chars: 11,
            min_summary_chars: 15,
        }
    }
}

/// Number summaries from 1 and tag them with the framework
pub fn assemble<I, S>(summaries: I, framework: FrameworkLabel) -> Vec<SuggestionRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    summaries
        .into_iter()
        .enumerate()
        .map(|(i, summary)| SuggestionRecord {
            id: i + 1,
            summary: summary.into(),
            framework,
        })
        .collect()
}

/// Parse-then-fallback pipeline with configurable thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionExtractor {
    options: ParseOptions,
}

impl SuggestionExtractor {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Suggestions for `model_text`, never empty.
    ///
    /// `framework` falls back to the representative file's language default, and
    /// `pytest` when that is inconclusive. A blank `representative_file` becomes
    /// [`DEFAULT_REPRESENTATIVE_FILE`].
    pub fn extract(
        &self,
        model_text: Option<&str>,
        framework: Option<FrameworkLabel>,
        representative_file: Option<&str>,
    ) -> Vec<SuggestionRecord> {
        let file = representative_file
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_REPRESENTATIVE_FILE);
        let framework = framework.unwrap_or_else(|| resolve_framework_for_file(file));

        let parsed = model_text
            .map(|text| parse::parse_suggestions(text, framework, &self.options))
            .unwrap_or_default();

        if !parsed.is_empty() {
            tracing::debug!(count = parsed.len(), %framework, "parsed model suggestions");
            return parsed;
        }

        tracing::info!(%framework, file, "no suggestions parsed, using fallback templates");
        fallback::fallback_suggestions(framework, file)
    }
}

fn resolve_framework_for_file(file: &str) -> FrameworkLabel {
    match Language::from_path(file).default_framework() {
        FrameworkLabel::Generic => FrameworkLabel::Pytest,
        framework => framework,
    }
}

/// Suggestions from model text with default thresholds. Never empty.
pub fn extract_suggestions(
    model_text: Option<&str>,
    framework: FrameworkLabel,
    representative_file: &str,
) -> Vec<SuggestionRecord> {
    SuggestionExtractor::default().extract(model_text, Some(framework), Some(representative_file))
}
