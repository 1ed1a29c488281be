//! Line parser for model output
//!
//! One suggestion is always exactly one numbered source line. Unnumbered lines
//! are dropped, never glued onto the previous suggestion, and the structural
//! sub-fields models like to add under each case (`Input:`, `Expected result:`)
//! are skipped.

use super::{assemble, ParseOptions, SuggestionRecord};
use crate::catalog::FrameworkLabel;
use regex::Regex;
use std::collections::HashSet;

const SUB_ITEM_MARKERS: &[&str] = &[
    "input:",
    "expected result:",
    "expected output:",
    "- input",
    "- expected",
];

const SUMMARY_LABEL: &str = "test case summary:";

const BOILERPLATE_PREFIXES: &[&str] = &[
    "Here are the test case suggestions:",
    "Here are some test cases:",
    "Test case suggestions:",
    "I'll suggest the following test cases:",
];

const BOILERPLATE_SUFFIXES: &[&str] = &[
    "These test cases should provide good coverage",
    "Let me know if you need more test cases",
    "Hope this helps!",
];

/// How a line of model text is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    PrimarySuggestion,
    SubItem,
    Noise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Trimmed line
    pub content: &'a str,
    pub role: LineRole,
}

/// Strip chatty lead-ins and sign-offs wrapped around the list
pub fn clean_model_text(text: &str) -> &str {
    let mut cleaned = text.trim();

    for prefix in BOILERPLATE_PREFIXES {
        if starts_with_ignore_ascii_case(cleaned, prefix) {
            cleaned = cleaned[prefix.len()..].trim();
        }
    }

    for suffix in BOILERPLATE_SUFFIXES {
        if ends_with_ignore_ascii_case(cleaned, suffix) {
            cleaned = cleaned[..cleaned.len() - suffix.len()].trim();
        }
    }

    cleaned
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn ends_with_ignore_ascii_case(text: &str, suffix: &str) -> bool {
    text.len() >= suffix.len()
        && text.is_char_boundary(text.len() - suffix.len())
        && text[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn is_sub_item(line: &str) -> bool {
    let lower = line.to_lowercase();
    SUB_ITEM_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Text after the leading number, for `1. x`, `1) x` and `1 x` forms
fn strip_numbering(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .or_else(|| rest.strip_prefix(' '))
}

/// Drop everything up to and including a `Test case summary:` label
fn strip_summary_label(text: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `text`
    match text.to_ascii_lowercase().find(SUMMARY_LABEL) {
        Some(idx) => &text[idx + SUMMARY_LABEL.len()..],
        None => text,
    }
}

pub fn classify_line<'a>(line: &'a str, options: &ParseOptions) -> RawLine<'a> {
    let content = line.trim();
    let role = if content.is_empty() {
        LineRole::Noise
    } else if is_sub_item(content) {
        LineRole::SubItem
    } else if content.chars().count() >= options.min_line_chars
        && strip_numbering(content).is_some()
    {
        LineRole::PrimarySuggestion
    } else {
        LineRole::Noise
    };
    RawLine { content, role }
}

/// Cleaned summary for a primary line, or `None` when it is too short
fn summary_from_line(content: &str, options: &ParseOptions) -> Option<String> {
    let body = strip_numbering(content)?;
    let summary = strip_summary_label(body).trim();
    (summary.chars().count() >= options.min_summary_chars).then(|| summary.to_string())
}

/// Accepted summaries in encounter order, duplicates removed
pub fn parse_summaries(text: &str, options: &ParseOptions) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut summaries = Vec::new();
    let mut skipped = 0usize;

    for line in clean_model_text(text).lines() {
        let raw = classify_line(line, options);
        if raw.role != LineRole::PrimarySuggestion {
            if raw.role == LineRole::SubItem {
                tracing::trace!(line = raw.content, "skipped sub-item");
            }
            continue;
        }

        match summary_from_line(raw.content, options) {
            Some(summary) if seen.insert(summary.to_ascii_lowercase()) => summaries.push(summary),
            Some(_) => tracing::trace!(line = raw.content, "skipped duplicate"),
            None => {
                skipped += 1;
                tracing::trace!(line = raw.content, "skipped short summary");
            }
        }
    }

    tracing::debug!(accepted = summaries.len(), skipped, "parsed model text");
    summaries
}

/// Numbered records for `text`; may be empty
pub fn parse_suggestions(
    text: &str,
    framework: FrameworkLabel,
    options: &ParseOptions,
) -> Vec<SuggestionRecord> {
    assemble(parse_summaries(text, options), framework)
}

/// First fenced code block of a response, without its language tag
pub fn extract_code_block(response: &str) -> String {
    if let Ok(re) = Regex::new(r"(?s)```[\w+-]*\n?(.*?)\n?```") {
        if let Some(body) = re.captures(response).and_then(|caps| caps.get(1)) {
            return body.as_str().trim().to_string();
        }
    }
    response.trim().to_string()
}
