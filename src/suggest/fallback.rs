//! Template suggestions for when model text yields nothing usable
//!
//! Tiers are tried in order and the first non-empty one wins:
//! framework templates, then generic templates, then a fixed emergency list.

use super::{assemble, SuggestionRecord};
use crate::catalog::FrameworkLabel;

/// What a tier gets to work with
#[derive(Debug, Clone, Copy)]
pub struct FallbackContext<'a> {
    pub framework: FrameworkLabel,
    pub file: &'a str,
}

pub type FallbackTier = fn(&FallbackContext) -> Option<Vec<String>>;

pub static FALLBACK_TIERS: &[(&str, FallbackTier)] = &[
    ("framework", framework_templates),
    ("generic", generic_templates),
    ("emergency", |_| Some(emergency_summaries())),
];

fn fill(templates: &[&str], file: &str) -> Vec<String> {
    templates
        .iter()
        .map(|t| t.replace("{file}", file))
        .collect()
}

/// Tier 1: templates written for a specific framework
pub fn framework_templates(ctx: &FallbackContext) -> Option<Vec<String>> {
    let templates: &[&str] = match ctx.framework {
        FrameworkLabel::Pytest => &[
            "Test function return values and data types in {file}",
            "Test exception handling and error cases in {file}",
            "Test input validation and boundary conditions in {file}",
            "Test function behavior with edge cases and null values in {file}",
            "Test integration with external dependencies in {file}",
        ],
        FrameworkLabel::Jest => &[
            "Test component rendering and props in {file}",
            "Test user interactions and event handlers in {file}",
            "Test state management and updates in {file}",
            "Test API calls and async operations in {file}",
            "Test error boundaries and error handling in {file}",
        ],
        FrameworkLabel::Junit => &[
            "Test method functionality and return values in {file}",
            "Test exception handling and error scenarios in {file}",
            "Test input validation and parameter checking in {file}",
            "Test class initialization and object state in {file}",
            "Test integration with external services in {file}",
        ],
        FrameworkLabel::Selenium => &[
            "Test page load and visibility of key elements in {file}",
            "Test form input, validation messages and submission in {file}",
            "Test navigation and routing between pages in {file}",
            "Test dynamic content loading and explicit waits in {file}",
            "Test responsive layout across browsers and viewports in {file}",
        ],
        FrameworkLabel::Cypress | FrameworkLabel::Playwright => &[
            "Test the complete user workflow end to end in {file}",
            "Test API requests and responses during the flow in {file}",
            "Test authentication and session handling in {file}",
            "Test data persistence and state across page reloads in {file}",
            "Test error states and recovery paths in {file}",
        ],
        _ => return None,
    };
    Some(fill(templates, ctx.file))
}

/// Tier 2: framework-agnostic templates that still name the file
pub fn generic_templates(ctx: &FallbackContext) -> Option<Vec<String>> {
    Some(fill(
        &[
            "Test core functionality and expected behavior in {file}",
            "Test error handling and exception scenarios in {file}",
            "Test input validation and data processing in {file}",
            "Test edge cases and boundary conditions in {file}",
            "Test performance and resource usage in {file}",
        ],
        ctx.file,
    ))
}

/// Tier 3: last resort, no interpolation
pub fn emergency_summaries() -> Vec<String> {
    [
        "Test basic functionality and return values",
        "Test error handling and exception scenarios",
        "Test input validation and edge cases",
        "Test integration points and dependencies",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Non-empty suggestion list for `framework` and `file`
pub fn fallback_suggestions(framework: FrameworkLabel, file: &str) -> Vec<SuggestionRecord> {
    let ctx = FallbackContext { framework, file };

    let (tier, summaries) = FALLBACK_TIERS
        .iter()
        .find_map(|(name, tier)| {
            tier(&ctx)
                .filter(|summaries| !summaries.is_empty())
                .map(|summaries| (*name, summaries))
        })
        .unwrap_or_else(|| ("emergency", emergency_summaries()));

    tracing::debug!(tier, count = summaries.len(), %framework, "fallback suggestions");
    assemble(summaries, framework)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pytest_templates_name_the_file() {
        let records = fallback_suggestions(FrameworkLabel::Pytest, "calc.py");
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.summary.contains("calc.py")));
        assert!(records.iter().all(|r| r.framework == FrameworkLabel::Pytest));
        assert_eq!(
            records[0].summary,
            "Test function return values and data types in calc.py"
        );
    }

    #[test]
    fn test_every_dedicated_table_has_five_entries() {
        for framework in [
            FrameworkLabel::Pytest,
            FrameworkLabel::Jest,
            FrameworkLabel::Junit,
            FrameworkLabel::Selenium,
            FrameworkLabel::Cypress,
            FrameworkLabel::Playwright,
        ] {
            let ctx = FallbackContext { framework, file: "f" };
            assert_eq!(framework_templates(&ctx).map(|t| t.len()), Some(5), "{framework}");
        }
    }

    #[test]
    fn test_unrecognized_framework_uses_generic_tier() {
        let ctx = FallbackContext {
            framework: FrameworkLabel::Rspec,
            file: "user.rb",
        };
        assert!(framework_templates(&ctx).is_none());

        let records = fallback_suggestions(FrameworkLabel::Rspec, "user.rb");
        assert_eq!(
            records[0].summary,
            "Test core functionality and expected behavior in user.rb"
        );
        assert_eq!(records.last().map(|r| r.id), Some(5));
    }

    #[test]
    fn test_emergency_tier_is_file_agnostic() {
        let summaries = emergency_summaries();
        assert_eq!(summaries.len(), 4);
        assert!(summaries.iter().all(|s| s.starts_with("Test ")));
    }

    #[test]
    fn test_chain_ends_with_emergency_tier() {
        let (name, tier) = FALLBACK_TIERS[FALLBACK_TIERS.len() - 1];
        assert_eq!(name, "emergency");
        let ctx = FallbackContext {
            framework: FrameworkLabel::Generic,
            file: "",
        };
        assert_eq!(tier(&ctx), Some(emergency_summaries()));
    }
}
