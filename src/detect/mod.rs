//! Framework detection
//!
//! Infers the test framework for a target file from the whole repository
//! listing: language histogram plus marker files (configs, fixtures, runner
//! directories). Always answers; missing evidence degrades to a language default.

mod classifier;
mod signals;

pub use classifier::{
    classify, Classification, Evidence, Rule, CLASSIFICATION_RULES, LANGUAGE_DEFAULT_RULE,
};
pub use signals::{FrameworkIndicatorSet, LanguageHistogram, RepoSignals};

use crate::catalog::{FrameworkLabel, Language};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Display;

pub const DEGRADED_RULE: &str = "degraded";

/// Framework for `target_file` given the repository's file listing
pub fn classify_framework<S: AsRef<str>>(file_paths: &[S], target_file: &str) -> FrameworkLabel {
    explain_classification(file_paths, target_file).framework
}

/// Same as [`classify_framework`], keeping the deciding rule and the evidence
pub fn explain_classification<S: AsRef<str>>(
    file_paths: &[S],
    target_file: &str,
) -> Classification {
    let signals = RepoSignals::scan(file_paths);
    classify(&signals, Language::from_path(target_file))
}

/// Context-free classification from the target's extension alone
pub fn degraded_classification(target_file: &str) -> Classification {
    let target_language = Language::from_path(target_file);
    Classification {
        framework: target_language.default_framework(),
        rule: DEGRADED_RULE,
        target_language,
        histogram: LanguageHistogram::default(),
        indicators: Default::default(),
    }
}

/// Classify with a listing that may have failed to load.
///
/// A failed listing is logged and replaced by [`degraded_classification`];
/// the error never reaches the caller.
pub fn classify_framework_or_degrade<S, E>(
    listing: Result<Vec<S>, E>,
    target_file: &str,
) -> Classification
where
    S: AsRef<str>,
    E: Display,
{
    match listing {
        Ok(files) => explain_classification(&files, target_file),
        Err(err) => {
            tracing::warn!(
                target_file,
                error = %err,
                "repository listing unavailable, using language default"
            );
            degraded_classification(target_file)
        }
    }
}

/// One target's answer within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetClassification {
    pub target: String,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Classify several targets against one scanned listing, in parallel
pub fn classify_targets<T: AsRef<str> + Sync>(
    signals: &RepoSignals,
    targets: &[T],
) -> Vec<TargetClassification> {
    targets
        .par_iter()
        .map(|target| {
            let target = target.as_ref();
            TargetClassification {
                target: target.to_string(),
                classification: classify(signals, Language::from_path(target)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_python_default_without_indicators() {
        assert_eq!(
            classify_framework(&["a.py", "b.py", "c.py"], "a.py"),
            FrameworkLabel::Pytest
        );
    }

    #[test]
    fn test_cypress_config_wins_for_js_target() {
        assert_eq!(
            classify_framework(&["cypress.config.js"], "app.test.js"),
            FrameworkLabel::Cypress
        );
    }

    #[test]
    fn test_cypress_beats_pytest_indicators() {
        let files = ["tests/conftest.py", "pytest.ini", "cypress/e2e/home.cy.ts"];
        assert_eq!(classify_framework(&files, "app.py"), FrameworkLabel::Cypress);
    }

    #[test]
    fn test_empty_listing_is_tolerated() {
        let empty: [&str; 0] = [];
        assert_eq!(classify_framework(&empty, "main.go"), FrameworkLabel::Testing);
        assert_eq!(classify_framework(&empty, "LICENSE"), FrameworkLabel::Generic);
    }

    #[test]
    fn test_failed_listing_degrades_to_language_default() {
        let listing: Result<Vec<String>, String> = Err("403 rate limited".to_string());
        let c = classify_framework_or_degrade(listing, "src/Widget.java");
        assert_eq!(c.framework, FrameworkLabel::Junit);
        assert_eq!(c.rule, DEGRADED_RULE);
        assert_eq!(c.histogram.total(), 0);
        assert!(c.indicators.is_empty());
    }

    #[test]
    fn test_successful_listing_is_used() {
        let listing: Result<Vec<&str>, String> = Ok(vec!["jest.config.js", "index.js"]);
        let c = classify_framework_or_degrade(listing, "index.js");
        assert_eq!(c.framework, FrameworkLabel::Jest);
        assert_eq!(c.rule, "javascript");
    }

    #[test]
    fn test_classify_targets_keeps_input_order() {
        let signals = RepoSignals::scan(&["Main.java", "pom.xml"]);
        let results = classify_targets(&signals, &["a.py", "Main.java", "x.swift"]);
        let labels: Vec<_> = results
            .iter()
            .map(|r| (r.target.as_str(), r.classification.framework))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("a.py", FrameworkLabel::Pytest),
                ("Main.java", FrameworkLabel::Junit),
                ("x.swift", FrameworkLabel::Junit),
            ]
        );
    }

    proptest! {
        /// Property: any listing and target produce a label from the fixed set.
        #[test]
        fn classification_is_total(
            files in prop::collection::vec("[a-zA-Z0-9_./-]{0,24}", 0..40),
            target in "[a-zA-Z0-9_./-]{0,24}",
        ) {
            let label = classify_framework(&files, &target);
            prop_assert!(FrameworkLabel::ALL.contains(&label));
        }

        /// Property: pure function - same input always produces same output.
        #[test]
        fn classification_is_deterministic(
            files in prop::collection::vec("(src|tests|cypress|spec)/[a-z]{1,8}\\.(py|js|ts|rb|java|go)", 0..30),
            target in "[a-z]{1,8}\\.(py|js|ts|cs|php)",
        ) {
            prop_assert_eq!(
                explain_classification(&files, &target),
                explain_classification(&files, &target)
            );
        }
    }
}
