//! Single-pass evidence gathering over a repository file listing

use crate::catalog::{extension, match_marker, FrameworkLabel, Language};
use serde::Serialize;
use std::collections::BTreeMap;

/// File counts per language. Every known language has a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageHistogram {
    counts: BTreeMap<Language, usize>,
}

impl Default for LanguageHistogram {
    fn default() -> Self {
        Self {
            counts: Language::KNOWN.iter().map(|lang| (*lang, 0)).collect(),
        }
    }
}

impl LanguageHistogram {
    pub fn get(&self, language: Language) -> usize {
        self.counts.get(&language).copied().unwrap_or(0)
    }

    /// Unknown files have no bucket and are ignored
    pub fn record(&mut self, language: Language) {
        if let Some(count) = self.counts.get_mut(&language) {
            *count += 1;
        }
    }

    /// JavaScript and TypeScript together
    pub fn javascript_family(&self) -> usize {
        self.get(Language::JavaScript) + self.get(Language::TypeScript)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, usize)> + '_ {
        self.counts.iter().map(|(lang, count)| (*lang, *count))
    }
}

/// Paths that betray each framework, in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameworkIndicatorSet {
    indicators: BTreeMap<FrameworkLabel, Vec<String>>,
}

impl FrameworkIndicatorSet {
    pub fn add(&mut self, framework: FrameworkLabel, path: &str) {
        self.indicators
            .entry(framework)
            .or_default()
            .push(path.to_string());
    }

    pub fn has(&self, framework: FrameworkLabel) -> bool {
        self.count(framework) > 0
    }

    pub fn count(&self, framework: FrameworkLabel) -> usize {
        self.indicators.get(&framework).map_or(0, Vec::len)
    }

    pub fn paths(&self, framework: FrameworkLabel) -> &[String] {
        self.indicators
            .get(&framework)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// (framework, indicator count) for every framework seen
    pub fn counts(&self) -> Vec<(FrameworkLabel, usize)> {
        self.indicators
            .iter()
            .map(|(framework, paths)| (*framework, paths.len()))
            .collect()
    }
}

/// Everything the classifier gets to look at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSignals {
    pub histogram: LanguageHistogram,
    pub indicators: FrameworkIndicatorSet,
}

impl RepoSignals {
    pub fn scan<S: AsRef<str>>(file_paths: &[S]) -> Self {
        let mut histogram = LanguageHistogram::default();
        let mut indicators = FrameworkIndicatorSet::default();

        for path in file_paths {
            let path = path.as_ref();
            let ext = extension(path);
            histogram.record(Language::from_extension(&ext));

            let path_lower = path.to_lowercase();
            if let Some(framework) = match_marker(&path_lower, &ext) {
                indicators.add(framework, path);
            }
        }

        tracing::debug!(
            files = file_paths.len(),
            counted = histogram.total(),
            indicators = ?indicators.counts(),
            "scanned repository listing"
        );

        Self {
            histogram,
            indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_yields_zeroed_histogram() {
        let signals = RepoSignals::scan::<&str>(&[]);
        assert_eq!(signals.histogram.total(), 0);
        assert_eq!(signals.histogram.iter().count(), Language::KNOWN.len());
        assert!(signals.indicators.is_empty());
    }

    #[test]
    fn test_histogram_counts_known_languages_only() {
        let files = ["a.py", "b.PY", "c.ts", "d.tsx", "e.jsx", "README.md", "Makefile"];
        let signals = RepoSignals::scan(&files);
        assert_eq!(signals.histogram.get(Language::Python), 2);
        assert_eq!(signals.histogram.get(Language::TypeScript), 2);
        assert_eq!(signals.histogram.javascript_family(), 3);
        assert_eq!(signals.histogram.get(Language::Unknown), 0);
        assert_eq!(signals.histogram.total(), 5);
    }

    #[test]
    fn test_indicators_keep_scan_order_and_original_case() {
        let files = ["e2e/Cypress.config.ts", "cypress/support/index.js", "conftest.py"];
        let signals = RepoSignals::scan(&files);
        assert_eq!(
            signals.indicators.paths(FrameworkLabel::Cypress),
            ["e2e/Cypress.config.ts", "cypress/support/index.js"]
        );
        assert_eq!(signals.indicators.count(FrameworkLabel::Pytest), 1);
        assert!(!signals.indicators.has(FrameworkLabel::Jest));
    }

    #[test]
    fn test_a_path_counts_for_one_framework_at_most() {
        let signals = RepoSignals::scan(&["playwright/selenium_compat.py"]);
        assert_eq!(
            signals.indicators.counts(),
            vec![(FrameworkLabel::Playwright, 1)]
        );
    }
}
