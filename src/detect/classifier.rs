//! Priority cascade that turns repository evidence into one framework label
//!
//! The cascade is a decision table. Rules are evaluated top to bottom and the
//! first rule that yields a label wins:
//!
//! 1. E2E runners (cypress, then playwright) dominate everything else
//! 2. Selenium, when the project has any Python in it
//! 3. Python-leaning projects
//! 4. JavaScript/TypeScript-leaning projects
//! 5. - 9. One rule per remaining language family
//!
//! When no rule fires, the target language's static default is used.

use super::signals::{LanguageHistogram, RepoSignals};
use crate::catalog::{FrameworkLabel, Language};
use serde::Serialize;
use std::collections::BTreeMap;

/// Inputs a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub signals: &'a RepoSignals,
    pub target_language: Language,
}

impl Evidence<'_> {
    fn histogram(&self) -> &LanguageHistogram {
        &self.signals.histogram
    }

    fn indicated(&self, framework: FrameworkLabel) -> bool {
        self.signals.indicators.has(framework)
    }

    /// Target is `language`, or the repository contains any of it
    fn touches(&self, language: Language) -> bool {
        self.target_language == language || self.histogram().get(language) > 0
    }
}

/// One row of the decision table
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Evidence) -> bool,
    /// Checked in order; the first indicated framework is the answer
    pub prefer: &'static [FrameworkLabel],
    /// Answer when the rule applies but nothing in `prefer` is indicated.
    /// `None` lets evaluation continue with the next rule.
    pub default: Option<FrameworkLabel>,
}

impl Rule {
    fn evaluate(&self, evidence: &Evidence) -> Option<FrameworkLabel> {
        if !(self.applies)(evidence) {
            return None;
        }
        self.prefer
            .iter()
            .copied()
            .find(|framework| evidence.indicated(*framework))
            .or(self.default)
    }
}

pub const LANGUAGE_DEFAULT_RULE: &str = "language-default";

pub static CLASSIFICATION_RULES: &[Rule] = &[
    Rule {
        name: "e2e",
        applies: |_| true,
        prefer: &[FrameworkLabel::Cypress, FrameworkLabel::Playwright],
        default: None,
    },
    Rule {
        name: "selenium",
        applies: |ev| ev.indicated(FrameworkLabel::Selenium) && ev.touches(Language::Python),
        prefer: &[],
        default: Some(FrameworkLabel::Selenium),
    },
    Rule {
        name: "python",
        applies: |ev| {
            ev.target_language == Language::Python
                || ev.histogram().get(Language::Python) > ev.histogram().javascript_family()
        },
        prefer: &[
            FrameworkLabel::Pytest,
            FrameworkLabel::Unittest,
            FrameworkLabel::Selenium,
        ],
        default: Some(FrameworkLabel::Pytest),
    },
    Rule {
        name: "javascript",
        applies: |ev| {
            ev.target_language.is_javascript_family()
                || ev.histogram().javascript_family() > ev.histogram().get(Language::Python)
        },
        prefer: &[
            FrameworkLabel::Jest,
            FrameworkLabel::Vitest,
            FrameworkLabel::Mocha,
            FrameworkLabel::Cypress,
            FrameworkLabel::Playwright,
        ],
        default: Some(FrameworkLabel::Jest),
    },
    Rule {
        name: "java",
        applies: |ev| ev.touches(Language::Java),
        prefer: &[],
        default: Some(FrameworkLabel::Junit),
    },
    Rule {
        name: "csharp",
        applies: |ev| ev.touches(Language::CSharp),
        prefer: &[],
        default: Some(FrameworkLabel::Nunit),
    },
    Rule {
        name: "go",
        applies: |ev| ev.touches(Language::Go),
        prefer: &[],
        default: Some(FrameworkLabel::Testing),
    },
    Rule {
        name: "ruby",
        applies: |ev| ev.touches(Language::Ruby),
        prefer: &[],
        default: Some(FrameworkLabel::Rspec),
    },
    Rule {
        name: "php",
        applies: |ev| ev.touches(Language::Php),
        prefer: &[],
        default: Some(FrameworkLabel::Phpunit),
    },
];

/// Result of a classification, with the rule that decided it and the
/// evidence it was decided on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub framework: FrameworkLabel,
    pub rule: &'static str,
    pub target_language: Language,
    pub histogram: LanguageHistogram,
    /// Marker paths seen per framework
    pub indicators: BTreeMap<FrameworkLabel, usize>,
}

/// Run the decision table. Never fails; falls back to the language default.
pub fn classify(signals: &RepoSignals, target_language: Language) -> Classification {
    let evidence = Evidence {
        signals,
        target_language,
    };

    let decided = CLASSIFICATION_RULES
        .iter()
        .find_map(|rule| rule.evaluate(&evidence).map(|fw| (fw, rule.name)));

    let (framework, rule) = decided.unwrap_or_else(|| {
        (target_language.default_framework(), LANGUAGE_DEFAULT_RULE)
    });

    tracing::debug!(
        %framework,
        rule,
        target = %target_language,
        "framework classified"
    );

    Classification {
        framework,
        rule,
        target_language,
        histogram: signals.histogram.clone(),
        indicators: signals.indicators.counts().into_iter().collect(),
    }
}
