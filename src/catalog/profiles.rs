//! Per-language framework choices and framework profiles

use super::{FrameworkError, FrameworkLabel, Language};
use serde::Serialize;

/// Path fragments that mark generated, vendored or test-only files
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &[
    "test",
    "spec",
    "__pycache__",
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".pytest_cache",
    "target",
    "bin",
    "obj",
    ".vscode",
    ".idea",
    "vendor",
];

/// Framework options offered for one file type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageProfile {
    pub language: Language,
    pub default_framework: FrameworkLabel,
    pub available_frameworks: Vec<FrameworkLabel>,
}

/// What a test file for a framework looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkKind {
    Unit,
    Automation,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkProfile {
    pub framework: FrameworkLabel,
    pub kind: FrameworkKind,
    pub description: &'static str,
    pub file_extensions: &'static [&'static str],
    /// Import lines keyed by language
    pub imports: &'static [(Language, &'static [&'static str])],
}

fn frameworks_for_language(language: Language) -> &'static [FrameworkLabel] {
    use FrameworkLabel::*;
    match language {
        Language::Python => &[Pytest, Selenium, Unittest, Behave],
        Language::JavaScript | Language::TypeScript => {
            &[Jest, SeleniumWebdriver, Cypress, Playwright]
        }
        Language::Java => &[Junit, Selenium, Testng],
        Language::Go => &[Testing, Selenium],
        Language::Ruby => &[Rspec, Selenium],
        Language::Php => &[Phpunit, Selenium],
        Language::CSharp => &[Nunit, Selenium],
        Language::Swift => &[Xctest],
        Language::Cpp => &[Gtest],
        Language::C => &[Unity],
        Language::Unknown => &[Generic],
    }
}

/// Language, default framework and framework choices for a file
pub fn language_profile(file_path: &str) -> LanguageProfile {
    let language = Language::from_path(file_path);
    LanguageProfile {
        language,
        default_framework: language.default_framework(),
        available_frameworks: frameworks_for_language(language).to_vec(),
    }
}

pub fn available_frameworks(file_path: &str) -> Vec<FrameworkLabel> {
    frameworks_for_language(Language::from_path(file_path)).to_vec()
}

/// Reject a user-chosen framework that makes no sense for the file type
pub fn validate_framework_choice(
    file_path: &str,
    framework: FrameworkLabel,
) -> Result<(), FrameworkError> {
    let available = frameworks_for_language(Language::from_path(file_path));
    if available.contains(&framework) {
        return Ok(());
    }
    Err(FrameworkError::Unsupported {
        framework,
        file: file_path.to_string(),
        available: available.iter().map(|f| f.as_str().to_string()).collect(),
    })
}

pub fn framework_profile(framework: FrameworkLabel) -> FrameworkProfile {
    match framework {
        FrameworkLabel::Selenium => FrameworkProfile {
            framework,
            kind: FrameworkKind::Automation,
            description: "Web automation testing with Selenium WebDriver",
            file_extensions: &[".py", ".java", ".js", ".ts", ".cs", ".rb"],
            imports: &[
                (
                    Language::Python,
                    &[
                        "from selenium import webdriver",
                        "from selenium.webdriver.common.by import By",
                        "from selenium.webdriver.support.ui import WebDriverWait",
                    ],
                ),
                (
                    Language::Java,
                    &[
                        "import org.openqa.selenium.WebDriver;",
                        "import org.openqa.selenium.chrome.ChromeDriver;",
                        "import org.openqa.selenium.By;",
                    ],
                ),
                (
                    Language::JavaScript,
                    &["const { Builder, By, until } = require(\"selenium-webdriver\");"],
                ),
                (
                    Language::CSharp,
                    &["using OpenQA.Selenium;", "using OpenQA.Selenium.Chrome;"],
                ),
            ],
        },
        FrameworkLabel::Cypress => FrameworkProfile {
            framework,
            kind: FrameworkKind::Automation,
            description: "End-to-end testing with Cypress",
            file_extensions: &[".js", ".ts"],
            imports: &[
                (Language::JavaScript, &["/// <reference types=\"cypress\" />"]),
                (Language::TypeScript, &["/// <reference types=\"cypress\" />"]),
            ],
        },
        FrameworkLabel::Playwright => FrameworkProfile {
            framework,
            kind: FrameworkKind::Automation,
            description: "Cross-browser automation with Playwright",
            file_extensions: &[".js", ".ts", ".py"],
            imports: &[
                (
                    Language::Python,
                    &["from playwright.sync_api import sync_playwright"],
                ),
                (
                    Language::JavaScript,
                    &["const { test, expect } = require(\"@playwright/test\");"],
                ),
                (
                    Language::TypeScript,
                    &["import { test, expect } from \"@playwright/test\";"],
                ),
            ],
        },
        FrameworkLabel::Pytest => FrameworkProfile {
            framework,
            kind: FrameworkKind::Unit,
            description: "Python unit testing with pytest",
            file_extensions: &[".py"],
            imports: &[(Language::Python, &["import pytest"])],
        },
        FrameworkLabel::Jest => FrameworkProfile {
            framework,
            kind: FrameworkKind::Unit,
            description: "JavaScript unit testing with Jest",
            file_extensions: &[".js", ".jsx", ".ts", ".tsx"],
            imports: &[
                (
                    Language::JavaScript,
                    &["const { test, expect } = require(\"@jest/globals\");"],
                ),
                (
                    Language::TypeScript,
                    &["import { test, expect } from \"@jest/globals\";"],
                ),
            ],
        },
        _ => FrameworkProfile {
            framework,
            kind: FrameworkKind::Generic,
            description: "Generic testing framework",
            file_extensions: &[],
            imports: &[],
        },
    }
}

impl FrameworkProfile {
    pub fn imports_for(&self, language: Language) -> &'static [&'static str] {
        self.imports
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, lines)| *lines)
            .unwrap_or(&[])
    }
}

pub fn is_supported_file(file_path: &str) -> bool {
    Language::from_path(file_path) != Language::Unknown
}

pub fn should_exclude_file<S: AsRef<str>>(file_path: &str, patterns: &[S]) -> bool {
    let path_lower = file_path.to_lowercase();
    patterns.iter().any(|p| path_lower.contains(p.as_ref()))
}

/// A source file worth generating tests for
pub fn is_code_file<S: AsRef<str>>(file_path: &str, excluded: &[S]) -> bool {
    is_supported_file(file_path) && !should_exclude_file(file_path, excluded)
}

/// Conventional test file name for a source file under a framework
pub fn test_file_name(original_file: &str, framework: FrameworkLabel) -> String {
    let file_name = original_file.rsplit('/').next().unwrap_or(original_file);
    let base = file_name.split('.').next().unwrap_or(file_name);

    match framework {
        FrameworkLabel::Pytest => format!("test_{}.py", base),
        FrameworkLabel::Jest => format!("{}.test.js", base),
        FrameworkLabel::Junit => format!("{}Test.java", base),
        FrameworkLabel::Testing => format!("{}_test.go", base),
        FrameworkLabel::Rspec => format!("{}_spec.rb", base),
        FrameworkLabel::Phpunit => format!("{}Test.php", base),
        FrameworkLabel::Nunit => format!("{}Tests.cs", base),
        FrameworkLabel::Xctest => format!("{}Tests.swift", base),
        _ => format!("test_{}.py", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_profile_for_typescript() {
        let profile = language_profile("web/src/App.tsx");
        assert_eq!(profile.language, Language::TypeScript);
        assert_eq!(profile.default_framework, FrameworkLabel::Jest);
        assert!(profile.available_frameworks.contains(&FrameworkLabel::Playwright));
    }

    #[test]
    fn test_unknown_extension_only_offers_generic() {
        assert_eq!(available_frameworks("README"), vec![FrameworkLabel::Generic]);
        assert!(!is_supported_file("README"));
    }

    #[test]
    fn test_validate_framework_choice() {
        assert!(validate_framework_choice("calc.py", FrameworkLabel::Behave).is_ok());

        let err = validate_framework_choice("calc.py", FrameworkLabel::Jest).unwrap_err();
        match &err {
            FrameworkError::Unsupported { available, .. } => {
                assert_eq!(available, &["pytest", "selenium", "unittest", "behave"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("available: pytest, selenium"));
    }

    #[test]
    fn test_profiles_fall_back_to_generic() {
        let profile = framework_profile(FrameworkLabel::Rspec);
        assert_eq!(profile.kind, FrameworkKind::Generic);
        assert!(profile.imports.is_empty());

        let selenium = framework_profile(FrameworkLabel::Selenium);
        assert_eq!(selenium.kind, FrameworkKind::Automation);
        assert_eq!(selenium.imports_for(Language::CSharp).len(), 2);
        assert!(selenium.imports_for(Language::Go).is_empty());
    }

    #[test]
    fn test_code_file_filtering() {
        assert!(is_code_file("app/models.py", DEFAULT_EXCLUDED_PATTERNS));
        assert!(!is_code_file("node_modules/lodash/index.js", DEFAULT_EXCLUDED_PATTERNS));
        assert!(!is_code_file("tests/test_models.py", DEFAULT_EXCLUDED_PATTERNS));
        assert!(!is_code_file("docs/guide.md", DEFAULT_EXCLUDED_PATTERNS));
    }

    #[test]
    fn test_test_file_names() {
        assert_eq!(test_file_name("src/calc.py", FrameworkLabel::Pytest), "test_calc.py");
        assert_eq!(test_file_name("src/Button.jsx", FrameworkLabel::Jest), "Button.test.js");
        assert_eq!(test_file_name("Main.java", FrameworkLabel::Junit), "MainTest.java");
        assert_eq!(test_file_name("pkg/server.go", FrameworkLabel::Testing), "server_test.go");
        assert_eq!(test_file_name("lib/user.rb", FrameworkLabel::Cypress), "test_user.py");
    }
}
