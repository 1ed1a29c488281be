//! Marker catalog
//!
//! Static tables that everything else reads from:
//! - file extension → language
//! - language → default test framework
//! - framework → marker patterns that betray its presence in a repository
//! - per-extension framework choices and framework profiles

mod markers;
mod profiles;

pub use markers::{match_marker, Marker, MARKER_CATALOG};
pub use profiles::{
    available_frameworks, framework_profile, is_code_file, is_supported_file,
    language_profile, should_exclude_file, test_file_name, validate_framework_choice,
    FrameworkKind, FrameworkProfile, LanguageProfile, DEFAULT_EXCLUDED_PATTERNS,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lower-cased text after the last `.` of a path, empty when there is none.
pub fn extension(path: &str) -> String {
    match path.rfind('.') {
        Some(idx) => path[idx + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Programming language of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Ruby,
    Php,
    CSharp,
    Swift,
    Cpp,
    C,
    Unknown,
}

impl Language {
    /// Every language with a histogram bucket (everything but `Unknown`)
    pub const KNOWN: [Language; 11] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Go,
        Language::Ruby,
        Language::Php,
        Language::CSharp,
        Language::Swift,
        Language::Cpp,
        Language::C,
    ];

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Language::Python,
            "js" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "go" => Language::Go,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "cs" => Language::CSharp,
            "swift" => Language::Swift,
            "cpp" => Language::Cpp,
            "c" | "h" => Language::C,
            _ => Language::Unknown,
        }
    }

    pub fn from_path(path: &str) -> Self {
        Self::from_extension(&extension(path))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::CSharp => "csharp",
            Language::Swift => "swift",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Unknown => "unknown",
        }
    }

    pub fn is_javascript_family(&self) -> bool {
        matches!(self, Language::JavaScript | Language::TypeScript)
    }

    /// Context-free framework choice for a language
    pub fn default_framework(&self) -> FrameworkLabel {
        match self {
            Language::Python => FrameworkLabel::Pytest,
            Language::JavaScript | Language::TypeScript => FrameworkLabel::Jest,
            Language::Java => FrameworkLabel::Junit,
            Language::Go => FrameworkLabel::Testing,
            Language::Ruby => FrameworkLabel::Rspec,
            Language::Php => FrameworkLabel::Phpunit,
            Language::CSharp => FrameworkLabel::Nunit,
            Language::Swift => FrameworkLabel::Xctest,
            Language::Cpp => FrameworkLabel::Gtest,
            Language::C => FrameworkLabel::Unity,
            Language::Unknown => FrameworkLabel::Generic,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical name of a test framework or runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameworkLabel {
    Pytest,
    Unittest,
    Selenium,
    Behave,
    Jest,
    Vitest,
    Mocha,
    Cypress,
    Playwright,
    SeleniumWebdriver,
    Junit,
    Testng,
    Nunit,
    Testing,
    Rspec,
    Phpunit,
    Xctest,
    Gtest,
    Unity,
    Generic,
}

impl FrameworkLabel {
    pub const ALL: [FrameworkLabel; 20] = [
        FrameworkLabel::Pytest,
        FrameworkLabel::Unittest,
        FrameworkLabel::Selenium,
        FrameworkLabel::Behave,
        FrameworkLabel::Jest,
        FrameworkLabel::Vitest,
        FrameworkLabel::Mocha,
        FrameworkLabel::Cypress,
        FrameworkLabel::Playwright,
        FrameworkLabel::SeleniumWebdriver,
        FrameworkLabel::Junit,
        FrameworkLabel::Testng,
        FrameworkLabel::Nunit,
        FrameworkLabel::Testing,
        FrameworkLabel::Rspec,
        FrameworkLabel::Phpunit,
        FrameworkLabel::Xctest,
        FrameworkLabel::Gtest,
        FrameworkLabel::Unity,
        FrameworkLabel::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkLabel::Pytest => "pytest",
            FrameworkLabel::Unittest => "unittest",
            FrameworkLabel::Selenium => "selenium",
            FrameworkLabel::Behave => "behave",
            FrameworkLabel::Jest => "jest",
            FrameworkLabel::Vitest => "vitest",
            FrameworkLabel::Mocha => "mocha",
            FrameworkLabel::Cypress => "cypress",
            FrameworkLabel::Playwright => "playwright",
            FrameworkLabel::SeleniumWebdriver => "selenium-webdriver",
            FrameworkLabel::Junit => "junit",
            FrameworkLabel::Testng => "testng",
            FrameworkLabel::Nunit => "nunit",
            FrameworkLabel::Testing => "testing",
            FrameworkLabel::Rspec => "rspec",
            FrameworkLabel::Phpunit => "phpunit",
            FrameworkLabel::Xctest => "xctest",
            FrameworkLabel::Gtest => "gtest",
            FrameworkLabel::Unity => "unity",
            FrameworkLabel::Generic => "generic",
        }
    }

    /// Browser-driving end-to-end runners
    pub fn is_e2e(&self) -> bool {
        matches!(self, FrameworkLabel::Cypress | FrameworkLabel::Playwright)
    }
}

impl fmt::Display for FrameworkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameworkLabel {
    type Err = FrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FrameworkLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == wanted)
            .ok_or_else(|| FrameworkError::Unknown(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameworkError {
    #[error("unknown test framework '{0}'")]
    Unknown(String),
    #[error("framework '{framework}' is not supported for {file}; available: {}", .available.join(", "))]
    Unsupported {
        framework: FrameworkLabel,
        file: String,
        available: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_suffix() {
        assert_eq!(extension("src/App.TSX"), "tsx");
        assert_eq!(extension("Makefile"), "");
        assert_eq!(extension("archive.tar.gz"), "gz");
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(Language::from_path("pkg/handler.go"), Language::Go);
        assert_eq!(Language::from_path("include/util.h"), Language::C);
        assert_eq!(Language::from_path("Dockerfile"), Language::Unknown);
        assert_eq!(Language::from_path("styles.css"), Language::Unknown);
    }

    #[test]
    fn test_default_framework_map() {
        assert_eq!(Language::TypeScript.default_framework(), FrameworkLabel::Jest);
        assert_eq!(Language::Swift.default_framework(), FrameworkLabel::Xctest);
        assert_eq!(Language::Unknown.default_framework(), FrameworkLabel::Generic);
    }

    #[test]
    fn test_framework_label_round_trips_through_str() {
        for label in FrameworkLabel::ALL {
            assert_eq!(label.as_str().parse::<FrameworkLabel>(), Ok(label));
        }
        assert_eq!(" PyTest ".parse::<FrameworkLabel>(), Ok(FrameworkLabel::Pytest));
        assert!(matches!(
            "nose".parse::<FrameworkLabel>(),
            Err(FrameworkError::Unknown(name)) if name == "nose"
        ));
    }

    #[test]
    fn test_framework_label_serializes_kebab_case() {
        let json = serde_json::to_string(&FrameworkLabel::SeleniumWebdriver).unwrap();
        assert_eq!(json, "\"selenium-webdriver\"");
        let parsed: FrameworkLabel = serde_json::from_str("\"phpunit\"").unwrap();
        assert_eq!(parsed, FrameworkLabel::Phpunit);
    }
}
