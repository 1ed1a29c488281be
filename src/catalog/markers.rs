//! Framework marker patterns
//!
//! Each entry lists the path fragments that suggest a framework is in use.
//! Order matters: a path is claimed by the first framework whose marker fires.

use super::FrameworkLabel;

/// A single test applied to a lower-cased repository path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Substring anywhere in the path
    Contains(&'static str),
    /// Path suffix
    EndsWith(&'static str),
    /// Substring, but only for files with the given extension
    ContainsWithExtension(&'static str, &'static str),
}

impl Marker {
    /// `path_lower` must already be lower-cased; `ext` is the lower-cased extension.
    pub fn matches(&self, path_lower: &str, ext: &str) -> bool {
        match *self {
            Marker::Contains(needle) => path_lower.contains(needle),
            Marker::EndsWith(suffix) => path_lower.ends_with(suffix),
            Marker::ContainsWithExtension(needle, wanted) => {
                ext == wanted && path_lower.contains(needle)
            }
        }
    }
}

pub static MARKER_CATALOG: &[(FrameworkLabel, &[Marker])] = &[
    (
        FrameworkLabel::Cypress,
        &[Marker::Contains("cypress"), Marker::Contains("cypress.config")],
    ),
    (
        FrameworkLabel::Playwright,
        &[Marker::Contains("playwright"), Marker::Contains("playwright.config")],
    ),
    (FrameworkLabel::Selenium, &[Marker::Contains("selenium")]),
    (
        FrameworkLabel::Jest,
        &[Marker::Contains("jest.config"), Marker::Contains("jest.setup")],
    ),
    (FrameworkLabel::Vitest, &[Marker::Contains("vitest.config")]),
    (
        FrameworkLabel::Pytest,
        &[Marker::Contains("conftest.py"), Marker::Contains("pytest.ini")],
    ),
    (
        FrameworkLabel::Unittest,
        &[Marker::ContainsWithExtension("unittest", "py")],
    ),
    (
        FrameworkLabel::Junit,
        &[
            Marker::Contains("pom.xml"),
            Marker::Contains("build.gradle"),
            Marker::EndsWith("test.java"),
        ],
    ),
    (
        FrameworkLabel::Nunit,
        &[Marker::EndsWith(".csproj"), Marker::Contains("nunit")],
    ),
    (
        FrameworkLabel::Rspec,
        &[Marker::Contains("spec.rb"), Marker::Contains("rspec")],
    ),
    (FrameworkLabel::Mocha, &[Marker::Contains("mocha")]),
    (FrameworkLabel::Phpunit, &[Marker::Contains("phpunit")]),
];

/// Framework claiming this path, if any. First catalog entry wins.
pub fn match_marker(path_lower: &str, ext: &str) -> Option<FrameworkLabel> {
    MARKER_CATALOG
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| m.matches(path_lower, ext)))
        .map(|(framework, _)| *framework)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_files_are_claimed() {
        assert_eq!(match_marker("cypress.config.js", "js"), Some(FrameworkLabel::Cypress));
        assert_eq!(match_marker("jest.config.ts", "ts"), Some(FrameworkLabel::Jest));
        assert_eq!(match_marker("tests/conftest.py", "py"), Some(FrameworkLabel::Pytest));
        assert_eq!(match_marker("pom.xml", "xml"), Some(FrameworkLabel::Junit));
        assert_eq!(match_marker("src/app.csproj", "csproj"), Some(FrameworkLabel::Nunit));
        assert_eq!(match_marker("phpunit.xml", "xml"), Some(FrameworkLabel::Phpunit));
    }

    #[test]
    fn test_first_entry_wins_on_overlap() {
        // mentions both cypress and jest; cypress is declared first
        assert_eq!(
            match_marker("cypress/jest.config.js", "js"),
            Some(FrameworkLabel::Cypress)
        );
        // rspec appears before mocha in the catalog
        assert_eq!(
            match_marker("spec/mocha_rspec_helper.rb", "rb"),
            Some(FrameworkLabel::Rspec)
        );
    }

    #[test]
    fn test_unittest_requires_python_extension() {
        assert_eq!(
            match_marker("tests/unittest_helpers.py", "py"),
            Some(FrameworkLabel::Unittest)
        );
        assert_eq!(match_marker("docs/unittest.md", "md"), None);
    }

    #[test]
    fn test_plain_sources_match_nothing() {
        assert_eq!(match_marker("src/main.rs", "rs"), None);
        assert_eq!(match_marker("app/models/user.py", "py"), None);
    }
}
