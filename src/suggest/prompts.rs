//! Prompts that ask a model for numbered test-case summaries
//!
//! The wording keeps the model on the `1. summary` format the line parser
//! understands.

use crate::catalog::FrameworkLabel;
use serde::Serialize;

const FORMAT_FOOTER: &str = r#"Format your response as:
1. Test case summary here
2. Another test case summary
3. Third test case summary
etc."#;

pub const SELENIUM_SYSTEM: &str = r#"You are a Senior QA Engineer specializing in Selenium web automation testing. Your task is to analyze code files and suggest meaningful UI/web automation test cases.

Rules:
1. Return ONLY a numbered list of 3-5 test case summaries
2. Focus on UI interactions, user workflows, and web element testing
3. Consider browser compatibility, responsive design, and user experience
4. Include scenarios for form validation, navigation, and dynamic content
5. Each summary should describe what UI behavior to test"#;

pub const E2E_SYSTEM: &str = r#"You are a Senior QA Engineer specializing in end-to-end web testing. Your task is to analyze code files and suggest meaningful E2E test cases.

Rules:
1. Return ONLY a numbered list of 3-5 test case summaries
2. Focus on complete user journeys and workflows
3. Consider API interactions, database state, and UI behavior
4. Include scenarios for authentication, data flow, and error states
5. Each summary should describe what end-to-end behavior to test"#;

pub const GENERAL_SYSTEM: &str = r#"You are a Senior QA Engineer specializing in test automation. Your task is to analyze code files and suggest meaningful test cases.

Rules:
1. Return ONLY a numbered list of 3-5 test case summaries
2. Focus on edge cases, error handling, and validation
3. Each summary should be 1-2 sentences describing what to test
4. Do not include actual test code, only descriptions
5. Consider the detected framework and language conventions"#;

/// Approximate characters per token
const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

/// A source file shown to the model
#[derive(Debug, Clone, Copy)]
pub struct FileExcerpt<'a> {
    pub path: &'a str,
    pub content: &'a str,
}

pub fn estimate_token_count(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Keep the first 80% and last 20% of the character budget when over `max_tokens`
pub fn truncate_content(content: &str, max_tokens: usize) -> String {
    if estimate_token_count(content) <= max_tokens {
        return content.to_string();
    }

    let chars_limit = max_tokens * CHARS_PER_TOKEN;
    let head_len = chars_limit * 4 / 5;
    let tail_len = chars_limit / 5;

    let head: String = content.chars().take(head_len).collect();
    let total = content.chars().count();
    let tail: String = content.chars().skip(total.saturating_sub(tail_len)).collect();

    format!("{}\n\n... [CONTENT TRUNCATED] ...\n\n{}", head, tail)
}

pub fn system_prompt(framework: FrameworkLabel) -> String {
    let body = match framework {
        FrameworkLabel::Selenium => SELENIUM_SYSTEM,
        f if f.is_e2e() => E2E_SYSTEM,
        _ => GENERAL_SYSTEM,
    };
    format!("{}\n\n{}", body, FORMAT_FOOTER)
}

fn render_files(files: &[FileExcerpt], max_tokens: usize) -> String {
    files
        .iter()
        .map(|f| format!("File: {}\n```\n{}\n```", f.path, truncate_content(f.content, max_tokens)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_prompt(framework: FrameworkLabel, files: &[FileExcerpt], max_tokens: usize) -> String {
    let rendered = render_files(files, max_tokens);
    match framework {
        FrameworkLabel::Selenium => format!(
            "Analyze these code files and suggest Selenium automation test cases:\n\n{}\n\n\
             Generate 3-5 meaningful Selenium test case suggestions focusing on:\n\
             - UI element interactions (clicks, inputs, selections)\n\
             - Form submissions and validations\n\
             - Page navigation and routing\n\
             - Dynamic content loading\n\
             - Cross-browser compatibility scenarios\n\
             - Responsive design testing",
            rendered
        ),
        f if f.is_e2e() => format!(
            "Analyze these code files and suggest {f} E2E test cases:\n\n{rendered}\n\n\
             Generate 3-5 meaningful {f} test case suggestions focusing on:\n\
             - Complete user workflows\n\
             - API integration testing\n\
             - Authentication flows\n\
             - Data persistence and state management\n\
             - Error handling and recovery\n\
             - Performance and loading scenarios"
        ),
        f => format!(
            "Analyze these code files and suggest test cases for {f} framework:\n\n{rendered}\n\n\
             Generate 3-5 meaningful test case suggestions focusing on:\n\
             - Edge cases and boundary conditions\n\
             - Error handling and validation\n\
             - Core functionality verification\n\
             - Integration points if applicable"
        ),
    }
}

/// System + user messages for a suggestion request
pub fn build_messages(
    framework: FrameworkLabel,
    files: &[FileExcerpt],
    max_tokens: usize,
) -> Vec<PromptMessage> {
    vec![
        PromptMessage {
            role: Role::System,
            content: system_prompt(framework),
        },
        PromptMessage {
            role: Role::User,
            content: user_prompt(framework, files, max_tokens),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_content_keeps_head_and_tail() {
        let content = format!("{}{}", "a".repeat(100), "z".repeat(100));
        let truncated = truncate_content(&content, 10);
        assert!(truncated.starts_with(&"a".repeat(32)));
        assert!(truncated.ends_with(&"z".repeat(8)));
        assert!(truncated.contains("[CONTENT TRUNCATED]"));
    }

    #[test]
    fn test_short_content_is_untouched() {
        assert_eq!(truncate_content("def add(a, b): ...", 100), "def add(a, b): ...");
    }

    #[test]
    fn test_system_prompt_variants() {
        assert!(system_prompt(FrameworkLabel::Selenium).contains("Selenium web automation"));
        assert!(system_prompt(FrameworkLabel::Playwright).contains("end-to-end web testing"));
        assert!(system_prompt(FrameworkLabel::Junit).contains("test automation"));
        assert!(system_prompt(FrameworkLabel::Jest).ends_with("etc."));
    }

    #[test]
    fn test_user_prompt_embeds_files() {
        let files = [
            FileExcerpt {
                path: "calc.py",
                content: "def add(a, b):\n    return a + b",
            },
            FileExcerpt {
                path: "util.py",
                content: "X = 1",
            },
        ];
        let messages = build_messages(FrameworkLabel::Pytest, &files, 20_000);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);

        let user = &messages[1].content;
        assert!(user.contains("test cases for pytest framework"));
        assert!(user.contains("File: calc.py\n```\ndef add(a, b):\n    return a + b\n```\nFile: util.py"));
    }

    #[test]
    fn test_e2e_user_prompt_names_runner() {
        let prompt = user_prompt(FrameworkLabel::Cypress, &[], 100);
        assert!(prompt.contains("suggest cypress E2E test cases"));
    }
}
