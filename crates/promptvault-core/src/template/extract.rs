//! Placeholder extraction from template content.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one non-nested `{...}` token, left-to-right.
///
/// The inner text may itself contain `{` (there is no escaping); a token
/// closes at the first `}` after its opening brace, so `"{a{b}"` carries a
/// single variable named `a{b`. A bare `{` or `}` that never closes is
/// plain text, as is the empty token `{}`.
pub(crate) static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Extracts the distinct placeholder names from `content`.
///
/// Names are returned in first-occurrence order; a placeholder that repeats
/// in the content appears once.
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for capture in PLACEHOLDER.captures_iter(content) {
        let name = &capture[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dedup_preserves_first_occurrence_order() {
        assert_eq!(extract_variables("{a} x {b} {a}"), vec!["a", "b"]);
    }

    #[test]
    fn test_extract_empty_content() {
        assert!(extract_variables("").is_empty());
        assert!(extract_variables("no placeholders here").is_empty());
    }

    #[test]
    fn test_unmatched_brace_joins_next_token() {
        assert_eq!(extract_variables("{a{b}"), vec!["a{b"]);
    }

    #[test]
    fn test_stray_braces_are_text() {
        assert!(extract_variables("}x{").is_empty());
        assert!(extract_variables("{}").is_empty());
    }

    #[test]
    fn test_multibyte_names() {
        assert_eq!(extract_variables("{버전 기록} 내용"), vec!["버전 기록"]);
    }
}
