//! Whitespace normalization for text nodes.

use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapses every run of whitespace (including newlines) into a single
/// space and trims both ends.
pub fn normalize_text(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// [`normalize_text`] for optional text nodes; absent text yields `""`.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs() {
        assert_eq!(normalize_text("  Install\n\t the   tool \n"), "Install the tool");
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("")), "");
        assert_eq!(normalize_text(" \n\t "), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["a  b", "\n x \n y \n", "already normal", "", "tab\there", "不\u{3000}同"];
        for input in inputs {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once, "input: {:?}", input);
        }
    }
}
