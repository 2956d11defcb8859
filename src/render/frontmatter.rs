//! YAML frontmatter generation.

use crate::model::Metadata;

/// Separator marking a multi-valued metadata entry.
const LIST_SEPARATOR: char = ',';

/// Renders a frontmatter block for `title` and `metadata`.
///
/// The title always comes first. Values containing a comma become YAML
/// lists with one trimmed item per segment. Scalars that plain YAML would
/// misread are double-quoted.
pub fn render_frontmatter(title: &str, metadata: &Metadata) -> String {
    let mut output = String::from("---\n");
    output.push_str(&format!("title: {}\n", yaml_scalar(title)));

    for (key, value) in metadata.iter() {
        if value.contains(LIST_SEPARATOR) {
            output.push_str(&format!("{}:\n", key));
            for item in value.split(LIST_SEPARATOR) {
                output.push_str(&format!("  - {}\n", yaml_scalar(item.trim())));
            }
        } else {
            output.push_str(&format!("{}: {}\n", key, yaml_scalar(value)));
        }
    }

    output.push_str("---\n\n");
    output
}

/// Writes `text` as a plain scalar when YAML reads it back unchanged,
/// otherwise as a double-quoted string.
fn yaml_scalar(text: &str) -> String {
    if needs_quotes(text) {
        format!("\"{}\"", escape_yaml(text))
    } else {
        text.to_string()
    }
}

fn needs_quotes(text: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];

    text.is_empty()
        || text.starts_with(INDICATORS)
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.ends_with(':')
        || text.contains(": ")
        || text.contains(" #")
        || text.contains(['\n', '\r', '\t'])
}

fn escape_yaml(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_only() {
        assert_eq!(
            render_frontmatter("Intro", &Metadata::new()),
            "---\ntitle: Intro\n---\n\n"
        );
    }

    #[test]
    fn test_comma_values_become_lists() {
        let mut metadata = Metadata::new();
        metadata.insert("audience", "admin, developer");
        metadata.insert("product", "undita");

        let frontmatter = render_frontmatter("Intro", &metadata);
        assert_eq!(
            frontmatter,
            "---\ntitle: Intro\naudience:\n  - admin\n  - developer\nproduct: undita\n---\n\n"
        );
        assert!(!frontmatter.contains("admin, developer"));
    }

    #[test]
    fn test_titles_with_yaml_syntax_are_quoted() {
        assert_eq!(
            render_frontmatter("Setup: the \"quick\" way", &Metadata::new()),
            "---\ntitle: \"Setup: the \\\"quick\\\" way\"\n---\n\n"
        );
        assert_eq!(
            render_frontmatter("#1 tip", &Metadata::new()),
            "---\ntitle: \"#1 tip\"\n---\n\n"
        );
        assert_eq!(
            render_frontmatter("C# and F#", &Metadata::new()),
            "---\ntitle: C# and F#\n---\n\n"
        );
    }

    #[test]
    fn test_metadata_values_with_yaml_syntax_are_quoted() {
        let mut metadata = Metadata::new();
        metadata.insert("keywords", "ratio: 2, *star*");
        metadata.insert("note", "see: appendix");

        assert_eq!(
            render_frontmatter("Intro", &metadata),
            "---\ntitle: Intro\nkeywords:\n  - \"ratio: 2\"\n  - \"*star*\"\nnote: \"see: appendix\"\n---\n\n"
        );
    }
}
