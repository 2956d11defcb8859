//! File kind detection for source trees.

use crate::dita::{MAP_EXTENSION, TOPIC_EXTENSION};
use std::path::Path;

/// Markdown file extension.
const MARKDOWN_EXTENSION: &str = "md";

/// Kinds of files found in a source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.dita` topic
    Topic,
    /// `.ditamap` map
    Map,
    /// `.md` file, copied verbatim
    Markdown,
    /// Anything else
    Unsupported,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Topic => write!(f, "DITA topic"),
            FileKind::Map => write!(f, "DITA map"),
            FileKind::Markdown => write!(f, "Markdown"),
            FileKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Detects the kind of a file from its extension (case-insensitive).
pub fn detect_file_kind(path: impl AsRef<Path>) -> FileKind {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some(MAP_EXTENSION) => FileKind::Map,
        Some(TOPIC_EXTENSION) => FileKind::Topic,
        Some(MARKDOWN_EXTENSION) => FileKind::Markdown,
        _ => FileKind::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_kinds() {
        assert_eq!(detect_file_kind("topics/intro.dita"), FileKind::Topic);
        assert_eq!(detect_file_kind("topics/topics.ditamap"), FileKind::Map);
        assert_eq!(detect_file_kind("notes.md"), FileKind::Markdown);
    }

    #[test]
    fn test_detect_case_insensitive() {
        assert_eq!(detect_file_kind("INTRO.DITA"), FileKind::Topic);
        assert_eq!(detect_file_kind("Guide.DitaMap"), FileKind::Map);
        assert_eq!(detect_file_kind("README.MD"), FileKind::Markdown);
    }

    #[test]
    fn test_detect_unsupported() {
        assert_eq!(detect_file_kind("guide.xyz"), FileKind::Unsupported);
        assert_eq!(detect_file_kind("Makefile"), FileKind::Unsupported);
        assert_eq!(detect_file_kind("archive.dita.bak"), FileKind::Unsupported);
    }
}
