//! Topic documents and their metadata.

use super::{Element, Tag};
use serde::ser::{Serialize, Serializer};

/// Title used when a topic has no `<title>`.
pub const UNTITLED: &str = "Untitled";

/// A parsed topic.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Topic {
    /// Title text, trimmed
    pub title: Option<String>,
    /// Name/value pairs from the prolog
    pub metadata: Metadata,
    /// Root element of the topic
    pub root: Element,
}

impl Topic {
    /// Builds a topic from its root element.
    pub fn from_root(root: Element) -> Self {
        let title = root
            .find_child(&Tag::Title)
            .and_then(|t| t.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let metadata = Metadata::from_root(&root);

        Self {
            title,
            metadata,
            root,
        }
    }

    /// Returns the title, or `fallback` when the topic has none.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    /// Returns the body container, if present.
    pub fn body(&self) -> Option<&Element> {
        self.root.find_child(&Tag::Body)
    }

    /// Returns the number of top-level body blocks.
    pub fn block_count(&self) -> usize {
        self.body().map(|b| b.children.len()).unwrap_or(0)
    }

    /// Returns the plain text content of the body.
    pub fn plain_text(&self) -> String {
        self.body().map(Element::flat_text).unwrap_or_default()
    }
}

/// Insertion-ordered metadata mapping.
///
/// Inserting an existing key replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects `<data name=".." value=".."/>` entries found anywhere under
    /// any `<prolog>` of `root`.
    ///
    /// Entries with a missing or empty name or value are skipped.
    pub fn from_root(root: &Element) -> Self {
        let mut metadata = Self::new();

        let prologs = std::iter::once(root)
            .chain(root.descendants())
            .filter(|e| e.tag == Tag::Prolog);

        for prolog in prologs {
            for data in prolog.descendants().filter(|e| e.tag == Tag::Data) {
                match (data.attr("name"), data.attr("value")) {
                    (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                        metadata.insert(name, value);
                    }
                    _ => {}
                }
            }
        }

        metadata
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str, value: &str) -> Element {
        Element::new(Tag::Data)
            .with_attr("name", name)
            .with_attr("value", value)
    }

    #[test]
    fn test_metadata_last_write_wins_in_place() {
        let mut meta = Metadata::new();
        meta.insert("audience", "admin");
        meta.insert("product", "cli");
        meta.insert("audience", "developer");

        let entries: Vec<_> = meta.iter().collect();
        assert_eq!(entries, vec![("audience", "developer"), ("product", "cli")]);
    }

    #[test]
    fn test_metadata_from_nested_prolog() {
        let root = Element::new(Tag::Other("concept".into()))
            .with_child(Element::new(Tag::Title).with_text("Intro"))
            .with_child(
                Element::new(Tag::Prolog).with_child(
                    Element::new(Tag::Other("metadata".into()))
                        .with_child(data("audience", "admin, developer"))
                        .with_child(Element::new(Tag::Data).with_attr("name", "orphan"))
                        .with_child(data("status", "")),
                ),
            );

        let meta = Metadata::from_root(&root);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("audience"), Some("admin, developer"));
    }

    #[test]
    fn test_data_outside_prolog_ignored() {
        let root = Element::new(Tag::Other("concept".into()))
            .with_child(Element::new(Tag::Body).with_child(data("audience", "admin")));
        assert!(Metadata::from_root(&root).is_empty());
    }

    #[test]
    fn test_topic_title_trimmed() {
        let root = Element::new(Tag::Other("concept".into()))
            .with_child(Element::new(Tag::Title).with_text("\n  Getting  Started \n"));
        let topic = Topic::from_root(root);
        assert_eq!(topic.title.as_deref(), Some("Getting  Started"));
    }

    #[test]
    fn test_topic_untitled_fallback() {
        let topic = Topic::from_root(Element::new(Tag::Other("concept".into())));
        assert_eq!(topic.title_or(UNTITLED), "Untitled");
        assert_eq!(topic.block_count(), 0);
    }

    #[test]
    fn test_metadata_serializes_as_map() {
        let mut meta = Metadata::new();
        meta.insert("b", "2");
        meta.insert("a", "1");
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
