//! Map documents and topic references.

use super::{Element, Tag};
use serde::Serialize;

/// Chunking directive on a topic reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Chunk {
    /// No `chunk` attribute.
    #[default]
    None,
    /// `chunk="to-content"`: nested references are merged into this one.
    ToContent,
    /// Any other value, kept for diagnostics but treated as no directive.
    Other(String),
}

impl Chunk {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            None => Chunk::None,
            Some("to-content") => Chunk::ToContent,
            Some(other) => Chunk::Other(other.to_string()),
        }
    }

    /// Returns true if nested references should be merged.
    pub fn merges_children(&self) -> bool {
        matches!(self, Chunk::ToContent)
    }
}

/// A `<topicref>` entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TopicRef {
    /// Target file, relative to the map
    pub href: Option<String>,
    /// Chunking directive
    pub chunk: Chunk,
    /// Optional navigation title
    pub navtitle: Option<String>,
    /// Nested references
    pub children: Vec<TopicRef>,
}

impl TopicRef {
    /// Creates a reference to `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// Marks this reference as `chunk="to-content"`.
    pub fn to_content(mut self) -> Self {
        self.chunk = Chunk::ToContent;
        self
    }

    /// Adds a nested reference.
    pub fn with_child(mut self, child: TopicRef) -> Self {
        self.children.push(child);
        self
    }

    fn from_element(element: &Element) -> Self {
        Self {
            href: element.attr("href").map(str::to_string),
            chunk: Chunk::from_attr(element.attr("chunk")),
            navtitle: element.attr("navtitle").map(str::to_string),
            children: element
                .children_with(&Tag::TopicRef)
                .map(TopicRef::from_element)
                .collect(),
        }
    }
}

/// A parsed `.ditamap`.
///
/// All nesting levels are kept, but conversion only consumes the top-level
/// references and their direct children.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DitaMap {
    /// Map title, if any
    pub title: Option<String>,
    /// Top-level topic references
    pub topicrefs: Vec<TopicRef>,
}

impl DitaMap {
    /// Builds a map from its root element.
    pub fn from_root(root: &Element) -> Self {
        Self {
            title: root
                .find_child(&Tag::Title)
                .map(|t| t.flat_text().trim().to_string())
                .filter(|t| !t.is_empty()),
            topicrefs: root
                .children_with(&Tag::TopicRef)
                .map(TopicRef::from_element)
                .collect(),
        }
    }

    /// Returns the number of references at any depth.
    pub fn reference_count(&self) -> usize {
        fn count(refs: &[TopicRef]) -> usize {
            refs.iter().map(|r| 1 + count(&r.children)).sum()
        }
        count(&self.topicrefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_from_root() {
        let root = Element::new(Tag::Other("map".into()))
            .with_child(Element::new(Tag::Title).with_text("Guide"))
            .with_child(
                Element::new(Tag::TopicRef)
                    .with_attr("href", "intro.dita")
                    .with_attr("chunk", "to-content")
                    .with_child(Element::new(Tag::TopicRef).with_attr("href", "details.dita")),
            )
            .with_child(Element::new(Tag::TopicRef).with_attr("chunk", "by-topic"));

        let map = DitaMap::from_root(&root);
        assert_eq!(map.title.as_deref(), Some("Guide"));
        assert_eq!(map.topicrefs.len(), 2);
        assert_eq!(
            map.topicrefs[0],
            TopicRef::new("intro.dita")
                .to_content()
                .with_child(TopicRef::new("details.dita"))
        );
        assert_eq!(map.topicrefs[1].href, None);
        assert_eq!(map.topicrefs[1].chunk, Chunk::Other("by-topic".into()));
        assert!(!map.topicrefs[1].chunk.merges_children());
        assert_eq!(map.reference_count(), 3);
    }
}
