//! Generic element tree produced by the markup reader.

use serde::Serialize;

/// Element kinds understood by the converter.
///
/// Anything else is kept as [`Tag::Other`] so it can still be flattened to
/// text by the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Tag {
    /// `<title>`
    Title,
    /// `<body>` or `<conbody>`
    Body,
    /// `<prolog>`
    Prolog,
    /// `<data name=".." value=".."/>`
    Data,
    /// `<section>`
    Section,
    /// `<p>`
    P,
    /// `<ul>`
    Ul,
    /// `<ol>`
    Ol,
    /// `<li>`
    Li,
    /// `<b>`
    B,
    /// `<i>`
    I,
    /// `<code>`
    Code,
    /// `<topicref>`
    TopicRef,
    /// Any other element, by local name.
    Other(String),
}

impl Tag {
    /// Maps a local element name to its tag.
    pub fn from_name(name: &str) -> Self {
        match name {
            "title" => Tag::Title,
            "body" | "conbody" => Tag::Body,
            "prolog" => Tag::Prolog,
            "data" => Tag::Data,
            "section" => Tag::Section,
            "p" => Tag::P,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "b" => Tag::B,
            "i" => Tag::I,
            "code" => Tag::Code,
            "topicref" => Tag::TopicRef,
            other => Tag::Other(other.to_string()),
        }
    }

    /// Returns the canonical element name.
    pub fn name(&self) -> &str {
        match self {
            Tag::Title => "title",
            Tag::Body => "body",
            Tag::Prolog => "prolog",
            Tag::Data => "data",
            Tag::Section => "section",
            Tag::P => "p",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::B => "b",
            Tag::I => "i",
            Tag::Code => "code",
            Tag::TopicRef => "topicref",
            Tag::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An element with its text, tail text and children.
///
/// `text` is the character data before the first child; `tail` is the
/// character data after this element's end tag, which belongs to the
/// parent's content stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Element kind
    pub tag: Tag,
    /// Attributes in document order (local names, unescaped values)
    pub attributes: Vec<(String, String)>,
    /// Leading text content
    pub text: Option<String>,
    /// Text following the end tag
    pub tail: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    /// Sets the leading text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the tail text.
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first direct child with the given tag.
    pub fn find_child(&self, tag: &Tag) -> Option<&Element> {
        self.children.iter().find(|c| &c.tag == tag)
    }

    /// Iterates over direct children with the given tag.
    pub fn children_with<'a>(&'a self, tag: &'a Tag) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| &c.tag == tag)
    }

    /// Iterates over all descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Returns all text inside this element, ignoring markup.
    ///
    /// Includes the tails of descendants but not this element's own tail.
    pub fn flat_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(ref text) = self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
            if let Some(ref tail) = child.tail {
                out.push_str(tail);
            }
        }
    }
}

/// Depth-first iterator over an element's descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
