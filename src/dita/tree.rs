//! Event-driven construction of [`Element`] trees.

use crate::error::{Error, Result};
use crate::model::{Element, Tag};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parses an XML string into its root element.
///
/// Comments, processing instructions, the XML declaration and any DOCTYPE
/// are skipped. Character data is kept verbatim (no trimming) and assigned
/// to the `text` of the open element or the `tail` of its last child.
pub fn parse_tree(xml: &str) -> Result<Element> {
    TreeBuilder::new(xml).build()
}

/// Tree builder state machine.
struct TreeBuilder<'a> {
    reader: Reader<&'a [u8]>,
    /// Elements whose end tag has not been read yet
    stack: Vec<Element>,
    root: Option<Element>,
}

impl<'a> TreeBuilder<'a> {
    fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        Self {
            reader,
            stack: Vec::new(),
            root: None,
        }
    }

    fn build(mut self) -> Result<Element> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let element = open_element(&e)?;
                    self.stack.push(element);
                }
                Ok(Event::Empty(e)) => {
                    let element = open_element(&e)?;
                    self.close(element)?;
                }
                Ok(Event::End(e)) => {
                    let element = self.stack.pop().ok_or_else(|| {
                        Error::XmlParse(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ))
                    })?;
                    self.close(element)?;
                }
                Ok(Event::Text(t)) => {
                    let text = t.unescape()?;
                    self.push_text(&text);
                }
                Ok(Event::CData(c)) => {
                    let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                    self.push_text(&text);
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions, DOCTYPE
                Ok(_) => {}
                Err(e) => {
                    return Err(Error::XmlParse(format!(
                        "{} (at byte {})",
                        e,
                        self.reader.error_position()
                    )));
                }
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(Error::XmlParse(format!(
                "unexpected end of document, <{}> is not closed",
                open.tag
            )));
        }

        self.root
            .ok_or_else(|| Error::InvalidData("document has no root element".into()))
    }

    /// Attaches a finished element to its parent, or makes it the root.
    fn close(&mut self, element: Element) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if self.root.is_some() => {
                return Err(Error::XmlParse(format!(
                    "multiple root elements, found <{}> after the root",
                    element.tag
                )));
            }
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        // Whitespace around the root element has no owner
        let Some(current) = self.stack.last_mut() else {
            return;
        };

        let slot = match current.children.last_mut() {
            Some(last) => &mut last.tail,
            None => &mut current.text,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }
}

/// Creates an element from a start tag, without children.
fn open_element(e: &BytesStart) -> Result<Element> {
    let name = std::str::from_utf8(e.local_name().as_ref())
        .map_err(|err| Error::XmlParse(err.to_string()))?
        .to_string();

    let mut element = Element::new(Tag::from_name(&name));

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(|err| Error::XmlParse(err.to_string()))?
            .to_string();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_tail_assignment() {
        let root = parse_tree("<p>Press <b>Save</b> then <i>Close</i>.</p>").unwrap();

        assert_eq!(root.tag, Tag::P);
        assert_eq!(root.text.as_deref(), Some("Press "));
        assert_eq!(root.children[0].text.as_deref(), Some("Save"));
        assert_eq!(root.children[0].tail.as_deref(), Some(" then "));
        assert_eq!(root.children[1].tail.as_deref(), Some("."));
    }

    #[test]
    fn test_skips_prolog_declarations() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE concept PUBLIC "-//OASIS//DTD DITA Concept//EN" "concept.dtd">
<!-- generated -->
<concept id="intro"><title>Intro</title></concept>"#;
        let root = parse_tree(xml).unwrap();

        assert_eq!(root.tag, Tag::Other("concept".into()));
        assert_eq!(root.attr("id"), Some("intro"));
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_namespace_prefix_stripped() {
        let root = parse_tree(r#"<x:map xmlns:x="urn:x"><x:topicref x:href="a.dita"/></x:map>"#)
            .unwrap();
        assert_eq!(root.children[0].tag, Tag::TopicRef);
        assert_eq!(root.children[0].attr("href"), Some("a.dita"));
    }

    #[test]
    fn test_entities_and_cdata() {
        let root = parse_tree("<p>a &lt; b <![CDATA[<raw>]]></p>").unwrap();
        assert_eq!(root.flat_text(), "a < b <raw>");
    }

    #[test]
    fn test_mismatched_end_tag_fails() {
        let result = parse_tree("<p><b>bold</p></b>");
        assert!(matches!(result, Err(Error::XmlParse(_))));
    }

    #[test]
    fn test_unclosed_element_fails() {
        let result = parse_tree("<concept><title>Intro</title>");
        assert!(matches!(result, Err(Error::XmlParse(_))));
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(matches!(parse_tree("   "), Err(Error::InvalidData(_))));
    }
}
