//! Markdown renderer implementation.

use super::frontmatter::render_frontmatter;
use super::text::{normalize_opt, normalize_text};
use super::RenderOptions;
use crate::model::{Element, Tag, Topic};

/// Indentation added per list nesting level.
const LIST_INDENT: &str = "  ";

/// Unordered list marker.
const BULLET: &str = "-";

/// Heading depth bookkeeping for block rendering.
///
/// The emitted depth is `base_level + section_depth`. Only `<section>`
/// increases `section_depth`; merged child topics reuse the parent's base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingContext {
    pub base_level: usize,
    pub section_depth: usize,
}

impl HeadingContext {
    /// Context for a top-level body child.
    pub fn new(base_level: usize) -> Self {
        Self {
            base_level,
            section_depth: 0,
        }
    }

    /// Context for the children of a `<section>`.
    pub fn nested(self) -> Self {
        Self {
            section_depth: self.section_depth + 1,
            ..self
        }
    }

    /// Heading depth at this context.
    pub fn depth(&self) -> usize {
        self.base_level + self.section_depth
    }
}

/// Markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Creates a new renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Returns the renderer options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders a topic to a Markdown string.
    ///
    /// With frontmatter enabled the output starts with the YAML block;
    /// otherwise the title is emitted as a heading at the base level.
    pub fn render(&self, topic: &Topic) -> String {
        let mut output = String::new();
        let title = topic.title_or(&self.options.untitled_title);

        if self.options.include_frontmatter {
            output.push_str(&render_frontmatter(title, &topic.metadata));
        } else {
            self.push_heading(self.options.base_level as usize, title, &mut output);
        }

        if let Some(body) = topic.body() {
            self.render_body(body, &mut output);
        }

        output
    }

    /// Renders every block of a body container, each starting at section
    /// depth 0.
    pub fn render_body(&self, body: &Element, output: &mut String) {
        let context = HeadingContext::new(self.options.base_level as usize);
        for child in &body.children {
            self.render_block(child, context, output);
        }
    }

    /// Renders one block element.
    ///
    /// Elements other than sections, titles, paragraphs and lists produce
    /// no output.
    pub fn render_block(&self, element: &Element, context: HeadingContext, output: &mut String) {
        match &element.tag {
            Tag::Section => {
                let nested = context.nested();
                for child in &element.children {
                    self.render_block(child, nested, output);
                }
            }
            Tag::Title => {
                let text = normalize_opt(element.text.as_deref());
                self.push_heading(context.depth(), &text, output);
            }
            Tag::P => {
                output.push_str(&render_inline_content(element));
                output.push_str("\n\n");
            }
            Tag::Ul | Tag::Ol => {
                output.push_str(&render_list(element, 0, element.tag == Tag::Ol));
                output.push('\n');
            }
            _ => {}
        }
    }

    fn push_heading(&self, depth: usize, text: &str, output: &mut String) {
        output.push_str(&"#".repeat(self.options.heading_level(depth)));
        output.push(' ');
        output.push_str(text);
        output.push_str("\n\n");
    }
}

/// Renders a single inline element with its markup, normalized.
///
/// `<b>`, `<i>` and `<code>` wrap their flattened text; any other element
/// becomes its flattened text.
pub fn render_inline(element: &Element) -> String {
    let text = normalize_text(&element.flat_text());
    normalize_text(&wrap_inline(&element.tag, &text))
}

/// Renders the mixed content of a paragraph-level element as one line.
///
/// Own text, then each child's markup followed by its tail, in document
/// order. Whitespace is normalized over the assembled line.
pub fn render_inline_content(element: &Element) -> String {
    let mut line = String::new();

    if let Some(ref text) = element.text {
        line.push_str(text);
    }

    for child in &element.children {
        line.push_str(&wrap_inline(&child.tag, &child.flat_text()));
        if let Some(ref tail) = child.tail {
            line.push_str(tail);
        }
    }

    normalize_text(&line)
}

fn wrap_inline(tag: &Tag, content: &str) -> String {
    match tag {
        Tag::B => format!("**{}**", content),
        Tag::I => format!("*{}*", content),
        Tag::Code => format!("`{}`", content),
        _ => content.to_string(),
    }
}

/// Renders a `<ul>`/`<ol>` with nested lists.
///
/// Items are numbered from 1 within each list. Paragraph text of an item
/// is flushed as one line before each nested list and at the end of the
/// item; nothing is emitted for an item that has no text of its own. The
/// result ends with exactly one newline.
pub fn render_list(list: &Element, level: usize, ordered: bool) -> String {
    let mut output = String::new();
    let indent = LIST_INDENT.repeat(level);

    for (index, item) in list.children_with(&Tag::Li).enumerate() {
        let marker = if ordered {
            format!("{}.", index + 1)
        } else {
            BULLET.to_string()
        };
        let mut line = String::new();

        for child in &item.children {
            match &child.tag {
                Tag::P => {
                    let text = normalize_text(&child.flat_text());
                    if !text.is_empty() {
                        if !line.is_empty() {
                            line.push(' ');
                        }
                        line.push_str(&text);
                    }
                }
                Tag::Ul | Tag::Ol => {
                    flush_item(&indent, &marker, &mut line, &mut output);
                    output.push_str(&render_list(child, level + 1, child.tag == Tag::Ol));
                }
                _ => {}
            }
        }

        flush_item(&indent, &marker, &mut line, &mut output);
    }

    let trimmed = output.trim_end().len();
    output.truncate(trimmed);
    output.push('\n');
    output
}

fn flush_item(indent: &str, marker: &str, line: &mut String, output: &mut String) {
    if line.is_empty() {
        return;
    }
    output.push_str(&format!("{}{} {}\n", indent, marker, line));
    line.clear();
}
