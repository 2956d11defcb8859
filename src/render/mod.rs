//! Markdown rendering for topics.

mod frontmatter;
mod markdown;
mod options;
mod text;

pub use frontmatter::render_frontmatter;
pub use markdown::{
    render_inline, render_inline_content, render_list, HeadingContext, MarkdownRenderer,
};
pub use options::{RenderOptions, DEFAULT_BASE_LEVEL};
pub use text::{normalize_opt, normalize_text};

use crate::error::Result;
use crate::model::Topic;
use std::path::Path;

/// Renders a topic to Markdown.
pub fn render_markdown(topic: &Topic, options: &RenderOptions) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(topic)
}

/// Renders a topic to Markdown and writes it to a file, creating parent
/// directories as needed.
pub fn render_to_file(topic: &Topic, path: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let content = render_markdown(topic, options);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
