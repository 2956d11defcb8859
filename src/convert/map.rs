//! Map-driven assembly.
//!
//! Each top-level `<topicref>` of a map becomes one Markdown file named
//! after the referenced topic. With `chunk="to-content"`, the reference's
//! direct children are rendered without frontmatter and appended to the
//! parent's output. Deeper references are not merged.

use super::topic::convert_topic;
use crate::build_options::BuildOptions;
use crate::dita;
use crate::error::{Error, Result};
use crate::model::TopicRef;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Assembles the topics of one map into output files.
#[derive(Debug, Clone, Copy)]
pub struct MapAssembler<'a> {
    options: &'a BuildOptions,
}

impl<'a> MapAssembler<'a> {
    /// Creates an assembler writing under `options.output_root`.
    pub fn new(options: &'a BuildOptions) -> Self {
        Self { options }
    }

    /// Parses `map_path` and writes one file per top-level reference into
    /// the output folder mirroring the map's folder.
    ///
    /// Returns the written paths in reference order.
    pub fn assemble(&self, map_path: &Path) -> Result<Vec<PathBuf>> {
        let map = dita::read_map(map_path)?;
        let map_dir = map_path.parent().unwrap_or_else(|| Path::new("."));

        let output_dir = self.options.output_dir_for(map_dir).ok_or_else(|| {
            Error::Config(format!(
                "map {} is outside the source root {}",
                map_path.display(),
                self.options.source_root.display()
            ))
        })?;
        fs::create_dir_all(&output_dir).map_err(|e| Error::from(e).in_file(&output_dir))?;

        let mut written = Vec::with_capacity(map.topicrefs.len());

        for topicref in &map.topicrefs {
            let Some(href) = topicref.href.as_deref() else {
                debug!("Skipping topicref without href in {}", map_path.display());
                continue;
            };

            let markdown = self.render_topicref(map_dir, topicref)?;
            let output_file = output_dir.join(output_file_name(href)?);
            fs::write(&output_file, markdown).map_err(|e| Error::from(e).in_file(&output_file))?;

            info!("[MAP] Generated {}", self.display_output(&output_file));
            written.push(output_file);
        }

        Ok(written)
    }

    /// Renders a top-level reference: the parent topic with frontmatter,
    /// followed by its merged children when it carries
    /// `chunk="to-content"`.
    pub fn render_topicref(&self, map_dir: &Path, topicref: &TopicRef) -> Result<String> {
        let href = topicref
            .href
            .as_deref()
            .ok_or_else(|| Error::InvalidData("topicref has no href".into()))?;
        let parent_path = resolve_reference(map_dir, href)?;
        let mut markdown = convert_topic(&parent_path, &self.options.render)?;

        if !topicref.chunk.merges_children() {
            if !topicref.children.is_empty() {
                debug!(
                    "{} has nested references but no chunk=\"to-content\"; not merged",
                    href
                );
            }
            return Ok(markdown);
        }

        let child_options = self.options.child_render();
        for child in &topicref.children {
            let Some(child_href) = child.href.as_deref() else {
                continue;
            };

            if !child.children.is_empty() {
                warn!(
                    "References nested below {} are not merged (only one level is supported)",
                    child_href
                );
            }

            let child_path = resolve_reference(map_dir, child_href)?;
            markdown.push_str(&convert_topic(&child_path, &child_options)?);
        }

        Ok(markdown)
    }

    fn display_output(&self, path: &Path) -> String {
        path.strip_prefix(&self.options.output_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Assembles one map with the given options.
pub fn assemble_map(map_path: impl AsRef<Path>, options: &BuildOptions) -> Result<Vec<PathBuf>> {
    MapAssembler::new(options).assemble(map_path.as_ref())
}

/// Resolves `href` against the map's folder; the target must exist.
fn resolve_reference(map_dir: &Path, href: &str) -> Result<PathBuf> {
    let path = map_dir.join(href);
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::MissingReference(path))
    }
}

/// Output file name for a reference: the href's file name with an `.md`
/// extension.
fn output_file_name(href: &str) -> Result<PathBuf> {
    Path::new(href)
        .with_extension("md")
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| Error::InvalidData(format!("topicref href {:?} has no file name", href)))
}
