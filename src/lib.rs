//! # undita
//!
//! Converts DITA content trees into Markdown documentation trees.
//!
//! ## Conversion model
//!
//! - **Topics** (`.dita`) render to Markdown with a YAML frontmatter block
//!   built from the title and `<prolog>` metadata.
//! - **Maps** (`.ditamap`) drive their folder: each top-level reference
//!   becomes one file, and `chunk="to-content"` merges the reference's
//!   direct children into it.
//! - **Markdown** (`.md`) files in map-less folders are copied unchanged.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undita::{build_site, BuildOptions};
//!
//! fn main() -> undita::Result<()> {
//!     let options = BuildOptions::new("source", "docs");
//!     let report = build_site(&options)?;
//!
//!     println!("{} file(s) written", report.output_count());
//!     Ok(())
//! }
//! ```

pub mod build_options;
pub mod convert;
pub mod detect;
pub mod dita;
pub mod error;
pub mod model;
pub mod render;

// Re-exports
pub use build_options::{BuildOptions, OutputStrategy};
pub use convert::{assemble_map, build_site, BuildReport, MapAssembler, SiteBuilder};
pub use detect::{detect_file_kind, FileKind};
pub use error::{Error, Result};
pub use model::{DitaMap, Metadata, Topic};
pub use render::RenderOptions;

use std::path::Path;

/// Parses a topic file.
///
/// # Example
///
/// ```no_run
/// use undita::parse_file;
///
/// let topic = parse_file("source/guide/intro.dita")?;
/// println!("Blocks: {}", topic.block_count());
/// # Ok::<(), undita::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Topic> {
    dita::read_topic(path)
}

/// Converts a topic file to standalone Markdown.
///
/// # Example
///
/// ```no_run
/// use undita::to_markdown;
///
/// let markdown = to_markdown("source/guide/intro.dita")?;
/// std::fs::write("intro.md", markdown)?;
/// # Ok::<(), undita::Error>(())
/// ```
pub fn to_markdown(path: impl AsRef<Path>) -> Result<String> {
    to_markdown_with_options(path, &RenderOptions::standalone())
}

/// Converts a topic file to Markdown with custom options.
///
/// ```no_run
/// use undita::{to_markdown_with_options, RenderOptions};
///
/// let options = RenderOptions::new().without_frontmatter().with_base_level(1);
/// let markdown = to_markdown_with_options("source/guide/intro.dita", &options)?;
/// # Ok::<(), undita::Error>(())
/// ```
pub fn to_markdown_with_options(path: impl AsRef<Path>, options: &RenderOptions) -> Result<String> {
    convert::convert_topic(path, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_to_markdown_matches_standalone_render() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("intro.dita");
        std::fs::write(
            &path,
            "<concept><title>Intro</title><conbody><p>Hi <i>there</i>.</p></conbody></concept>",
        )
        .unwrap();

        let markdown = to_markdown(&path).unwrap();
        assert_eq!(markdown, "---\ntitle: Intro\n---\n\nHi *there*.\n\n");

        let topic = parse_file(&path).unwrap();
        assert_eq!(markdown, render::render_markdown(&topic, &RenderOptions::standalone()));
    }

    #[test]
    fn test_to_markdown_with_options() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("intro.dita");
        std::fs::write(
            &path,
            "<concept><title>Intro</title><conbody><section><title>More</title></section></conbody></concept>",
        )
        .unwrap();

        let options = RenderOptions::new().without_frontmatter().with_base_level(1);
        assert_eq!(
            to_markdown_with_options(&path, &options).unwrap(),
            "# Intro\n\n## More\n\n"
        );
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("does/not/exist.dita").unwrap_err();
        assert!(matches!(err.root_cause(), Error::Io(_)));
        assert!(err.to_string().contains("exist.dita"));
    }
}
