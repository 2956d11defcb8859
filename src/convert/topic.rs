//! Single-topic conversion.

use crate::dita;
use crate::error::{Error, Result};
use crate::render::{self, RenderOptions};
use std::path::Path;

/// Converts one topic file to Markdown.
///
/// With [`RenderOptions::standalone`] the result is frontmatter plus body;
/// with [`RenderOptions::child`] it is a title heading plus body.
pub fn convert_topic(path: impl AsRef<Path>, options: &RenderOptions) -> Result<String> {
    let topic = dita::read_topic(path)?;
    Ok(render::render_markdown(&topic, options))
}

/// Converts one topic file and writes the result to `destination`,
/// creating parent directories as needed.
pub fn convert_topic_to_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<()> {
    let destination = destination.as_ref();
    let topic = dita::read_topic(source)?;
    render::render_to_file(&topic, destination, options).map_err(|e| e.in_file(destination))
}

/// Copies a Markdown file byte-for-byte.
pub fn copy_markdown(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::from(e).in_file(parent))?;
    }
    std::fs::copy(source, destination).map_err(|e| Error::from(e).in_file(source))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOPIC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<concept id="setup">
  <title>Setup</title>
  <prolog><metadata><data name="audience" value="admin"/></metadata></prolog>
  <conbody>
    <p>Install the <b>package</b>.</p>
    <section>
      <title>Verify</title>
      <ol><li><p>Run <code>undita --version</code></p></li></ol>
    </section>
  </conbody>
</concept>"#;

    fn write_topic(dir: &TempDir, name: &str, xml: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, xml).unwrap();
        path
    }

    #[test]
    fn test_standalone_conversion() {
        let dir = TempDir::new().unwrap();
        let path = write_topic(&dir, "setup.dita", TOPIC);

        let markdown = convert_topic(&path, &RenderOptions::standalone()).unwrap();
        assert_eq!(
            markdown,
            "---\ntitle: Setup\naudience: admin\n---\n\n\
             Install the **package**.\n\n\
             ### Verify\n\n\
             1. Run undita --version\n\n"
        );
    }

    #[test]
    fn test_child_conversion() {
        let dir = TempDir::new().unwrap();
        let path = write_topic(&dir, "setup.dita", TOPIC);

        let markdown = convert_topic(&path, &RenderOptions::child()).unwrap();
        assert!(markdown.starts_with("## Setup\n\nInstall the **package**.\n\n### Verify"));
        assert!(!markdown.contains("---"));
    }

    #[test]
    fn test_missing_body_renders_header_only() {
        let dir = TempDir::new().unwrap();
        let path = write_topic(&dir, "empty.dita", "<concept><title>Empty</title></concept>");

        assert_eq!(
            convert_topic(&path, &RenderOptions::standalone()).unwrap(),
            "---\ntitle: Empty\n---\n\n"
        );
    }

    #[test]
    fn test_malformed_topic_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_topic(&dir, "bad.dita", "<concept><title>Bad</title><conbody>");
        let destination = dir.path().join("out/bad.md");

        let err = convert_topic_to_file(&path, &destination, &RenderOptions::standalone()).unwrap_err();
        assert!(matches!(err.root_cause(), Error::XmlParse(_)));
        assert!(!destination.exists());
    }

    #[test]
    fn test_copy_markdown_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("notes.md");
        let content = b"# Notes\r\n\r\n* raw  markdown \xE2\x9C\x93\n";
        std::fs::write(&source, content).unwrap();

        let destination = dir.path().join("out/nested/notes.md");
        copy_markdown(&source, &destination).unwrap();
        assert_eq!(std::fs::read(&destination).unwrap(), content);
    }
}
