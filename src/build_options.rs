//! Site build configuration.

use crate::render::RenderOptions;
use std::path::{Path, PathBuf};

/// Suffix appended to the output root's name for the staging directory
/// used by [`OutputStrategy::AtomicSwap`].
pub const STAGING_SUFFIX: &str = ".undita-staging";

/// Options for converting a source tree into an output tree.
///
/// Built once and passed by reference to every stage; nothing mutates it
/// during a build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Root of the DITA content tree.
    pub source_root: PathBuf,

    /// Root of the generated Markdown tree.
    pub output_root: PathBuf,

    /// How the output root is prepared and populated.
    pub output_strategy: OutputStrategy,

    /// Rendering options for standalone and parent topics.
    /// Merged children always use [`RenderOptions::without_frontmatter`]
    /// of these options.
    pub render: RenderOptions,
}

impl BuildOptions {
    /// Creates options for converting `source_root` into `output_root`.
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            output_strategy: OutputStrategy::default(),
            render: RenderOptions::standalone(),
        }
    }

    /// Sets the output strategy.
    pub fn with_output_strategy(mut self, strategy: OutputStrategy) -> Self {
        self.output_strategy = strategy;
        self
    }

    /// Builds into a staging directory and swaps it in on success.
    pub fn atomic(mut self) -> Self {
        self.output_strategy = OutputStrategy::AtomicSwap;
        self
    }

    /// Sets the rendering options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Returns a copy of these options writing to `output_root` instead.
    pub fn redirected(&self, output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..self.clone()
        }
    }

    /// Rendering options for topics merged into a parent.
    pub fn child_render(&self) -> RenderOptions {
        self.render.clone().without_frontmatter()
    }

    /// Maps a source folder to its mirror under the output root.
    ///
    /// Returns `None` if `dir` is not inside the source root.
    pub fn output_dir_for(&self, dir: &Path) -> Option<PathBuf> {
        dir.strip_prefix(&self.source_root)
            .ok()
            .map(|relative| self.output_root.join(relative))
    }

    /// Staging directory used by [`OutputStrategy::AtomicSwap`].
    pub fn staging_root(&self) -> PathBuf {
        let mut name = self
            .output_root
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "output".into());
        name.push(STAGING_SUFFIX);
        self.output_root.with_file_name(name)
    }
}

/// How the output root is prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStrategy {
    /// Remove everything inside the output root, then convert into it.
    /// A failed run leaves whatever was written before the failure.
    #[default]
    WipeInPlace,
    /// Convert into a sibling staging directory and replace the output
    /// root only when the whole run succeeds.
    AtomicSwap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::new("source", "docs");
        assert_eq!(options.output_strategy, OutputStrategy::WipeInPlace);
        assert!(options.render.include_frontmatter);
        assert!(!options.child_render().include_frontmatter);
        assert_eq!(options.child_render().base_level, options.render.base_level);
    }

    #[test]
    fn test_output_dir_mirrors_source() {
        let options = BuildOptions::new("/src", "/out");
        assert_eq!(
            options.output_dir_for(Path::new("/src/guides/admin")),
            Some(PathBuf::from("/out/guides/admin"))
        );
        assert_eq!(options.output_dir_for(Path::new("/src")), Some(PathBuf::from("/out")));
        assert_eq!(options.output_dir_for(Path::new("/elsewhere")), None);
    }

    #[test]
    fn test_staging_root_is_sibling() {
        let options = BuildOptions::new("/src", "/site/docs").atomic();
        assert_eq!(options.output_strategy, OutputStrategy::AtomicSwap);
        assert_eq!(options.staging_root(), PathBuf::from("/site/docs.undita-staging"));
    }

    #[test]
    fn test_redirected_keeps_settings() {
        let options = BuildOptions::new("/src", "/out").atomic();
        let staged = options.redirected("/tmp/stage");
        assert_eq!(staged.output_root, PathBuf::from("/tmp/stage"));
        assert_eq!(staged.source_root, options.source_root);
        assert_eq!(staged.output_strategy, OutputStrategy::AtomicSwap);
    }
}
