//! Rendering options for Markdown output.

use crate::model::UNTITLED;

/// Heading level of topic titles and of top-level body titles.
pub const DEFAULT_BASE_LEVEL: u8 = 2;

/// Options for Markdown rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Heading level for body titles outside any section.
    /// Each enclosing `<section>` adds one level.
    /// Default: 2
    pub base_level: u8,

    /// Whether to emit YAML frontmatter (standalone and parent topics).
    /// When false, the topic title is rendered as a heading at `base_level`.
    pub include_frontmatter: bool,

    /// Title used for topics without a `<title>`.
    /// Default: "Untitled"
    pub untitled_title: String,

    /// Caps the number of `#` in emitted headings.
    /// Default: no cap
    pub max_heading_level: Option<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_level: DEFAULT_BASE_LEVEL,
            include_frontmatter: true,
            untitled_title: UNTITLED.to_string(),
            max_heading_level: None,
        }
    }
}

impl RenderOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a standalone or parent topic (frontmatter, base level 2).
    pub fn standalone() -> Self {
        Self::default()
    }

    /// Options for a child topic merged into a parent: no frontmatter, the
    /// title becomes a heading at the same base level as the parent.
    pub fn child() -> Self {
        Self::default().without_frontmatter()
    }

    /// Sets the base heading level (minimum 1).
    pub fn with_base_level(mut self, level: u8) -> Self {
        self.base_level = level.max(1);
        self
    }

    /// Disables frontmatter output.
    pub fn without_frontmatter(mut self) -> Self {
        self.include_frontmatter = false;
        self
    }

    /// Sets the fallback title.
    pub fn with_untitled_title(mut self, title: impl Into<String>) -> Self {
        self.untitled_title = title.into();
        self
    }

    /// Caps heading depth (clamped to 1-6).
    pub fn with_max_heading_level(mut self, level: u8) -> Self {
        self.max_heading_level = Some(level.clamp(1, 6));
        self
    }

    /// Returns the number of `#` to emit for a heading at `depth`.
    pub fn heading_level(&self, depth: usize) -> usize {
        match self.max_heading_level {
            Some(max) => depth.min(max as usize),
            None => depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let standalone = RenderOptions::standalone();
        assert!(standalone.include_frontmatter);
        assert_eq!(standalone.base_level, 2);

        let child = RenderOptions::child();
        assert!(!child.include_frontmatter);
        assert_eq!(child.base_level, standalone.base_level);
    }

    #[test]
    fn test_max_heading_level_clamped() {
        assert_eq!(RenderOptions::new().with_max_heading_level(0).max_heading_level, Some(1));
        assert_eq!(RenderOptions::new().with_max_heading_level(9).max_heading_level, Some(6));
        assert_eq!(RenderOptions::new().heading_level(9), 9);
        assert_eq!(RenderOptions::new().with_max_heading_level(4).heading_level(9), 4);
    }

    #[test]
    fn test_base_level_minimum() {
        assert_eq!(RenderOptions::new().with_base_level(0).base_level, 1);
    }
}
