//! Readers for DITA topics and maps.
//!
//! Only the subset of the markup the renderers understand is interpreted;
//! everything else is kept in the element tree as [`Tag::Other`].
//!
//! [`Tag::Other`]: crate::model::Tag::Other

mod tree;

pub use tree::parse_tree;

use crate::error::Result;
use crate::model::{DitaMap, Topic};
use std::path::Path;

/// File extension of topic documents.
pub const TOPIC_EXTENSION: &str = "dita";

/// File extension of map documents.
pub const MAP_EXTENSION: &str = "ditamap";

/// Parses a topic from an XML string.
pub fn parse_topic_str(xml: &str) -> Result<Topic> {
    let root = parse_tree(xml)?;
    Ok(Topic::from_root(root))
}

/// Parses a map from an XML string.
pub fn parse_map_str(xml: &str) -> Result<DitaMap> {
    let root = parse_tree(xml)?;
    Ok(DitaMap::from_root(&root))
}

/// Reads and parses a topic file.
///
/// Errors carry the path of the offending file.
pub fn read_topic(path: impl AsRef<Path>) -> Result<Topic> {
    let path = path.as_ref();
    read_source(path)
        .and_then(|xml| parse_topic_str(&xml))
        .map_err(|e| e.in_file(path))
}

/// Reads and parses a map file.
pub fn read_map(path: impl AsRef<Path>) -> Result<DitaMap> {
    let path = path.as_ref();
    read_source(path)
        .and_then(|xml| parse_map_str(&xml))
        .map_err(|e| e.in_file(path))
}

fn read_source(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
