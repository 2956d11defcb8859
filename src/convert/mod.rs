//! File and tree conversion.
//!
//! - [`topic`]: one topic file to Markdown, and verbatim Markdown copies
//! - [`map`]: one map folder to its assembled output files
//! - [`site`]: a whole source tree, choosing a strategy per folder

pub mod map;
pub mod site;
pub mod topic;

pub use map::{assemble_map, MapAssembler};
pub use site::{build_site, BuildReport, SiteBuilder};
pub use topic::{convert_topic, convert_topic_to_file, copy_markdown};
