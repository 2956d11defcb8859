//! Document model.
//!
//! The markup reader produces a generic [`Element`] tree; [`Topic`] and
//! [`DitaMap`] are typed views over it used by the renderers and the
//! conversion pipeline.

mod document;
mod element;
mod map;

pub use document::*;
pub use element::*;
pub use map::*;
