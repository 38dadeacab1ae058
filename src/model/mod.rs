//! Document model (Intermediate Representation).
//!
//! The model is what a document source hands to the renderer: an ordered
//! body of paragraphs and tables plus the relationship table that maps
//! resource ids to embedded blobs.

mod document;
mod paragraph;
mod relationship;
mod table;

pub use document::*;
pub use paragraph::*;
pub use relationship::*;
pub use table::*;
