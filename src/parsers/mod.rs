//! Pure functions from response fragments to facet values.
//!
//! Nothing in here talks to the network; [crate::Page] fetches, these parse.

pub mod coordinates;
pub mod disambiguation;
pub mod lists;
pub mod props;
pub mod sections;
pub mod text;

pub use coordinates::Coordinates;
pub use sections::{SectionNode, SectionText};
