// Incremental recipe search: text matching, facet extraction, and session state

pub mod engine;
pub mod extract;
pub mod facet;
pub mod matcher;
pub mod session;

// Re-exports
pub use engine::SearchEngine;
pub use extract::extract_facet;
pub use facet::{Facet, Tag};
pub use matcher::{matches_query, matches_tag};
pub use session::{ActiveTags, FacetOptions, SessionState};
