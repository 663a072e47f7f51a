// Enrichment and ranking over the parsed catalog.
pub mod engine;
pub mod filters;
pub mod ranker;

pub use engine::recommend;
pub use filters::FilterPolicy;
pub use ranker::{categorize, rank_all, sort_catalog_courses};
