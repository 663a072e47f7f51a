// Root library of the `gerank` crate.
// Parses a GE course catalog page, joins it against an external grade feed,
// and produces GPA-ranked course recommendations.
pub mod analytics;
pub mod catalog;
pub mod errors;
pub mod gpa;
pub mod models;
pub mod recommend;
pub mod server;

/// Runs the HTTP server (re-export for convenient use from `main`)
pub use server::run_server;
