use thiserror::Error;

/// Failure taxonomy for the catalog pipeline. Every variant is a
/// deterministic function of its input; nothing here is retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input with the wrong shape: a truncated heading, a course span with
    /// no component suffix, a feed document that is not valid JSON.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A course label without the " - " code/title separator. Kept apart
    /// from `InvalidInput` so join failures name the offending label.
    #[error("malformed course label {0:?}: missing \" - \" separator")]
    MalformedLabel(String),

    /// Well-formed but semantically invalid request.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Valid request, no data behind it.
    #[error("no match: {0}")]
    NoMatch(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
