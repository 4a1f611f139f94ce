use thiserror::Error;

/// Errors surfaced by catalog reads and mutations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Pokemon not found")]
    NotFound,
}

/// Reasons a create request is rejected. The display strings are returned to
/// clients verbatim.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required data.")]
    MissingFields,
    #[error("Pokemon id must be a positive integer.")]
    InvalidId,
    #[error("The Pokemon already exists.")]
    AlreadyExists,
    #[error("Pokemon can only have one or two types.")]
    TypeCount,
    #[error("Pokemon's type is invalid.")]
    InvalidType,
    #[error("Invalid request body.")]
    MalformedBody,
}
