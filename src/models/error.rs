use thiserror::Error;

/// Errors raised while building or reading model documents
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("Field {0} cannot be reassigned")]
    ImmutableField(String),

    #[error("Cursor read error: {0}")]
    CursorError(#[from] sqlx::Error),
}
