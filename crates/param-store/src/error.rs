//! Error types for param-store

/// Result type for param-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building schemas and stores
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parameter name must not be empty")]
    EmptyName,

    #[error("Parameter `{name}` is declared more than once")]
    DuplicateParameter { name: String },

    #[error("Unknown parameter `{name}` in raw input")]
    UnknownParameter { name: String },

    #[error("Raw input must be an object, found {found}")]
    InvalidInput { found: String },

    #[error("Failed to parse schema: {message}")]
    SchemaParse { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
