//! Error types for the field-type registry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("unknown field type: {0}")]
    UnknownType(String),

    #[error("field type '{0}' has no setup and is not renderable in the editor")]
    NotRenderable(String),

    #[error("field '{field}' failed validation: {message}")]
    Validation { field: String, message: String },

    #[error("field '{field}' is missing required setting '{setting}'")]
    MissingSetting { field: String, setting: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
