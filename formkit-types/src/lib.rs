//! Shared types for the formkit core.
//!
//! Identifier newtypes for fields and forms, plus the form configuration
//! model that both the field-type registry and the upload manager consume.

mod form;
mod ids;

pub use form::{FieldConfig, FormConfig, MailerConfig};
pub use ids::{FieldId, FormId, IdError};
