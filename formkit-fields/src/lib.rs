//! Pluggable field-type registry for formkit.
//!
//! Answers "what field types exist, and how is each rendered, configured,
//! and validated?" The catalog merges a fixed built-in table with
//! externally contributed types and wires each entry's viewer hook into
//! the rendering pipeline as it is built.

mod catalog;
mod definition;
mod error;
pub mod handlers;
mod hooks;
mod registry;
pub mod viewers;

pub use definition::{
    AssetBundle, Capability, CapabilitySet, FieldCategory, FieldTypeDefinition, SetupConfig,
};
pub use error::FieldError;
pub use hooks::{view_hook_name, FormContext, RenderHooks, SubmitHandler, ViewerHook};
pub use registry::{FieldRegistry, FieldTypeProvider};
