//! Render-time hook bus.
//!
//! Viewer hooks transform a field's rendered output for display (option
//! label substitution, file previews, star glyphs). The registry wires one
//! hook per field type onto this bus as a side effect of catalog
//! construction; the rendering pipeline then applies them by type key.

use formkit_types::{FieldConfig, FormConfig};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Context handed to hooks at render and submit time: the form definition
/// plus the submitted entry values keyed by field ID.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub form: FormConfig,
    pub entry: Map<String, Value>,
}

impl FormContext {
    pub fn new(form: FormConfig) -> Self {
        Self {
            form,
            entry: Map::new(),
        }
    }

    /// Returns the submitted value for a field, if any.
    pub fn entry_value(&self, field_id: &str) -> Option<&Value> {
        self.entry.get(field_id)
    }
}

/// Transforms a field's rendered output at display time.
pub type ViewerHook = Arc<dyn Fn(String, &FieldConfig, &FormContext) -> String + Send + Sync>;

/// Computes or validates a field's value at submission-processing time.
pub type SubmitHandler =
    Arc<dyn Fn(&FieldConfig, &FormContext) -> Result<Value, crate::FieldError> + Send + Sync>;

/// Hook name for the per-type rendering extension point.
#[must_use]
pub fn view_hook_name(type_key: &str) -> String {
    format!("view_field_{type_key}")
}

/// Registry of render-time viewer hooks, keyed by hook name.
///
/// Keying by type makes registration naturally idempotent: rebuilding the
/// catalog re-registers the same slot instead of stacking duplicates.
#[derive(Default)]
pub struct RenderHooks {
    viewers: HashMap<String, ViewerHook>,
}

impl RenderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the viewer hook for a field type.
    pub fn register_viewer(&mut self, type_key: &str, hook: ViewerHook) {
        let name = view_hook_name(type_key);
        debug!(hook = %name, "registering viewer hook");
        self.viewers.insert(name, hook);
    }

    pub fn has_viewer(&self, type_key: &str) -> bool {
        self.viewers.contains_key(&view_hook_name(type_key))
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    /// Applies the viewer hook for `type_key` to `output`.
    /// Pass-through when no hook is registered for the type.
    pub fn apply(
        &self,
        type_key: &str,
        output: String,
        field: &FieldConfig,
        context: &FormContext,
    ) -> String {
        match self.viewers.get(&view_hook_name(type_key)) {
            Some(hook) => hook(output, field, context),
            None => output,
        }
    }
}
