//! Central field-type registry.
//!
//! Merges the fixed built-in catalog with externally registered types and,
//! as a side effect of every catalog build, wires each entry's viewer hook
//! onto the render-hook bus. Lookup by unknown key is always `None`,
//! never an error: callers skip unknown types.

use crate::catalog;
use crate::definition::{AssetBundle, FieldTypeDefinition};
use crate::error::FieldError;
use crate::hooks::{FormContext, RenderHooks};
use formkit_types::{FieldConfig, FormConfig};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Extension point for contributing field types.
///
/// Providers run once per catalog build, after the built-ins are in place,
/// so a provider registering an existing key overrides it (last write
/// wins). Contributed definitions are not validated here; an entry without
/// setup simply renders as "not available in the editor".
pub trait FieldTypeProvider: Send + Sync {
    fn register(&self, types: &mut BTreeMap<String, FieldTypeDefinition>);
}

impl<F> FieldTypeProvider for F
where
    F: Fn(&mut BTreeMap<String, FieldTypeDefinition>) + Send + Sync,
{
    fn register(&self, types: &mut BTreeMap<String, FieldTypeDefinition>) {
        self(types)
    }
}

/// Process-wide catalog of field types, one instance per request context.
pub struct FieldRegistry {
    providers: Vec<Arc<dyn FieldTypeProvider>>,
    hooks: Mutex<RenderHooks>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            hooks: Mutex::new(RenderHooks::new()),
        }
    }

    pub fn with_providers(providers: Vec<Arc<dyn FieldTypeProvider>>) -> Self {
        Self {
            providers,
            hooks: Mutex::new(RenderHooks::new()),
        }
    }

    /// Adds an extension provider. Takes effect on the next catalog build.
    pub fn register_provider(&mut self, provider: Arc<dyn FieldTypeProvider>) {
        self.providers.push(provider);
    }

    // ================================================================
    // Catalog
    // ================================================================

    /// Returns the merged catalog: built-ins plus provider contributions,
    /// provider entries overriding built-ins key by key.
    ///
    /// Side effect: wires every entry's viewer hook onto the render bus.
    /// The bus keys hooks by type, so calling this repeatedly within one
    /// registry never double-registers.
    pub fn get_all_types(&self) -> BTreeMap<String, FieldTypeDefinition> {
        let mut types = catalog::builtin_types();
        for provider in &self.providers {
            provider.register(&mut types);
        }

        let mut hooks = self.hooks.lock().expect("render hook bus poisoned");
        for (key, def) in &types {
            if let Some(viewer) = &def.viewer_hook {
                hooks.register_viewer(key, Arc::clone(viewer));
            }
            if def.setup.is_none() {
                warn!(type_key = %key, "field type has no setup; hidden from editor");
            }
        }
        debug!(count = types.len(), "field-type catalog built");

        types
    }

    /// Looks up one type in the merged catalog by key existence.
    /// Unknown keys return `None`; callers treat absence as "skip".
    pub fn get_definition(&self, type_key: &str) -> Option<FieldTypeDefinition> {
        let mut types = self.get_all_types();
        types.remove(type_key)
    }

    /// Returns the fixed built-in table only, bypassing providers.
    /// Used for bootstrapping and introspection where third-party types
    /// must not leak in. No hook wiring happens here.
    pub fn get_builtin_types(&self) -> BTreeMap<String, FieldTypeDefinition> {
        catalog::builtin_types()
    }

    // ================================================================
    // Instance configuration
    // ================================================================

    /// Merges the type's default configuration into `config` for keys the
    /// instance does not set. Unknown types and types without setup leave
    /// the config untouched.
    pub fn apply_defaults(&self, type_key: &str, config: &mut Map<String, Value>) {
        let Some(def) = self.get_definition(type_key) else {
            return;
        };
        let Some(setup) = def.setup else {
            return;
        };
        for (key, value) in setup.default_config {
            config.entry(key).or_insert(value);
        }
    }

    // ================================================================
    // Hook dispatch
    // ================================================================

    /// Applies the wired viewer hook for a type to rendered output.
    /// Pass-through for types without one.
    pub fn apply_viewer(
        &self,
        type_key: &str,
        output: String,
        field: &FieldConfig,
        context: &FormContext,
    ) -> String {
        self.hooks
            .lock()
            .expect("render hook bus poisoned")
            .apply(type_key, output, field, context)
    }

    /// Runs the submit handler for a field's type, if the type declares
    /// one. `Ok(None)` means "no special submit processing".
    pub fn run_submit_handler(
        &self,
        field: &FieldConfig,
        context: &FormContext,
    ) -> Result<Option<Value>, FieldError> {
        match self.get_definition(&field.type_key) {
            Some(def) => match def.submit_handler {
                Some(handler) => handler(field, context).map(Some),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    // ================================================================
    // Assets
    // ================================================================

    /// Collects the script and style dependencies for the field types a
    /// form uses, deduplicated, in field order.
    pub fn assets_for(&self, form: &FormConfig) -> AssetBundle {
        let types = self.get_all_types();
        let mut bundle = AssetBundle::default();
        let mut seen_types = std::collections::HashSet::new();

        for field in &form.fields {
            if !seen_types.insert(field.type_key.clone()) {
                continue;
            }
            let Some(def) = types.get(&field.type_key) else {
                continue;
            };
            for script in &def.assets.scripts {
                if !bundle.scripts.contains(script) {
                    bundle.scripts.push(script.clone());
                }
            }
            for style in &def.assets.styles {
                if !bundle.styles.contains(style) {
                    bundle.styles.push(style.clone());
                }
            }
        }

        bundle
    }

    /// Number of viewer hooks currently wired. Introspection for tests
    /// and diagnostics.
    pub fn wired_viewer_count(&self) -> usize {
        self.hooks.lock().expect("render hook bus poisoned").len()
    }
}
