//! Field-type definitions: the unit stored in the registry catalog.
//!
//! A definition carries display metadata, an opaque renderer reference,
//! an explicit capability set, editor setup (template, preview, defaults),
//! optional viewer/submit hooks, and static asset dependencies.

use crate::hooks::{SubmitHandler, ViewerHook};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Grouping tag for the editor's field picker. UI organization only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Basic,
    Special,
    File,
    Content,
    Select,
    Discontinued,
}

/// Behavior a field type opts into.
///
/// Replaces the ad hoc `options` / `static` / `capture` / `placeholder`
/// flags of older catalogs: a missing flag is the absence of a capability,
/// never a separate "not supported" list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The type has configurable options (dropdowns, checkboxes, ...).
    HasOptions,
    /// Markup is rendered once and not re-evaluated per entry.
    IsStatic,
    /// The field contributes a value to the submitted entry.
    CapturesValue,
    /// The field can appear as a column in entry listings.
    SupportsEntryList,
    /// The field accepts placeholder text.
    HasPlaceholder,
}

/// Set of capabilities granted to a field type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilitySet {
    granted: HashSet<Capability>,
}

impl CapabilitySet {
    /// The baseline for an ordinary input: captures a value, shows up in
    /// entry lists, and accepts a placeholder.
    #[must_use]
    pub fn standard() -> Self {
        let mut granted = HashSet::new();
        granted.insert(Capability::CapturesValue);
        granted.insert(Capability::SupportsEntryList);
        granted.insert(Capability::HasPlaceholder);
        Self { granted }
    }

    /// An empty set, for fully static content types.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, capability: Capability) -> Self {
        self.granted.insert(capability);
        self
    }

    #[must_use]
    pub fn without(mut self, capability: Capability) -> Self {
        self.granted.remove(&capability);
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

/// Configuration-editor hooks for a field type, plus the default
/// configuration merged into instances lacking explicit values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Editor configuration template reference.
    pub template_ref: String,
    /// Editor preview template reference, when the type has one.
    pub preview_ref: Option<String>,
    /// Defaults merged into an instance config for keys it does not set.
    #[serde(default)]
    pub default_config: Map<String, Value>,
    /// Generic editor options this type does not support (e.g. `required`).
    #[serde(default)]
    pub unsupported_options: HashSet<String>,
}

impl SetupConfig {
    pub fn new(template_ref: impl Into<String>) -> Self {
        Self {
            template_ref: template_ref.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn preview(mut self, preview_ref: impl Into<String>) -> Self {
        self.preview_ref = Some(preview_ref.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.default_config.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn unsupported<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unsupported_options
            .extend(options.into_iter().map(Into::into));
        self
    }
}

/// Static assets a field type depends on. Order is load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
}

impl AssetBundle {
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty()
    }
}

/// One entry in the field-type catalog.
#[derive(Clone)]
pub struct FieldTypeDefinition {
    pub label: String,
    pub description: String,
    /// Opaque reference to the markup renderer for this type.
    pub renderer_ref: String,
    pub icon: Option<String>,
    pub category: FieldCategory,
    pub capabilities: CapabilitySet,
    /// Absent setup means the type is not renderable in the editor.
    pub setup: Option<SetupConfig>,
    /// Invoked at submission-processing time, when present.
    pub submit_handler: Option<SubmitHandler>,
    /// Wired onto the render-hook bus once per catalog build, when present.
    pub viewer_hook: Option<ViewerHook>,
    pub assets: AssetBundle,
}

impl FieldTypeDefinition {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        renderer_ref: impl Into<String>,
        category: FieldCategory,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            renderer_ref: renderer_ref.into(),
            icon: None,
            category,
            capabilities: CapabilitySet::standard(),
            setup: None,
            submit_handler: None,
            viewer_hook: None,
            assets: AssetBundle::default(),
        }
    }

    #[must_use]
    pub fn setup(mut self, setup: SetupConfig) -> Self {
        self.setup = Some(setup);
        self
    }

    #[must_use]
    pub fn capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn viewer(mut self, hook: ViewerHook) -> Self {
        self.viewer_hook = Some(hook);
        self
    }

    #[must_use]
    pub fn submit_handler(mut self, handler: SubmitHandler) -> Self {
        self.submit_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn scripts<I, S>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets.scripts.extend(scripts.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets.styles.extend(styles.into_iter().map(Into::into));
        self
    }

    /// Whether the configuration editor can render this type.
    /// Missing setup is tolerated data, not an error.
    #[must_use]
    pub fn is_editor_renderable(&self) -> bool {
        self.setup.is_some()
    }
}

impl fmt::Debug for FieldTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTypeDefinition")
            .field("label", &self.label)
            .field("category", &self.category)
            .field("renderer_ref", &self.renderer_ref)
            .field("capabilities", &self.capabilities)
            .field("setup", &self.setup)
            .field("submit_handler", &self.submit_handler.is_some())
            .field("viewer_hook", &self.viewer_hook.is_some())
            .field("assets", &self.assets)
            .finish()
    }
}
