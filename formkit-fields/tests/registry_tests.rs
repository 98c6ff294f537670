use formkit_fields::{
    Capability, CapabilitySet, FieldCategory, FieldRegistry, FieldTypeDefinition, FieldTypeProvider,
    FormContext, SetupConfig,
};
use formkit_types::{FieldConfig, FieldId, FormConfig, FormId};
use pretty_assertions::assert_eq;
use serde_json::{json, Map};
use std::collections::BTreeMap;
use std::sync::Arc;

fn custom_type(label: &str) -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        label,
        "A contributed type",
        "fields/custom/field.html",
        FieldCategory::Special,
    )
    .setup(SetupConfig::new("fields/custom/config.html"))
}

fn provider_adding(key: &'static str) -> Arc<dyn FieldTypeProvider> {
    Arc::new(move |types: &mut BTreeMap<String, FieldTypeDefinition>| {
        types.insert(key.into(), custom_type("Contributed"));
    })
}

fn context() -> FormContext {
    FormContext::new(FormConfig::new(FormId::new("form1").unwrap(), "Test"))
}

// ================================================================
// Catalog merge semantics
// ================================================================

#[test]
fn builtins_present_unless_overridden() {
    let registry = FieldRegistry::new();
    let all = registry.get_all_types();
    let builtins = registry.get_builtin_types();
    for key in builtins.keys() {
        assert!(all.contains_key(key), "builtin {key} missing from merge");
    }
}

#[test]
fn provider_adds_new_type() {
    let mut registry = FieldRegistry::new();
    registry.register_provider(provider_adding("signature"));

    let all = registry.get_all_types();
    assert!(all.contains_key("signature"));
    assert_eq!(all["signature"].label, "Contributed");
}

#[test]
fn provider_override_wins_over_builtin() {
    let mut registry = FieldRegistry::new();
    registry.register_provider(Arc::new(
        |types: &mut BTreeMap<String, FieldTypeDefinition>| {
            types.insert("text".into(), custom_type("Replacement Text"));
        },
    ));

    let def = registry.get_definition("text").unwrap();
    assert_eq!(def.label, "Replacement Text");
    assert_eq!(def.category, FieldCategory::Special);
}

#[test]
fn later_provider_wins_over_earlier() {
    let mut registry = FieldRegistry::new();
    registry.register_provider(Arc::new(
        |types: &mut BTreeMap<String, FieldTypeDefinition>| {
            types.insert("poll".into(), custom_type("First"));
        },
    ));
    registry.register_provider(Arc::new(
        |types: &mut BTreeMap<String, FieldTypeDefinition>| {
            types.insert("poll".into(), custom_type("Second"));
        },
    ));

    assert_eq!(registry.get_definition("poll").unwrap().label, "Second");
}

#[test]
fn builtin_table_excludes_provider_types() {
    let mut registry = FieldRegistry::new();
    registry.register_provider(provider_adding("signature"));

    let builtins = registry.get_builtin_types();
    assert!(!builtins.contains_key("signature"));
    assert!(builtins.contains_key("text"));
}

// ================================================================
// Lookup contract
// ================================================================

// Lookup must test key existence, not value membership: a valid key
// always resolves to its definition.
#[test]
fn definition_lookup_by_valid_key_succeeds() {
    let registry = FieldRegistry::new();
    for key in ["text", "advanced_file", "star_rating", "recaptcha"] {
        let def = registry.get_definition(key);
        assert!(def.is_some(), "lookup of valid key {key} failed");
    }
    assert_eq!(
        registry.get_definition("advanced_file").unwrap().label,
        "Advanced File Uploader"
    );
}

#[test]
fn unknown_key_returns_none_without_panicking() {
    let registry = FieldRegistry::new();
    assert!(registry.get_definition("no_such_type").is_none());
    assert!(registry.get_definition("").is_none());
}

// ================================================================
// Viewer wiring side effect
// ================================================================

#[test]
fn catalog_build_wires_viewer_hooks() {
    let registry = FieldRegistry::new();
    assert_eq!(registry.wired_viewer_count(), 0);

    registry.get_all_types();
    // dropdown, checkbox, radio, toggle_switch, star_rating, file,
    // advanced_file carry viewers in the built-in table
    assert_eq!(registry.wired_viewer_count(), 7);
}

#[test]
fn repeated_builds_do_not_double_register() {
    let registry = FieldRegistry::new();
    registry.get_all_types();
    let wired = registry.wired_viewer_count();
    registry.get_all_types();
    registry.get_all_types();
    assert_eq!(registry.wired_viewer_count(), wired);
}

#[test]
fn apply_viewer_transforms_output() {
    let registry = FieldRegistry::new();
    registry.get_all_types();

    let mut field = FieldConfig::new(FieldId::new("rate").unwrap(), "Rating", "star_rating");
    field.config.insert("number".into(), json!(4));

    let out = registry.apply_viewer("star_rating", "2".into(), &field, &context());
    assert_eq!(out, "★★☆☆");
}

#[test]
fn apply_viewer_passthrough_for_unwired_type() {
    let registry = FieldRegistry::new();
    registry.get_all_types();

    let field = FieldConfig::new(FieldId::new("n").unwrap(), "Name", "text");
    let out = registry.apply_viewer("text", "Ada".into(), &field, &context());
    assert_eq!(out, "Ada");
}

#[test]
fn provider_viewer_is_wired_for_its_type() {
    let mut registry = FieldRegistry::new();
    registry.register_provider(Arc::new(
        |types: &mut BTreeMap<String, FieldTypeDefinition>| {
            types.insert(
                "shout".into(),
                custom_type("Shout").viewer(Arc::new(|out, _, _| out.to_uppercase())),
            );
        },
    ));
    registry.get_all_types();

    let field = FieldConfig::new(FieldId::new("s").unwrap(), "Shout", "shout");
    let out = registry.apply_viewer("shout", "hello".into(), &field, &context());
    assert_eq!(out, "HELLO");
}

// ================================================================
// Malformed contributions
// ================================================================

#[test]
fn contribution_without_setup_is_tolerated() {
    let mut registry = FieldRegistry::new();
    registry.register_provider(Arc::new(
        |types: &mut BTreeMap<String, FieldTypeDefinition>| {
            // No setup: valid data, just not renderable in the editor
            types.insert(
                "bare".into(),
                FieldTypeDefinition::new("Bare", "", "r", FieldCategory::Basic)
                    .capabilities(CapabilitySet::none()),
            );
        },
    ));

    let def = registry.get_definition("bare").unwrap();
    assert!(!def.is_editor_renderable());
    assert!(!def.capabilities.has(Capability::CapturesValue));
}

// ================================================================
// Defaults merge
// ================================================================

#[test]
fn apply_defaults_fills_missing_keys_only() {
    let registry = FieldRegistry::new();
    let mut config = Map::new();
    config.insert("rows".into(), json!("12"));

    registry.apply_defaults("paragraph", &mut config);
    // Explicit instance value survives
    assert_eq!(config["rows"], "12");

    let mut empty = Map::new();
    registry.apply_defaults("paragraph", &mut empty);
    assert_eq!(empty["rows"], "4");
}

#[test]
fn apply_defaults_ignores_unknown_type() {
    let registry = FieldRegistry::new();
    let mut config = Map::new();
    registry.apply_defaults("no_such_type", &mut config);
    assert!(config.is_empty());
}

// ================================================================
// Submit handlers through the registry
// ================================================================

#[test]
fn submit_handler_runs_for_calculation() {
    let registry = FieldRegistry::new();
    let mut field = FieldConfig::new(FieldId::new("total").unwrap(), "Total", "calculation");
    field.config.insert("formula".into(), json!("a + b"));

    let mut ctx = context();
    ctx.entry.insert("a".into(), json!(2));
    ctx.entry.insert("b".into(), json!(5));

    let value = registry.run_submit_handler(&field, &ctx).unwrap();
    assert_eq!(value, Some(json!(7.0)));
}

#[test]
fn submit_handler_absent_for_plain_types() {
    let registry = FieldRegistry::new();
    let field = FieldConfig::new(FieldId::new("n").unwrap(), "Name", "text");
    assert_eq!(registry.run_submit_handler(&field, &context()).unwrap(), None);
}

#[test]
fn submit_handler_skips_unknown_type() {
    let registry = FieldRegistry::new();
    let field = FieldConfig::new(FieldId::new("x").unwrap(), "X", "ghost_type");
    assert_eq!(registry.run_submit_handler(&field, &context()).unwrap(), None);
}

// ================================================================
// Asset collection
// ================================================================

#[test]
fn assets_collected_per_used_type_deduplicated() {
    let registry = FieldRegistry::new();
    let mut form = FormConfig::new(FormId::new("form1").unwrap(), "Assets");
    form.fields.push(FieldConfig::new(
        FieldId::new("f1").unwrap(),
        "Files",
        "advanced_file",
    ));
    form.fields.push(FieldConfig::new(
        FieldId::new("f2").unwrap(),
        "More files",
        "advanced_file",
    ));
    form.fields.push(FieldConfig::new(
        FieldId::new("f3").unwrap(),
        "Slider",
        "range_slider",
    ));

    let bundle = registry.assets_for(&form);
    assert_eq!(bundle.scripts, vec!["fields/advanced_file/uploader.js".to_string()]);
    assert_eq!(bundle.styles, vec!["fields/range_slider/rangeslider.css".to_string()]);
}

#[test]
fn assets_empty_for_asset_free_form() {
    let registry = FieldRegistry::new();
    let mut form = FormConfig::new(FormId::new("form1").unwrap(), "Plain");
    form.fields.push(FieldConfig::new(FieldId::new("f1").unwrap(), "Name", "text"));

    assert!(registry.assets_for(&form).is_empty());
}
