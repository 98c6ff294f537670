//! Built-in viewer hooks.
//!
//! These transform a field's stored value into its display output. They
//! are wired per type key by the registry; third-party types can register
//! their own through the same extension point.

use crate::hooks::FormContext;
use formkit_types::FieldConfig;
use serde_json::Value;

/// Replaces stored option values with their configured labels.
///
/// Used by the select-style types (dropdown, checkbox, radio, toggle
/// switch). Multi-select values arrive comma-separated.
pub fn options_filter(output: String, field: &FieldConfig, _context: &FormContext) -> String {
    let Some(Value::Object(options)) = field.config.get("option") else {
        return output;
    };

    output
        .split(',')
        .map(str::trim)
        .map(|value| match options.get(value) {
            Some(Value::String(label)) if !label.is_empty() => label.as_str(),
            _ => value,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a numeric rating as filled and empty star glyphs.
pub fn star_rating(output: String, field: &FieldConfig, _context: &FormContext) -> String {
    let total = field
        .config
        .get("number")
        .and_then(Value::as_u64)
        .unwrap_or(5);
    let rating = output.trim().parse::<u64>().unwrap_or(0).min(total);

    let mut stars = String::new();
    for i in 0..total {
        stars.push(if i < rating { '★' } else { '☆' });
    }
    stars
}

/// Turns stored upload URLs into anchor markup, one link per file.
pub fn file_preview(output: String, _field: &FieldConfig, _context: &FormContext) -> String {
    if output.trim().is_empty() {
        return output;
    }

    output
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| {
            let name = url.rsplit('/').next().unwrap_or(url);
            format!("<a href=\"{url}\" target=\"_blank\">{name}</a>")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_types::{FieldId, FormConfig, FormId};
    use serde_json::json;

    fn context() -> FormContext {
        FormContext::new(FormConfig::new(FormId::new("form1").unwrap(), "Test"))
    }

    fn select_field() -> FieldConfig {
        let mut field = FieldConfig::new(FieldId::new("f1").unwrap(), "Color", "dropdown");
        field.config.insert(
            "option".into(),
            json!({"r": "Red", "g": "Green", "b": "Blue"}),
        );
        field
    }

    #[test]
    fn options_filter_maps_values_to_labels() {
        let out = options_filter("r,b".into(), &select_field(), &context());
        assert_eq!(out, "Red, Blue");
    }

    #[test]
    fn options_filter_keeps_unknown_values() {
        let out = options_filter("r, x".into(), &select_field(), &context());
        assert_eq!(out, "Red, x");
    }

    #[test]
    fn options_filter_without_options_is_passthrough() {
        let field = FieldConfig::new(FieldId::new("f1").unwrap(), "Plain", "dropdown");
        let out = options_filter("raw".into(), &field, &context());
        assert_eq!(out, "raw");
    }

    #[test]
    fn star_rating_renders_glyphs() {
        let mut field = FieldConfig::new(FieldId::new("f1").unwrap(), "Rate", "star_rating");
        field.config.insert("number".into(), json!(5));
        assert_eq!(star_rating("3".into(), &field, &context()), "★★★☆☆");
        assert_eq!(star_rating("0".into(), &field, &context()), "☆☆☆☆☆");
        // Over-range values clamp to the configured maximum
        assert_eq!(star_rating("9".into(), &field, &context()), "★★★★★");
    }

    #[test]
    fn file_preview_links_each_upload() {
        let field = FieldConfig::new(FieldId::new("f1").unwrap(), "Files", "advanced_file");
        let out = file_preview(
            "https://cdn.test/a/one.pdf, https://cdn.test/b/two.png".into(),
            &field,
            &context(),
        );
        assert_eq!(
            out,
            "<a href=\"https://cdn.test/a/one.pdf\" target=\"_blank\">one.pdf</a>, \
             <a href=\"https://cdn.test/b/two.png\" target=\"_blank\">two.png</a>"
        );
    }

    #[test]
    fn file_preview_empty_is_passthrough() {
        let field = FieldConfig::new(FieldId::new("f1").unwrap(), "Files", "file");
        assert_eq!(file_preview("".into(), &field, &context()), "");
    }
}
