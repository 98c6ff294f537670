//! Built-in submit handlers.
//!
//! Submit handlers run during submission processing, before the entry is
//! persisted: the calculation type computes its total from other fields,
//! the captcha type validates the challenge response.

use crate::error::FieldError;
use crate::hooks::FormContext;
use formkit_types::FieldConfig;
use serde_json::{json, Value};
use tracing::debug;

/// Computes a calculation field's value by summing the entry values of the
/// fields named in its `formula` setting (`+`-separated field IDs).
/// Non-numeric or missing operands count as zero.
pub fn run_calculation(field: &FieldConfig, context: &FormContext) -> Result<Value, FieldError> {
    let formula = field
        .config
        .get("formula")
        .and_then(Value::as_str)
        .ok_or_else(|| FieldError::MissingSetting {
            field: field.id.to_string(),
            setting: "formula".into(),
        })?;

    let total: f64 = formula
        .split('+')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            context
                .entry_value(id)
                .map(numeric_value)
                .unwrap_or_default()
        })
        .sum();

    debug!(field_id = %field.id, %formula, total, "calculation evaluated");
    Ok(json!(total))
}

fn numeric_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

/// Validates a captcha field's challenge response against the expected
/// answer stored in the field configuration.
pub fn check_captcha(field: &FieldConfig, context: &FormContext) -> Result<Value, FieldError> {
    let expected = field
        .config
        .get("expected")
        .and_then(Value::as_str)
        .ok_or_else(|| FieldError::MissingSetting {
            field: field.id.to_string(),
            setting: "expected".into(),
        })?;

    let response = context
        .entry_value(field.id.as_str())
        .and_then(Value::as_str)
        .unwrap_or_default();

    if response == expected {
        Ok(Value::Bool(true))
    } else {
        Err(FieldError::Validation {
            field: field.id.to_string(),
            message: "captcha response did not match".into(),
        })
    }
}
