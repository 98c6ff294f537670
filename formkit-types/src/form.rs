//! Form configuration model.
//!
//! A thin view over the host's form store: enough structure for the
//! registry to resolve field types and for the upload manager to enumerate
//! the fields of a form during cleanup. The host owns persistence; these
//! types are the accessor interface, not a schema.

use crate::ids::{FieldId, FormId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One field placed on a form: its identity, its type key, and the
/// instance configuration the form builder saved for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub id: FieldId,
    pub label: String,
    /// Key into the field-type registry.
    #[serde(rename = "type")]
    pub type_key: String,
    /// Instance settings; defaults from the type definition are merged in
    /// at render time for keys the instance does not set.
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl FieldConfig {
    pub fn new(id: FieldId, label: impl Into<String>, type_key: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            type_key: type_key.into(),
            config: Map::new(),
        }
    }
}

/// Mail-on-submit settings for a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub recipients: Vec<String>,
}

/// A form definition as handed over by the host's form store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub id: FormId,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub mailer: MailerConfig,
}

impl FormConfig {
    pub fn new(id: FormId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            fields: Vec::new(),
            mailer: MailerConfig::default(),
        }
    }

    /// Whether submitting this form triggers mail delivery.
    #[must_use]
    pub fn sends_mail(&self) -> bool {
        self.mailer.enabled
    }

    /// Looks up one field by its ID.
    pub fn get_field(&self, id: &FieldId) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Iterates the fields whose type key matches `type_key`.
    pub fn fields_of_type<'a>(
        &'a self,
        type_key: &'a str,
    ) -> impl Iterator<Item = &'a FieldConfig> + 'a {
        self.fields.iter().filter(move |f| f.type_key == type_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_fields() -> FormConfig {
        let mut form = FormConfig::new(FormId::new("form9").unwrap(), "Contact");
        form.fields.push(FieldConfig::new(
            FieldId::new("f1").unwrap(),
            "Upload",
            "advanced_file",
        ));
        form.fields.push(FieldConfig::new(
            FieldId::new("f2").unwrap(),
            "Name",
            "text",
        ));
        form.fields.push(FieldConfig::new(
            FieldId::new("f3").unwrap(),
            "Attachments",
            "advanced_file",
        ));
        form
    }

    #[test]
    fn fields_of_type_filters() {
        let form = form_with_fields();
        let uploads: Vec<_> = form.fields_of_type("advanced_file").collect();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].id.as_str(), "f1");
        assert_eq!(uploads[1].id.as_str(), "f3");
        assert_eq!(form.fields_of_type("dropdown").count(), 0);
    }

    #[test]
    fn get_field_by_id() {
        let form = form_with_fields();
        let id = FieldId::new("f2").unwrap();
        assert_eq!(form.get_field(&id).unwrap().type_key, "text");
        assert!(form.get_field(&FieldId::new("missing").unwrap()).is_none());
    }

    #[test]
    fn sends_mail_follows_mailer_flag() {
        let mut form = form_with_fields();
        assert!(!form.sends_mail());
        form.mailer.enabled = true;
        assert!(form.sends_mail());
    }

    #[test]
    fn deserializes_with_defaults() {
        let form: FormConfig = serde_json::from_str(
            r#"{"id": "f-1", "name": "Minimal"}"#,
        )
        .unwrap();
        assert!(form.fields.is_empty());
        assert!(!form.sends_mail());
    }
}
