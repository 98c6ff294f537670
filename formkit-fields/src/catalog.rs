//! The fixed built-in field-type table.
//!
//! Large but mechanically simple: one entry per shipped type with its
//! renderer/setup references, capability set, defaults, hook bindings, and
//! asset lists. External types are layered on top by the registry.

use crate::definition::{
    Capability, CapabilitySet, FieldCategory, FieldTypeDefinition, SetupConfig,
};
use crate::{handlers, viewers};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Capability set for a select-style type: options plus static markup.
fn select_caps() -> CapabilitySet {
    CapabilitySet::standard()
        .with(Capability::HasOptions)
        .with(Capability::IsStatic)
}

/// Returns the built-in catalog, keyed by type key.
pub fn builtin_types() -> BTreeMap<String, FieldTypeDefinition> {
    let mut types = BTreeMap::new();

    // ================================================================
    // Basic
    // ================================================================

    types.insert(
        "text".into(),
        FieldTypeDefinition::new(
            "Single Line Text",
            "Single Line Text",
            "fields/generic-input.html",
            FieldCategory::Basic,
        )
        .setup(
            SetupConfig::new("fields/text/config.html").preview("fields/text/preview.html"),
        ),
    );

    types.insert(
        "hidden".into(),
        FieldTypeDefinition::new(
            "Hidden",
            "Hidden",
            "fields/hidden/field.html",
            FieldCategory::Basic,
        )
        .capabilities(CapabilitySet::standard().with(Capability::IsStatic))
        .setup(
            SetupConfig::new("fields/hidden/setup.html")
                .preview("fields/hidden/preview.html")
                .unsupported(["hide_label", "caption", "required"]),
        ),
    );

    types.insert(
        "email".into(),
        FieldTypeDefinition::new(
            "Email Address",
            "Email Address",
            "fields/generic-input.html",
            FieldCategory::Basic,
        )
        .setup(
            SetupConfig::new("fields/email/config.html").preview("fields/email/preview.html"),
        ),
    );

    types.insert(
        "button".into(),
        FieldTypeDefinition::new(
            "Button",
            "Button, Submit and Reset types",
            "fields/button/field.html",
            FieldCategory::Basic,
        )
        .capabilities(
            CapabilitySet::standard()
                .without(Capability::CapturesValue)
                .without(Capability::SupportsEntryList),
        )
        .setup(
            SetupConfig::new("fields/button/config_template.html")
                .preview("fields/button/preview.html")
                .default_value("class", json!("btn btn-default"))
                .default_value("type", json!("submit"))
                .unsupported(["hide_label", "caption", "required", "entry_list"]),
        ),
    );

    types.insert(
        "phone_better".into(),
        FieldTypeDefinition::new(
            "Phone Number (Better)",
            "Phone number with advanced options and international formatting",
            "fields/phone_better/field.html",
            FieldCategory::Basic,
        )
        .setup(
            SetupConfig::new("fields/phone_better/config.html")
                .preview("fields/phone_better/preview.html")
                .default_value("default", json!("")),
        )
        .scripts(["fields/phone_better/assets/js/intlTelInput.min.js"])
        .styles(["fields/phone_better/assets/css/intlTelInput.css"]),
    );

    types.insert(
        "phone".into(),
        FieldTypeDefinition::new(
            "Phone Number (Basic)",
            "Phone number with masking",
            "fields/generic-input.html",
            FieldCategory::Basic,
        )
        .setup(
            SetupConfig::new("fields/phone/config.html")
                .preview("fields/phone/preview.html")
                .default_value("default", json!(""))
                .default_value("type", json!("local"))
                .default_value("custom", json!("(999)999-9999")),
        ),
    );

    types.insert(
        "paragraph".into(),
        FieldTypeDefinition::new(
            "Paragraph Textarea",
            "Paragraph Textarea",
            "fields/paragraph/field.html",
            FieldCategory::Basic,
        )
        .setup(
            SetupConfig::new("fields/paragraph/config_template.html")
                .preview("fields/paragraph/preview.html")
                .default_value("rows", json!("4")),
        ),
    );

    types.insert(
        "wysiwyg".into(),
        FieldTypeDefinition::new(
            "Rich Editor",
            "WYSIWYG rich text editor",
            "fields/wysiwyg/field.html",
            FieldCategory::Basic,
        )
        .setup(
            SetupConfig::new("fields/wysiwyg/config_template.html")
                .preview("fields/wysiwyg/preview.html"),
        )
        .scripts(["fields/wysiwyg/wysiwyg.js"])
        .styles(["fields/wysiwyg/wysiwyg.min.css"]),
    );

    // ================================================================
    // Special
    // ================================================================

    types.insert(
        "calculation".into(),
        FieldTypeDefinition::new(
            "Calculation",
            "Calculate values",
            "fields/calculation/field.html",
            FieldCategory::Special,
        )
        .submit_handler(Arc::new(handlers::run_calculation))
        .setup(
            SetupConfig::new("fields/calculation/config.html")
                .preview("fields/calculation/preview.html")
                .default_value("element", json!("h3"))
                .default_value("classes", json!("total-line"))
                .default_value("before", json!("Total:"))
                .default_value("after", json!("")),
        ),
    );

    types.insert(
        "range_slider".into(),
        FieldTypeDefinition::new(
            "Range Slider",
            "Range Slider input field",
            "fields/range_slider/field.html",
            FieldCategory::Special,
        )
        .setup(
            SetupConfig::new("fields/range_slider/config.html")
                .preview("fields/range_slider/preview.html")
                .default_value("default", json!(1))
                .default_value("step", json!(1))
                .default_value("min", json!(0))
                .default_value("max", json!(100))
                .default_value("showval", json!(1))
                .default_value("suffix", json!(""))
                .default_value("prefix", json!(""))
                .default_value("color", json!("#00ff00"))
                .default_value("handle", json!("#ffffff"))
                .default_value("handleborder", json!("#cccccc"))
                .default_value("trackcolor", json!("#e6e6e6")),
        )
        .styles(["fields/range_slider/rangeslider.css"]),
    );

    types.insert(
        "star_rating".into(),
        FieldTypeDefinition::new(
            "Star Rating",
            "Star rating input for feedback",
            "fields/star-rate/field.html",
            FieldCategory::Special,
        )
        .viewer(Arc::new(viewers::star_rating))
        .setup(
            SetupConfig::new("fields/star-rate/config.html")
                .preview("fields/star-rate/preview.html")
                .default_value("number", json!(5))
                .default_value("space", json!(3))
                .default_value("size", json!(13))
                .default_value("color", json!("#FFAA00"))
                .default_value("track_color", json!("#AFAFAF"))
                .default_value("type", json!("star")),
        ),
    );

    // ================================================================
    // File
    // ================================================================

    types.insert(
        "file".into(),
        FieldTypeDefinition::new(
            "File",
            "File Uploader",
            "fields/file/field.html",
            FieldCategory::File,
        )
        .viewer(Arc::new(viewers::file_preview))
        .setup(
            SetupConfig::new("fields/file/config_template.html")
                .preview("fields/file/preview.html"),
        ),
    );

    types.insert(
        "advanced_file".into(),
        FieldTypeDefinition::new(
            "Advanced File Uploader",
            "Inline, multi file uploader",
            "fields/advanced_file/field.html",
            FieldCategory::File,
        )
        .viewer(Arc::new(viewers::file_preview))
        .setup(
            SetupConfig::new("fields/advanced_file/config_template.html")
                .preview("fields/advanced_file/preview.html"),
        )
        .scripts(["fields/advanced_file/uploader.js"]),
    );

    // ================================================================
    // Content
    // ================================================================

    types.insert(
        "html".into(),
        FieldTypeDefinition::new(
            "HTML",
            "Add text/html content",
            "fields/html/field.html",
            FieldCategory::Content,
        )
        .icon("fields/html/icon.png")
        .capabilities(CapabilitySet::standard().without(Capability::CapturesValue))
        .setup(
            SetupConfig::new("fields/html/config_template.html")
                .preview("fields/html/preview.html")
                .unsupported(["hide_label", "caption", "required", "entry_list"]),
        ),
    );

    types.insert(
        "section_break".into(),
        FieldTypeDefinition::new(
            "Section Break",
            "A horizontal rule to separate sections of your form.",
            "fields/section-break/field.html",
            FieldCategory::Content,
        )
        .capabilities(CapabilitySet::standard().with(Capability::IsStatic))
        .setup(
            SetupConfig::new("fields/section-break/setup.html")
                .unsupported(["hide_label", "caption", "required"]),
        ),
    );

    // ================================================================
    // Select
    // ================================================================

    types.insert(
        "dropdown".into(),
        FieldTypeDefinition::new(
            "Dropdown Select",
            "Dropdown Select",
            "fields/dropdown/field.html",
            FieldCategory::Select,
        )
        .capabilities(select_caps())
        .viewer(Arc::new(viewers::options_filter))
        .setup(
            SetupConfig::new("fields/dropdown/config_template.html")
                .preview("fields/dropdown/preview.html"),
        ),
    );

    types.insert(
        "checkbox".into(),
        FieldTypeDefinition::new(
            "Checkbox",
            "Checkbox",
            "fields/checkbox/field.html",
            FieldCategory::Select,
        )
        .capabilities(select_caps())
        .viewer(Arc::new(viewers::options_filter))
        .setup(
            SetupConfig::new("fields/checkbox/config_template.html")
                .preview("fields/checkbox/preview.html"),
        ),
    );

    types.insert(
        "radio".into(),
        FieldTypeDefinition::new(
            "Radio",
            "Radio",
            "fields/radio/field.html",
            FieldCategory::Select,
        )
        .capabilities(select_caps())
        .viewer(Arc::new(viewers::options_filter))
        .setup(
            SetupConfig::new("fields/radio/config_template.html")
                .preview("fields/radio/preview.html"),
        ),
    );

    types.insert(
        "filtered_select2".into(),
        FieldTypeDefinition::new(
            "Autocomplete",
            "Select2 dropdown",
            "fields/select2/field/field.html",
            FieldCategory::Select,
        )
        .capabilities(select_caps())
        .setup(
            SetupConfig::new("fields/select2/field/config.html")
                .preview("fields/select2/field/preview.html"),
        )
        .scripts(["fields/select2/js/select2.min.js"])
        .styles(["fields/select2/css/select2.css"]),
    );

    types.insert(
        "date_picker".into(),
        FieldTypeDefinition::new(
            "Date Picker",
            "Date Picker",
            "fields/date_picker/datepicker.html",
            FieldCategory::Select,
        )
        .setup(
            SetupConfig::new("fields/date_picker/setup.html")
                .preview("fields/date_picker/preview.html")
                .default_value("format", json!("yyyy-mm-dd")),
        ),
    );

    types.insert(
        "toggle_switch".into(),
        FieldTypeDefinition::new(
            "Toggle Switch",
            "Toggle Switch",
            "fields/toggle_switch/field.html",
            FieldCategory::Select,
        )
        .capabilities(select_caps())
        .viewer(Arc::new(viewers::options_filter))
        .setup(
            SetupConfig::new("fields/toggle_switch/config_template.html")
                .preview("fields/toggle_switch/preview.html"),
        ),
    );

    types.insert(
        "color_picker".into(),
        FieldTypeDefinition::new(
            "Color Picker",
            "Color Picker",
            "fields/color_picker/field.html",
            FieldCategory::Select,
        )
        .setup(
            SetupConfig::new("fields/color_picker/setup.html")
                .preview("fields/color_picker/preview.html")
                .default_value("default", json!("#FFFFFF")),
        ),
    );

    types.insert(
        "states".into(),
        FieldTypeDefinition::new(
            "State/Province Select",
            "Dropdown select for US states and Canadian provinces.",
            "fields/states/field.html",
            FieldCategory::Select,
        )
        .capabilities(CapabilitySet::standard().without(Capability::HasPlaceholder))
        .setup(
            SetupConfig::new("fields/states/config_template.html")
                .preview("fields/states/preview.html"),
        ),
    );

    // ================================================================
    // Discontinued
    // ================================================================

    types.insert(
        "recaptcha".into(),
        FieldTypeDefinition::new(
            "reCAPTCHA",
            "reCAPTCHA anti-spam field",
            "fields/recaptcha/field.html",
            FieldCategory::Discontinued,
        )
        .capabilities(CapabilitySet::standard().without(Capability::CapturesValue))
        .submit_handler(Arc::new(handlers::check_captcha))
        .setup(
            SetupConfig::new("fields/recaptcha/config.html")
                .preview("fields/recaptcha/preview.html")
                .unsupported(["caption", "required"]),
        ),
    );

    types
}
