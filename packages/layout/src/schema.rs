//! JSON Schema for the configuration file.

use crate::config::ExposeConfig;

/// Generates a JSON Schema for the expose configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(ExposeConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert(
            "$id".to_string(),
            serde_json::json!("https://raw.githubusercontent.com/marcosmoura/expose/main/expose.schema.json"),
        );
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for the expose
/// configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    let schema = generate_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
