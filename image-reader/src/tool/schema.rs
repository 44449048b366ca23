//! JSON schema generation for tool arguments.

use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde_json::{Value, json};

use super::traits::JsonObject;

/// Schema of an argument struct with every subschema inlined.
#[must_use]
pub fn input_schema<T: JsonSchema>() -> JsonObject {
    let generator = SchemaSettings::draft2020_12()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();

    match serde_json::to_value(schema) {
        Ok(Value::Object(mut object)) => {
            object.remove("$schema");
            object
        }
        _ => empty_object_schema(),
    }
}

/// Schema of a tool that takes no arguments.
#[must_use]
pub fn empty_object_schema() -> JsonObject {
    let mut object = JsonObject::new();
    object.insert("type".into(), json!("object"));
    object.insert("properties".into(), json!({}));
    object
}
