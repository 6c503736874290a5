// ABOUTME: Structural validation of descriptor model entries.
// ABOUTME: Collects every problem, keyed by entry index and field, instead of stopping at the first.

use serde_json::Value;
use std::collections::BTreeMap;

/// Field types a model schema may declare.
pub const FIELD_TYPES: &[&str] = &[
    "string", "integer", "float", "number", "boolean", "list", "dict",
];

/// Problems found in a descriptor, keyed like `0.path` or `1.schema.age`.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

fn push(errors: &mut ValidationErrors, key: String, message: impl Into<String>) {
    errors.entry(key).or_default().push(message.into());
}

/// Validate the list of `{path, schema}` entries of one API.
pub fn validate_entries(entries: &[Value]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            push(&mut errors, index.to_string(), "must be of dict type");
            continue;
        };

        match entry.get("path") {
            None => push(&mut errors, format!("{index}.path"), "required field"),
            Some(Value::String(path)) if path.starts_with('/') => {}
            Some(Value::String(_)) => {
                push(&mut errors, format!("{index}.path"), "must start with '/'")
            }
            Some(_) => push(&mut errors, format!("{index}.path"), "must be of string type"),
        }

        match entry.get("schema") {
            None => push(&mut errors, format!("{index}.schema"), "required field"),
            Some(Value::Object(fields)) => {
                for (field, rule) in fields {
                    validate_rule(&mut errors, format!("{index}.schema.{field}"), rule);
                }
            }
            Some(_) => push(&mut errors, format!("{index}.schema"), "must be of dict type"),
        }

        for key in entry.keys() {
            if key != "path" && key != "schema" {
                push(&mut errors, format!("{index}.{key}"), "unknown field");
            }
        }
    }

    errors
}

fn validate_rule(errors: &mut ValidationErrors, key: String, rule: &Value) {
    let Some(rule) = rule.as_object() else {
        push(errors, key, "must be of dict type");
        return;
    };

    match rule.get("type") {
        None => push(errors, key.clone(), "missing 'type'"),
        Some(Value::String(kind)) if FIELD_TYPES.contains(&kind.as_str()) => {}
        Some(other) => push(errors, key.clone(), format!("unallowed type {other}")),
    }

    if let Some(required) = rule.get("required")
        && !required.is_boolean()
    {
        push(errors, key, "'required' must be of boolean type");
    }
}
