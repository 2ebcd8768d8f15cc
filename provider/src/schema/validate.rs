//! Generic validation of raw configuration against a schema block
//!
//! Walks a JSON object attribute by attribute, collecting every problem
//! before failing, and fills in declared defaults so the result can be
//! bound straight onto the typed configuration.

use serde_json::{Map, Value};

use crate::errors::ProviderError;
use crate::schema::attribute::{Attribute, AttributeType, Block};
use crate::schema::Diagnostic;

/// Validate `value` against `block` and return it with defaults applied
pub fn validate(block: &Block, value: Value) -> Result<Value, ProviderError> {
    let mut diagnostics = Vec::new();
    let normalized = validate_block(block, value, "", &mut diagnostics);

    if diagnostics.is_empty() {
        Ok(normalized)
    } else {
        Err(ProviderError::ValidationError(diagnostics))
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn validate_block(
    block: &Block,
    value: Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Value {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            diagnostics.push(Diagnostic::new(
                path,
                format!("expected an object, got {}", json_type(&other)),
            ));
            return other;
        }
    };

    for key in object.keys() {
        if block.attribute(key).is_none() {
            diagnostics.push(Diagnostic::new(
                join_path(path, key),
                "unsupported attribute",
            ));
        }
    }

    let mut normalized = Map::new();
    for attribute in &block.attributes {
        let attr_path = join_path(path, attribute.name);
        let value = object.remove(attribute.name).filter(|v| !v.is_null());

        match value {
            Some(_) if !attribute.is_settable() => {
                diagnostics.push(Diagnostic::new(
                    attr_path,
                    "computed attribute cannot be set",
                ));
            }
            Some(value) => {
                let value = validate_value(attribute, &attribute.kind, value, &attr_path, diagnostics);
                normalized.insert(attribute.name.to_string(), value);
            }
            None if attribute.required => {
                diagnostics.push(Diagnostic::new(attr_path, "required attribute is missing"));
            }
            None => {
                if let Some(default) = &attribute.default {
                    normalized.insert(attribute.name.to_string(), default.clone());
                } else if let AttributeType::BlockList(_) = attribute.kind {
                    normalized.insert(attribute.name.to_string(), Value::Array(Vec::new()));
                }
            }
        }
    }

    Value::Object(normalized)
}

fn validate_value(
    attribute: &Attribute,
    kind: &AttributeType,
    value: Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Value {
    match (kind, value) {
        (AttributeType::String, Value::String(s)) => {
            if let Some(allowed) = attribute.allowed_values {
                if !allowed.iter().any(|a| a.eq_ignore_ascii_case(&s)) {
                    diagnostics.push(Diagnostic::new(
                        path,
                        format!("expected one of [{}], got {:?}", allowed.join(", "), s),
                    ));
                }
            }
            Value::String(s)
        }
        (AttributeType::Bool, Value::Bool(b)) => Value::Bool(b),
        (AttributeType::List(element), Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    validate_value(attribute, element, item, &format!("{}.{}", path, i), diagnostics)
                })
                .collect(),
        ),
        (AttributeType::BlockList(block), Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| validate_block(block, item, &format!("{}.{}", path, i), diagnostics))
                .collect(),
        ),
        (kind, other) => {
            diagnostics.push(Diagnostic::new(
                path,
                format!("expected {}, got {}", kind.type_name(), json_type(&other)),
            ));
            other
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
