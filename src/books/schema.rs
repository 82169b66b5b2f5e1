//! JSON schema checks for book request bodies.
//!
//! Every violation found in a body is reported, joined by `"; "`, in a single
//! validation error. Types are never coerced: `pages` and `year` must be JSON
//! integers and every other field a JSON string.

use serde_json::{Map, Value};
use crate::books::domain::{INTEGER_FIELDS, KEY_FIELD, MUTABLE_FIELDS};
use crate::core::library::{LibraryError, LibraryResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BookSchema {
    /// isbn and every mutable field.
    Create,
    /// Every mutable field, isbn is forbidden.
    Update,
    /// At least one mutable field, isbn is forbidden.
    Patch,
}

pub fn validate_book(body: &Value, schema: BookSchema) -> LibraryResult<()> {
    let obj = match body.as_object() {
        Some(obj) => obj,
        None => {
            return Err(LibraryError::validation(
                format!("instance is not of type object, found {}", json_type_name(body)).as_str(),
                Some(format!("{:?}", schema))));
        }
    };

    let violations = collect_violations(obj, schema);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LibraryError::validation(violations.join("; ").as_str(), Some(format!("{:?}", schema))))
    }
}

fn collect_violations(obj: &Map<String, Value>, schema: BookSchema) -> Vec<String> {
    let mut violations = vec![];

    match schema {
        BookSchema::Create => match obj.get(KEY_FIELD) {
            None => violations.push(format!("instance requires property \"{}\"", KEY_FIELD)),
            Some(Value::String(isbn)) if isbn.trim().is_empty() => {
                violations.push(format!("instance.{} must not be empty", KEY_FIELD))
            }
            Some(Value::String(_)) => {}
            Some(other) => violations.push(type_violation(KEY_FIELD, "string", other)),
        },
        BookSchema::Update | BookSchema::Patch => {
            if obj.contains_key(KEY_FIELD) {
                violations.push(format!("instance.{} cannot be changed", KEY_FIELD));
            }
        }
    }

    for field in MUTABLE_FIELDS {
        match obj.get(field) {
            None if schema != BookSchema::Patch => {
                violations.push(format!("instance requires property \"{}\"", field));
            }
            None => {}
            Some(value) => {
                if let Some(violation) = check_type(field, value) {
                    violations.push(violation);
                }
            }
        }
    }

    for key in obj.keys() {
        if key != KEY_FIELD && !MUTABLE_FIELDS.contains(&key.as_str()) {
            violations.push(format!("instance additional property \"{}\" is not allowed", key));
        }
    }

    if schema == BookSchema::Patch && !MUTABLE_FIELDS.iter().any(|f| obj.contains_key(*f)) {
        violations.push("No data".to_string());
    }

    violations
}

fn check_type(field: &str, value: &Value) -> Option<String> {
    if INTEGER_FIELDS.contains(&field) {
        if value.is_i64() {
            None
        } else if value.is_u64() {
            Some(format!("instance.{} is out of range, found {}", field, value))
        } else {
            Some(type_violation(field, "integer", value))
        }
    } else if value.is_string() {
        None
    } else {
        Some(type_violation(field, "string", value))
    }
}

fn type_violation(field: &str, expected: &str, value: &Value) -> String {
    format!("instance.{} is not of type {}, found {}", field, expected, json_type_name(value))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
