//! Maps the loose JSON envelopes returned by the remote API onto the engine's model.
//!
//! Candidate listings are accepted as a bare array, `{"products": [...]}`,
//! `{"data": [...]}` or `{"data": {"products": [...]}}`. A `null` body is an empty listing.
//!
//! Generation responses carry the value under one of several keys depending on the kind
//! (see [`value_paths`]) plus an optional `message`.

use super::{CollaboratorError, CollaboratorResult, GeneratedAttribute};
use crate::models::{AttributeKind, Record, RecordId};
use serde_json::Value;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Generated";

/// Lookup paths for the generated value, tried in order
pub fn value_paths(kind: AttributeKind) -> &'static [&'static [&'static str]] {
    match kind {
        AttributeKind::Barcode => &[&["barcode"], &["data", "barcode"], &["barcodeNumber"]],
        AttributeKind::Sku => &[&["sku"], &["data", "sku"], &["generatedSku"]],
    }
}

pub fn records_from_envelope(body: &Value) -> CollaboratorResult<Vec<Record>> {
    let items = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(map) => {
            let listed = map
                .get("products")
                .and_then(Value::as_array)
                .or_else(|| map.get("data").and_then(Value::as_array))
                .or_else(|| {
                    map.get("data")
                        .and_then(|data| data.get("products"))
                        .and_then(Value::as_array)
                });
            match listed {
                Some(items) => items,
                None => {
                    return Err(CollaboratorError::Normalization(
                        "listing envelope has no products array".to_string(),
                    ))
                }
            }
        }
        other => {
            return Err(CollaboratorError::Normalization(format!(
                "expected a listing, got {}",
                json_kind(other)
            )))
        }
    };

    items.iter().map(record_from_value).collect()
}

pub fn generated_from_envelope(
    kind: AttributeKind,
    body: &Value,
) -> CollaboratorResult<GeneratedAttribute> {
    let value = value_paths(kind)
        .iter()
        .find_map(|path| text_at(body, path))
        .ok_or_else(|| {
            CollaboratorError::Normalization(format!("response carries no {} value", kind.label()))
        })?;

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
        .to_string();

    Ok(GeneratedAttribute { value, message })
}

fn record_from_value(item: &Value) -> CollaboratorResult<Record> {
    let id = match item.get("id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| CollaboratorError::Normalization(format!("record without numeric id: {item}")))?;

    Ok(Record {
        id: RecordId(id),
        name: text_at(item, &["name"]),
        sku: text_at(item, &["sku"]),
        barcode: text_at(item, &["barcode"]),
    })
}

/// Non-empty string (or number rendered as text) at `path`
fn text_at(body: &Value, path: &[&str]) -> Option<String> {
    let mut cursor = body;
    for key in path {
        cursor = cursor.get(key)?;
    }
    match cursor {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
