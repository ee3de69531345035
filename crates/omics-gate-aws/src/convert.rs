// crates/omics-gate-aws/src/convert.rs
// ============================================================================
// Module: Wire Conversions
// Description: JSON/document and timestamp conversions for SDK boundaries.
// Purpose: Move values between serde JSON and the SDK wire representations.
// Dependencies: aws-smithy-types, serde_json
// ============================================================================

//! ## Overview
//! The workflow service models free-form parameter documents with its own
//! document type rather than serde JSON, and timestamps with an epoch-based
//! type rather than strings. These conversions are total: unrepresentable
//! numbers degrade to null instead of failing a request over a formatting
//! detail.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use aws_smithy_types::DateTime;
use aws_smithy_types::Document;
use aws_smithy_types::Number;
use aws_smithy_types::date_time::Format;
use serde_json::Value;

// ============================================================================
// SECTION: Document Conversions
// ============================================================================

/// Converts a serde JSON value into an SDK document.
#[must_use]
pub fn json_to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(flag) => Document::Bool(*flag),
        Value::Number(number) => Document::Number(json_number(number)),
        Value::String(text) => Document::String(text.clone()),
        Value::Array(items) => Document::Array(items.iter().map(json_to_document).collect()),
        Value::Object(map) => Document::Object(
            map.iter()
                .map(|(key, entry)| (key.clone(), json_to_document(entry)))
                .collect::<HashMap<String, Document>>(),
        ),
    }
}

/// Converts a serde JSON number into an SDK document number.
fn json_number(number: &serde_json::Number) -> Number {
    if let Some(unsigned) = number.as_u64() {
        Number::PosInt(unsigned)
    } else if let Some(signed) = number.as_i64() {
        Number::NegInt(signed)
    } else {
        Number::Float(number.as_f64().unwrap_or_default())
    }
}

/// Converts an SDK document into a serde JSON value.
#[must_use]
pub fn document_to_json(document: &Document) -> Value {
    match document {
        Document::Null => Value::Null,
        Document::Bool(flag) => Value::Bool(*flag),
        Document::Number(Number::PosInt(unsigned)) => Value::from(*unsigned),
        Document::Number(Number::NegInt(signed)) => Value::from(*signed),
        Document::Number(Number::Float(float)) => {
            serde_json::Number::from_f64(*float).map_or(Value::Null, Value::Number)
        }
        Document::String(text) => Value::String(text.clone()),
        Document::Array(items) => Value::Array(items.iter().map(document_to_json).collect()),
        Document::Object(map) => Value::Object(
            map.iter().map(|(key, entry)| (key.clone(), document_to_json(entry))).collect(),
        ),
    }
}

// ============================================================================
// SECTION: Timestamp Conversion
// ============================================================================

/// Formats an SDK timestamp as an offset date-time string.
///
/// Unformattable timestamps become `None` rather than failing the request.
#[must_use]
pub fn format_time(value: Option<&DateTime>) -> Option<String> {
    value.and_then(|timestamp| timestamp.fmt(Format::DateTimeWithOffset).ok())
}
