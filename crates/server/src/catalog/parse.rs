//! Model response parser.
//!
//! The model is asked for a bare JSON array, but in practice it sometimes
//! wraps the array in an object (`{"products": [...]}`). The decode tries
//! "array", then "object with an array-valued entry", then fails closed to
//! empty - it never guesses further shapes.

use serde_json::Value;
use thiserror::Error;

/// A product record extracted from a model response.
///
/// Ephemeral: consumed immediately by the ingestion orchestrator to build
/// product rows, never persisted in this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedProduct {
    /// Product name. Records without one are discarded before this struct is
    /// built.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional price as text.
    pub price: Option<String>,
}

/// Errors that can occur while parsing a model response.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The response was not valid JSON. No retry, no partial recovery.
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    /// The response was an object with no array-valued entry.
    #[error("response object contains no product list")]
    NoListFound,

    /// The response was neither an array nor an object.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),
}

/// Parse a model response into an ordered list of product records.
///
/// Keeps only entries that are objects carrying a non-empty `name`; the rest
/// are dropped silently (a nameless entry is not a usable product). Order is
/// the order returned by the model. An empty result is legitimate.
///
/// # Errors
///
/// Returns `ParseError` if the text is not JSON, is an object without an
/// array-valued entry, or is some other shape entirely. Callers treat every
/// error as "zero products".
pub fn parse_product_list(raw: &str) -> Result<Vec<ExtractedProduct>, ParseError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let candidates = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            // The model wrapped the array under a key; take the first entry
            // (in given order) whose value is an array.
            map.into_iter()
                .find_map(|(_, v)| match v {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .ok_or(ParseError::NoListFound)?
        }
        Value::Null => return Err(ParseError::UnexpectedShape("null")),
        Value::Bool(_) => return Err(ParseError::UnexpectedShape("boolean")),
        Value::Number(_) => return Err(ParseError::UnexpectedShape("number")),
        Value::String(_) => return Err(ParseError::UnexpectedShape("string")),
    };

    Ok(candidates.into_iter().filter_map(to_record).collect())
}

/// Convert one candidate entry into a record, if it is usable.
fn to_record(value: Value) -> Option<ExtractedProduct> {
    let Value::Object(map) = value else {
        return None;
    };

    let name = match map.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_owned(),
        _ => return None,
    };

    Some(ExtractedProduct {
        name,
        description: text_field(map.get("description")),
        price: text_field(map.get("price")),
    })
}

/// Read an optional text field, tolerating numbers for prices the model
/// didn't quote.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
