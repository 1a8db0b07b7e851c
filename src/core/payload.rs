//! Request payload extraction
//!
//! Every mutating endpoint receives a body shaped as `{ "data": { ... } }`.
//! The [`Payload`] extractor unwraps the `data` object (a missing or
//! non-object `data` becomes an empty object) so that validation steps can
//! inspect individual fields. An empty body is an empty payload, and a
//! non-empty body is parsed as JSON whatever its content type.

use crate::core::error::{BistroError, BistroResult, RequestError};
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// The `data` object of a request body
#[derive(Debug, Clone, Default)]
pub struct Payload(pub Map<String, Value>);

impl Payload {
    /// Unwrap the `data` member of a full request body
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Object(data)) => Self(data),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = BistroError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            BistroError::Request(RequestError::InvalidBody {
                message: e.to_string(),
            })
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload::default());
        }

        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(Payload::from_body(body))
    }
}

/// A field counts as present when it exists and is not `null`
pub fn is_present(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// Non-empty string value of a field
pub fn non_empty_text<'a>(data: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    data.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Integer value of a JSON number
///
/// Floats with no fractional part (`5.0`) count as integers.
pub fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Text of a field that an earlier step has already validated
pub fn validated_text(data: &Map<String, Value>, field: &str) -> BistroResult<String> {
    non_empty_text(data, field)
        .map(str::to_string)
        .ok_or_else(|| unvalidated(field))
}

/// Integer of a field that an earlier step has already validated
pub fn validated_integer(value: Option<&Value>, field: &str) -> BistroResult<u64> {
    value
        .and_then(as_integer)
        .and_then(|i| u64::try_from(i).ok())
        .ok_or_else(|| unvalidated(field))
}

fn unvalidated(field: &str) -> BistroError {
    BistroError::Internal(format!("field '{}' reached a handler unvalidated", field))
}

/// Success body wrapper: `{ "data": ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

/// Human-readable rendering of a scalar (strings without quotes)
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_unwraps_data() {
        let payload = Payload::from_body(json!({ "data": { "name": "Taco" } }));
        assert_eq!(payload.data()["name"], "Taco");
    }

    #[test]
    fn test_from_body_missing_data_is_empty() {
        assert!(Payload::from_body(json!({ "name": "Taco" })).data().is_empty());
        assert!(Payload::from_body(json!({ "data": "Taco" })).data().is_empty());
        assert!(Payload::from_body(json!([1, 2])).data().is_empty());
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&json!(null))));
        assert!(is_present(Some(&json!(0))));
        assert!(is_present(Some(&json!(""))));
    }

    #[test]
    fn test_non_empty_text() {
        let data = json!({ "a": "x", "b": "", "c": 3 });
        let data = data.as_object().unwrap();
        assert_eq!(non_empty_text(data, "a"), Some("x"));
        assert_eq!(non_empty_text(data, "b"), None);
        assert_eq!(non_empty_text(data, "c"), None);
        assert_eq!(non_empty_text(data, "d"), None);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(as_integer(&json!(5)), Some(5));
        assert_eq!(as_integer(&json!(-2)), Some(-2));
        assert_eq!(as_integer(&json!(5.0)), Some(5));
        assert_eq!(as_integer(&json!(5.5)), None);
        assert_eq!(as_integer(&json!("5")), None);
        assert_eq!(as_integer(&json!(null)), None);
    }

    #[test]
    fn test_validated_accessors() {
        let data = json!({ "name": "Taco", "price": 5, "debt": -1 });
        let data = data.as_object().unwrap();
        assert_eq!(validated_text(data, "name").unwrap(), "Taco");
        assert_eq!(validated_integer(data.get("price"), "price").unwrap(), 5);
        assert!(matches!(
            validated_integer(data.get("debt"), "debt"),
            Err(BistroError::Internal(_))
        ));
        assert!(matches!(
            validated_text(data, "missing"),
            Err(BistroError::Internal(_))
        ));
    }

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(Envelope { data: vec![1, 2] }).unwrap();
        assert_eq!(body, json!({ "data": [1, 2] }));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("12")), "12");
        assert_eq!(display_value(&json!(12)), "12");
    }
}
