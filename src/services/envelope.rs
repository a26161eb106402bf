//! Decoding of the `{statusCode, message, result}` envelope every Flow
//! endpoint answers with.
//!
//! `result` holds either the payload or one of the literals `"success"` /
//! `"failure"`. Reads turn anything unexpected into an [`ApiError`]; writes
//! fold every problem into [`WriteOutcome::Failure`] so view code only ever
//! sees two cases.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome<T> {
    Success(T),
    Failure,
}

impl<T> WriteOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WriteOutcome<U> {
        match self {
            WriteOutcome::Success(v) => WriteOutcome::Success(f(v)),
            WriteOutcome::Failure => WriteOutcome::Failure,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Value,
}

const SUCCESS: &str = "success";
const FAILURE: &str = "failure";

fn parse_envelope(body: &str) -> Result<Envelope, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn status_error(status: u16, envelope: Option<&Envelope>) -> ApiError {
    let message = envelope
        .and_then(|e| e.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));
    ApiError::Status { status, message }
}

/// Unwrap the `result` of a read, rejecting non-2xx statuses and the
/// status literals.
fn read_result(status: u16, body: &str) -> Result<Value, ApiError> {
    if !(200..300).contains(&status) {
        return Err(status_error(status, parse_envelope(body).ok().as_ref()));
    }
    let envelope = parse_envelope(body)?;
    match envelope.result.as_str() {
        Some(FAILURE) => Err(status_error(envelope.status_code.unwrap_or(status), Some(&envelope))),
        Some(SUCCESS) => Err(ApiError::Malformed("expected a payload, got \"success\"".to_string())),
        _ => Ok(envelope.result),
    }
}

fn from_result<T: DeserializeOwned>(result: Value) -> Result<T, ApiError> {
    serde_json::from_value(result).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Decode the payload of a read. Non-2xx statuses, status literals and
/// absent payloads are all errors.
pub fn decode_read<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    match read_result(status, body)? {
        Value::Null => Err(ApiError::Malformed("response has no result".to_string())),
        result => from_result(result),
    }
}

/// Decode a collection read. A missing or `null` result is an empty list.
pub fn decode_read_list<T: DeserializeOwned>(status: u16, body: &str) -> Result<Vec<T>, ApiError> {
    match read_result(status, body)? {
        Value::Null => Ok(Vec::new()),
        result => from_result(result),
    }
}

/// Decode the answer to a write. The payload is optional: servers may answer
/// with the bare `"success"` literal, in which case `Success(None)` is returned.
/// A missing or `null` result is a failure.
pub fn decode_write<T: DeserializeOwned>(status: u16, body: &str) -> WriteOutcome<Option<T>> {
    if !(200..300).contains(&status) {
        log::warn!("[Api] write rejected with HTTP {}", status);
        return WriteOutcome::Failure;
    }
    let envelope = match parse_envelope(body) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("[Api] {}", e);
            return WriteOutcome::Failure;
        }
    };
    match envelope.result {
        Value::String(s) if s == SUCCESS => WriteOutcome::Success(None),
        Value::Null => {
            log::warn!("[Api] write answered HTTP {} without a result", status);
            WriteOutcome::Failure
        }
        Value::String(s) if s == FAILURE => {
            log::warn!("[Api] server reported failure: {}", envelope.message.unwrap_or_default());
            WriteOutcome::Failure
        }
        payload => match serde_json::from_value(payload) {
            Ok(v) => WriteOutcome::Success(Some(v)),
            Err(e) => {
                log::warn!("[Api] unexpected write payload: {}", e);
                WriteOutcome::Failure
            }
        },
    }
}

/// Like [`decode_write`] but the payload is mandatory.
pub fn decode_write_payload<T: DeserializeOwned>(status: u16, body: &str) -> WriteOutcome<T> {
    match decode_write(status, body) {
        WriteOutcome::Success(Some(v)) => WriteOutcome::Success(v),
        WriteOutcome::Success(None) => {
            log::warn!("[Api] write succeeded without the expected payload");
            WriteOutcome::Failure
        }
        WriteOutcome::Failure => WriteOutcome::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChecklistItem, Plan};

    #[test]
    fn read_returns_payload() {
        let body = r#"{"statusCode":200,"message":"ok","result":[{"id":"1","description":"a","done":false}]}"#;
        let items: Vec<ChecklistItem> = decode_read(200, body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
    }

    #[test]
    fn read_non_2xx_uses_envelope_message() {
        let body = r#"{"statusCode":404,"message":"Plan not found","result":"failure"}"#;
        match decode_read::<Plan>(404, body) {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Plan not found");
            }
            other => panic!("unexpected {:?}", other),
        }
        match decode_read::<Plan>(502, "<html>bad gateway</html>") {
            Err(ApiError::Status { message, .. }) => assert_eq!(message, "HTTP 502"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn read_rejects_literals_and_garbage() {
        assert!(matches!(decode_read::<Plan>(200, r#"{"result":"failure"}"#), Err(ApiError::Status { .. })));
        assert!(matches!(decode_read::<Plan>(200, r#"{"result":"success"}"#), Err(ApiError::Malformed(_))));
        assert!(matches!(decode_read::<Plan>(200, r#"{"message":"hi"}"#), Err(ApiError::Malformed(_))));
        assert!(matches!(decode_read::<Plan>(200, "not json"), Err(ApiError::Malformed(_))));
        assert!(matches!(decode_read::<Plan>(200, r#"{"result":{"nope":1}}"#), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn write_outcomes() {
        assert_eq!(decode_write::<ChecklistItem>(200, r#"{"result":"success"}"#), WriteOutcome::Success(None));
        assert_eq!(decode_write::<ChecklistItem>(200, r#"{"result":"failure"}"#), WriteOutcome::Failure);
        assert_eq!(decode_write::<ChecklistItem>(500, r#"{"result":"success"}"#), WriteOutcome::Failure);
        assert_eq!(decode_write::<ChecklistItem>(200, "<oops>"), WriteOutcome::Failure);

        let created = decode_write::<ChecklistItem>(201, r#"{"result":{"id":"42","description":"Buy milk"}}"#);
        assert_eq!(created.map(|i| i.map(|i| i.id)), WriteOutcome::Success(Some("42".to_string())));
    }

    #[test]
    fn write_without_result_is_a_failure() {
        assert_eq!(decode_write::<ChecklistItem>(200, r#"{"statusCode":200,"message":"ok"}"#), WriteOutcome::Failure);
        assert_eq!(decode_write::<ChecklistItem>(200, r#"{"statusCode":200,"result":null}"#), WriteOutcome::Failure);
        assert_eq!(decode_write_payload::<Plan>(201, r#"{"message":"created"}"#), WriteOutcome::Failure);
    }

    #[test]
    fn null_list_reads_as_empty() {
        let items: Vec<ChecklistItem> = decode_read_list(200, r#"{"statusCode":200,"message":"ok","result":null}"#).unwrap();
        assert!(items.is_empty());
        let plans: Vec<Plan> = decode_read_list(200, r#"{"statusCode":200,"message":"ok"}"#).unwrap();
        assert!(plans.is_empty());

        let items: Vec<ChecklistItem> = decode_read_list(200, r#"{"result":[{"id":"7","description":"x"}]}"#).unwrap();
        assert_eq!(items[0].id, "7");

        assert!(matches!(decode_read_list::<Plan>(500, r#"{"result":null}"#), Err(ApiError::Status { .. })));
        assert!(matches!(decode_read_list::<Plan>(200, "not json"), Err(ApiError::Malformed(_))));
        assert!(matches!(decode_read_list::<Plan>(200, r#"{"result":"success"}"#), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn payload_required_writes() {
        assert_eq!(decode_write_payload::<Plan>(200, r#"{"result":"success"}"#), WriteOutcome::Failure);
        let plan = decode_write_payload::<Plan>(200, r#"{"result":{"id":"p1","name":"Site"}}"#);
        assert_eq!(plan.map(|p| p.id), WriteOutcome::Success("p1".to_string()));
    }
}
