//! Answer extraction from a buffered JSON reply.

use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Fields checked for the answer, first match wins.
pub const ANSWER_FIELDS: [&str; 4] = ["answer", "message", "response", "content"];

/// Picks the answer text out of a relay reply.
///
/// The first of [`ANSWER_FIELDS`] holding a truthy value is used (strings
/// verbatim, anything else serialized). A bare JSON string is used as is.
/// Otherwise the whole document is serialized so nothing is lost. A `null`
/// reply has no fields to look at and is an error.
pub fn extract_answer(reply: &Value) -> ClientResult<String> {
    if reply.is_null() {
        return Err(ClientError::NullReply);
    }

    let answer = ANSWER_FIELDS
        .iter()
        .filter_map(|field| reply.get(field))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| match reply {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    Ok(answer)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn answer(reply: Value) -> String {
        extract_answer(&reply).expect("answer")
    }

    #[test]
    fn answer_wins_over_message() {
        assert_eq!(answer(json!({"message": "x", "answer": "y"})), "y");
    }

    #[test]
    fn falls_through_in_declared_order() {
        assert_eq!(
            answer(json!({"content": "c", "response": "r"})),
            "r"
        );
        assert_eq!(answer(json!({"content": "c"})), "c");
    }

    #[test]
    fn empty_answer_is_skipped() {
        assert_eq!(answer(json!({"answer": "", "message": "m"})), "m");
    }

    #[test]
    fn bare_string_body() {
        assert_eq!(answer(json!("plain answer")), "plain answer");
    }

    #[test]
    fn unknown_shape_is_serialized() {
        assert_eq!(answer(json!({"text": "t"})), r#"{"text":"t"}"#);
    }

    #[test]
    fn non_string_answer_is_serialized() {
        assert_eq!(answer(json!({"answer": {"text": "t"}})), r#"{"text":"t"}"#);
        assert_eq!(answer(json!({"answer": 42})), "42");
    }

    #[test]
    fn null_reply_is_an_error() {
        let err = extract_answer(&Value::Null).unwrap_err();
        assert!(matches!(err, ClientError::NullReply));
    }
}
