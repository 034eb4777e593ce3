use serde::Deserialize;

use super::ApiError;

/// Fallback when a failed response carries no message at all.
const GENERIC_FAILURE: &str = "The request could not be completed";

/// The response envelope every backend endpoint shares: a boolean `success`
/// flag with either a `data` payload or a failure message. On failure the
/// nested `error.message` is preferred over the top-level `message`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Normalize into a tagged result. A successful envelope without a
    /// payload is an invalid response for endpoints that promise one.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            self.data.ok_or_else(|| {
                ApiError::InvalidResponse("successful response carried no data".to_string())
            })
        } else {
            Err(ApiError::Rejected(failure_message(self.error, self.message)))
        }
    }

    /// Normalize a mutation acknowledgement that may carry no payload.
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(failure_message(self.error, self.message)))
        }
    }

    /// Whether the body carries any backend-authored failure text, nested
    /// or top-level.
    pub fn has_message(&self) -> bool {
        self.error.as_ref().is_some_and(|body| body.message.is_some()) || self.message.is_some()
    }
}

fn failure_message(error: Option<ErrorBody>, message: Option<String>) -> String {
    error
        .and_then(|body| body.message)
        .or(message)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Envelope<Vec<String>> {
        serde_json::from_str(json).expect("envelope should parse")
    }

    #[test]
    fn test_success_yields_payload() {
        let envelope = parse(r#"{"success": true, "data": ["a", "b"]}"#);
        assert_eq!(envelope.into_result().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_error_message_preferred() {
        let envelope = parse(
            r#"{"success": false, "message": "outer", "error": {"message": "inner detail"}}"#,
        );
        match envelope.into_result() {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "inner detail"),
            other => panic!("expected Rejected, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_top_level_message_when_no_nested() {
        let envelope = parse(r#"{"success": false, "message": "category exists"}"#);
        match envelope.into_result() {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "category exists"),
            other => panic!("expected Rejected, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_generic_fallback_when_no_message() {
        let envelope = parse(r#"{"success": false}"#);
        match envelope.into_result() {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, GENERIC_FAILURE),
            other => panic!("expected Rejected, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_success_without_data_is_invalid_for_payload() {
        let envelope = parse(r#"{"success": true}"#);
        assert!(matches!(
            envelope.into_result(),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_ack_accepts_missing_data() {
        let envelope = parse(r#"{"success": true}"#);
        assert!(envelope.into_ack().is_ok());
    }
}
