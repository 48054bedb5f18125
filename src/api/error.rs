use thiserror::Error;

/// Failure of a single gateway call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, DNS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(String),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds the error for a rejected response from its raw body.
    ///
    /// The message is taken from the JSON `detail` field when the body carries
    /// one, otherwise it falls back to a generic message with the status code.
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|json| match json.get("detail") {
                None | Some(serde_json::Value::Null) => None,
                Some(serde_json::Value::String(s)) if s.is_empty() => None,
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) => Some(other.to_string()),
            });
        let message = detail.unwrap_or_else(|| format!("HTTP error! status: {}", status));
        ApiError::Http { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_becomes_message() {
        let err = ApiError::from_error_body(404, br#"{"detail":"not found"}"#);
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn structured_detail_is_serialized() {
        let err = ApiError::from_error_body(422, br#"{"detail":[{"msg":"field required"}]}"#);
        assert!(err.to_string().contains("field required"));
    }

    #[test]
    fn unparseable_body_keeps_status_code() {
        let err = ApiError::from_error_body(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn json_without_detail_falls_back() {
        let err = ApiError::from_error_body(500, br#"{"error":"boom"}"#);
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }
}
