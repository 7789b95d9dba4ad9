//! Mapping HTTP and reqwest failures to [`ClientError`].

use std::time::Duration;

use pulse_types::ClientError;

/// Pull the human-readable detail out of an error body.
///
/// The backend answers errors with `{"detail": "..."}` (or, for validation
/// failures, `{"detail": [{"msg": "..."}]}`); anything else is returned as is.
pub(crate) fn error_detail(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    match &json["detail"] {
        serde_json::Value::String(detail) => detail.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item["msg"].as_str())
            .collect::<Vec<_>>()
            .join("; "),
        serde_json::Value::Null => body.trim().to_string(),
        other => other.to_string(),
    }
}

/// Map a non-success HTTP status to a [`ClientError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ClientError {
    let detail = error_detail(body);
    match status.as_u16() {
        400 | 422 => ClientError::BadRequest(detail),
        401 | 403 => ClientError::Unauthorized(detail),
        404 => ClientError::NotFound(detail),
        code @ 500..=599 => ClientError::ServiceUnavailable { status: code, detail },
        code => ClientError::Status { status: code, detail },
    }
}

/// Map a [`reqwest::Error`] to a [`ClientError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(timeout)
    } else if err.is_decode() {
        ClientError::Decode(err.to_string())
    } else {
        ClientError::Network(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn unwraps_fastapi_detail() {
        assert_eq!(error_detail(r#"{"detail":"Member not found"}"#), "Member not found");
        assert_eq!(
            error_detail(r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#),
            "field required"
        );
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn status_mapping() {
        let body = r#"{"detail":"nope"}"#;
        assert!(matches!(
            map_http_status(StatusCode::NOT_FOUND, body),
            ClientError::NotFound(ref d) if d == "nope"
        ));
        assert!(matches!(
            map_http_status(StatusCode::UNPROCESSABLE_ENTITY, body),
            ClientError::BadRequest(_)
        ));
        assert!(matches!(
            map_http_status(StatusCode::FORBIDDEN, body),
            ClientError::Unauthorized(_)
        ));
        let err = map_http_status(StatusCode::BAD_GATEWAY, body);
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(502));
        assert!(matches!(
            map_http_status(StatusCode::CONFLICT, body),
            ClientError::Status { status: 409, .. }
        ));
    }
}
