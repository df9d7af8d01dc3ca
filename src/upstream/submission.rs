//! Interpreting the ATS reply to an application submission

use serde_json::Value;

use crate::error::ProxyError;

/// Raw reply to `applicationForm.submit`.
#[derive(Debug, Clone)]
pub struct SubmissionReply {
    pub status: u16,
    pub body: String,
}

/// Accepts the submission only when the HTTP status and the body's
/// `success` flag both say so.
///
/// Each field of the body is read on its own, so an odd `errors` or
/// `errorInfo` never hides the `success` flag. A body that is not JSON
/// counts as `success: false`. Whatever the ATS said is kept for the caller
/// and the logs.
pub fn interpret_submission(reply: SubmissionReply) -> Result<(), ProxyError> {
    let envelope: Value = serde_json::from_str(&reply.body).unwrap_or(Value::Null);
    let http_ok = (200..300).contains(&reply.status);
    let success = envelope
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if http_ok && success {
        return Ok(());
    }

    Err(ProxyError::UpstreamRejected {
        status: reply.status,
        errors: upstream_errors(&envelope),
        code: upstream_code(&envelope),
        body: reply.body,
    })
}

/// The `errors` list, or nothing when it is missing or not an array.
fn upstream_errors(envelope: &Value) -> Vec<String> {
    envelope
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| errors.iter().map(scalar_text).collect())
        .unwrap_or_default()
}

/// `errorInfo.code` as text, whatever scalar type it arrived as.
fn upstream_code(envelope: &Value) -> Option<String> {
    match envelope.get("errorInfo")?.get("code")? {
        Value::Null => None,
        code => Some(scalar_text(code)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> SubmissionReply {
        SubmissionReply {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_needs_status_and_flag() {
        assert!(interpret_submission(reply(200, r#"{"success":true,"results":{}}"#)).is_ok());
    }

    #[test]
    fn test_ok_status_with_failure_flag_is_rejected() {
        let err = interpret_submission(reply(200, r#"{"success":false}"#)).unwrap_err();
        match err {
            ProxyError::UpstreamRejected {
                status,
                errors,
                code,
                body,
            } => {
                assert_eq!(status, 200);
                assert!(errors.is_empty());
                assert!(code.is_none());
                assert_eq!(body, r#"{"success":false}"#);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_with_success_flag_is_rejected() {
        assert!(matches!(
            interpret_submission(reply(500, r#"{"success":true}"#)),
            Err(ProxyError::UpstreamRejected { status: 500, .. })
        ));
    }

    #[test]
    fn test_upstream_errors_and_code_are_kept() {
        let body = r#"{"success":false,"errors":["Email is invalid","Missing resume"],"errorInfo":{"code":"application_form_invalid"}}"#;
        match interpret_submission(reply(200, body)) {
            Err(ProxyError::UpstreamRejected { errors, code, .. }) => {
                assert_eq!(errors, vec!["Email is invalid", "Missing resume"]);
                assert_eq!(code.as_deref(), Some("application_form_invalid"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_is_rejected_with_raw_body() {
        match interpret_submission(reply(502, "<html>Bad Gateway</html>")) {
            Err(ProxyError::UpstreamRejected { errors, body, .. }) => {
                assert!(errors.is_empty());
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_null_errors_do_not_hide_success() {
        assert!(interpret_submission(reply(200, r#"{"success":true,"errors":null}"#)).is_ok());
        assert!(interpret_submission(reply(200, r#"{"success":true,"errors":"none"}"#)).is_ok());
        assert!(
            interpret_submission(reply(200, r#"{"success":true,"errorInfo":{"code":7}}"#)).is_ok()
        );
    }

    #[test]
    fn test_numeric_code_keeps_error_list() {
        let body = r#"{"success":false,"errors":["Bad email"],"errorInfo":{"code":42}}"#;
        match interpret_submission(reply(200, body)) {
            Err(ProxyError::UpstreamRejected { errors, code, .. }) => {
                assert_eq!(errors, vec!["Bad email"]);
                assert_eq!(code.as_deref(), Some("42"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_non_array_errors_are_dropped() {
        match interpret_submission(reply(200, r#"{"success":false,"errors":"Bad email"}"#)) {
            Err(ProxyError::UpstreamRejected { errors, code, .. }) => {
                assert!(errors.is_empty());
                assert!(code.is_none());
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
