//! Mapping of HTTP failures onto the core's gateway errors

use serde_json::Value;
use switchboard_groups::GatewayError;

/// Transport failure: connection, timeout, or an unreadable body
pub fn network_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::network(format!("request timed out: {error}"))
    } else {
        GatewayError::network(error.to_string())
    }
}

/// Non-success status, keeping the service's own message when the body has one.
///
/// The service answers errors with `{ "message": .. }`; some routes use
/// `{ "error": .. }` instead.
pub fn service_error(status: u16, body: &[u8]) -> GatewayError {
    let message = serde_json::from_slice::<Value>(body).ok().and_then(|body| {
        body.get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    });

    GatewayError::service(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_prefers_message_field() {
        let error = service_error(403, br#"{"message":"quota exceeded","error":"Forbidden"}"#);
        assert_eq!(error.user_message(), Some("quota exceeded"));

        let error = service_error(400, br#"{"error":"name required"}"#);
        assert_eq!(error.user_message(), Some("name required"));
    }

    #[test]
    fn test_service_error_without_json_body() {
        let error = service_error(502, b"<html>Bad Gateway</html>");
        assert_eq!(error, GatewayError::service(502, None));

        let error = service_error(500, br#"{"message":42}"#);
        assert_eq!(error.user_message(), None);
    }
}
