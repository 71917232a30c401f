//! Error types for the group sync layer.

use thiserror::Error;

use super::events::Topic;

/// Result type alias for remote calls
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type alias for push-event handling
pub type SyncResult<T> = Result<T, SyncError>;

/// Failure of a remote call made through a `RequestGateway`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Service error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Service {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid response payload: {message}")]
    Decode { message: String },
}

impl GatewayError {
    /// Create a transport-level failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a failure reported by the service, with its message if it sent one
    pub fn service(status: u16, message: Option<String>) -> Self {
        Self::Service { status, message }
    }

    /// Create a failure for a response that could not be decoded
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// The service-supplied message, used verbatim in failure reports.
    ///
    /// Transport and decode failures carry no message meant for users.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Service {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

/// Failure while applying a push event to the cache
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Malformed {topic} payload: {source}")]
    Payload {
        topic: Topic,
        #[source]
        source: serde_json::Error,
    },
}

impl SyncError {
    /// Create a payload error for the given topic
    pub fn payload(topic: Topic, source: serde_json::Error) -> Self {
        Self::Payload { topic, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_only_from_service() {
        let quota = GatewayError::service(403, Some("quota exceeded".to_string()));
        assert_eq!(quota.user_message(), Some("quota exceeded"));

        assert_eq!(GatewayError::service(500, None).user_message(), None);
        assert_eq!(GatewayError::service(500, Some("  ".into())).user_message(), None);
        assert_eq!(GatewayError::network("connection reset").user_message(), None);
        assert_eq!(GatewayError::decode("expected object").user_message(), None);
    }

    #[test]
    fn test_error_display() {
        let error = GatewayError::service(404, None);
        assert_eq!(error.to_string(), "Service error (404): no message");

        let error = GatewayError::network("timed out");
        assert_eq!(error.to_string(), "Network error: timed out");
    }
}
