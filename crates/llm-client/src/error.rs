use std::time::Duration;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed backend call. One attempt, one error: nothing is retried.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection, TLS or body transfer failure.
    #[error("network error: {0}")]
    Network(#[source] BoxError),

    #[error("backend call timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Non-2xx status or an error payload from the provider.
    #[error("provider error{}: {message}", status_suffix(.status))]
    Provider { status: Option<u16>, message: String },

    /// Response without `choices[0].message.content`, or not JSON at all.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The request could not be built from the messages.
    #[error("invalid backend request: {0}")]
    Request(String),
}

impl BackendError {
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        BackendError::Network(Box::new(err))
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_when_known() {
        let err = BackendError::Provider {
            status: Some(503),
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "provider error (503): overloaded");

        let err = BackendError::Provider {
            status: None,
            message: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: bad key");
    }

    #[test]
    fn timeout_display() {
        let err = BackendError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "backend call timed out after 1.5s");
    }
}
