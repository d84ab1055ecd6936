//! Error type shared by the data access layer, the controller and the executor.

use thiserror::Error;

/// Everything that can go wrong between a keypress and a rendered list.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response (status set, message is the body text) or transport failure.
    #[error("{}", network_message(.status, .message))]
    Network { status: Option<u16>, message: String },

    /// Response arrived but did not parse.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Selection referenced a row that is no longer displayed.
    #[error("selection out of sync: {0}")]
    StateInvariant(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn network_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) if message.is_empty() => format!("HTTP {}", code),
        Some(code) => format!("HTTP {}: {}", code, message),
        None => format!("request failed: {}", message),
    }
}

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_surfaces_status_and_body() {
        let e = DashboardError::http(503, "backend down");
        assert_eq!(e.to_string(), "HTTP 503: backend down");
        assert!(e.is_network());
    }

    #[test]
    fn network_error_without_body() {
        assert_eq!(DashboardError::http(404, "").to_string(), "HTTP 404");
    }

    #[test]
    fn transport_error_has_no_status() {
        let e = DashboardError::transport("connection refused");
        assert!(matches!(e, DashboardError::Network { status: None, .. }));
        assert_eq!(e.to_string(), "request failed: connection refused");
    }

    #[test]
    fn validation_error_is_plain_message() {
        let e = DashboardError::validation("Seal ID is required");
        assert_eq!(e.to_string(), "Seal ID is required");
        assert!(!e.is_network());
    }
}
