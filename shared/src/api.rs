//! API client types and trait definitions
//!
//! This module defines the collaborator contract that is implemented
//! by both native (reqwest) and WASM (gloo-net) HTTP clients.

use serde::{Deserialize, Serialize};

// Re-export types from parent module for convenience
pub use crate::{
    DiagnoseRequest, DiagnoseResponse, FollowupRequest, FollowupResponse, HealthQaRequest,
    HealthQaResponse, SuggestRequest, SuggestResponse, SymptomListResponse,
};

/// API error types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ApiError {
    /// Network or connection error
    Network(String),
    /// Server returned an error status without a usable message
    Server { status: u16, message: String },
    /// Failed to parse response
    Parse(String),
    /// Server rejected the input and said why (4xx with an `error` body)
    Rejected(String),
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    ///
    /// The backend answers bad input with `{"error": "..."}` and a 4xx code;
    /// those become `Rejected` so the message can be shown to the user.
    pub fn from_status(status: u16, body: &str) -> Self {
        if (400..500).contains(&status) {
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
                if !parsed.error.trim().is_empty() {
                    return ApiError::Rejected(parsed.error);
                }
            }
        }
        ApiError::Server {
            status,
            message: if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Rejected(msg) => write!(f, "Rejected: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error body returned by the backend on 4xx/5xx
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API endpoint definitions
pub mod endpoints {
    pub const DIAGNOSE: &str = "/api/diagnose";
    pub const DIAGNOSE_FOLLOWUP: &str = "/api/diagnose_followup";
    pub const HEALTH_QA: &str = "/api/health_qa";
    pub const SUGGEST_SYMPTOMS: &str = "/api/suggest_symptoms";
    pub const GET_SYMPTOMS: &str = "/api/get_symptoms";
}

/// Trait defining the health chat backend API
///
/// This trait can be implemented by both native and WASM HTTP clients.
/// All methods are async and return Result<T, ApiError>.
#[allow(async_fn_in_trait)]
pub trait HealthChatApi {
    /// Submit symptoms (free text or structured form) for diagnosis
    async fn diagnose(&self, req: &DiagnoseRequest) -> Result<DiagnoseResponse, ApiError>;

    /// Submit follow-up answers for a held disease hypothesis
    async fn diagnose_followup(
        &self,
        req: &FollowupRequest,
    ) -> Result<FollowupResponse, ApiError>;

    /// Ask a free-text health question
    async fn health_qa(&self, req: &HealthQaRequest) -> Result<HealthQaResponse, ApiError>;

    /// Look up symptom tokens matching a partial input
    async fn suggest_symptoms(&self, req: &SuggestRequest) -> Result<SuggestResponse, ApiError>;

    /// List every symptom token the backend knows about
    async fn list_symptoms(&self) -> Result<SymptomListResponse, ApiError>;
}

/// Configuration for creating an API client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClientConfig {
    /// Base URL of the server (e.g., "http://localhost:5000")
    pub base_url: String,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_from_error_body() {
        let err = ApiError::from_status(400, r#"{"error": "Enter valid symptom or disease"}"#);
        assert_eq!(
            err,
            ApiError::Rejected("Enter valid symptom or disease".to_string())
        );
    }

    #[test]
    fn test_server_error_keeps_status() {
        let err = ApiError::from_status(500, r#"{"error": "Internal server error"}"#);
        assert!(matches!(err, ApiError::Server { status: 500, .. }));

        let err = ApiError::from_status(404, "");
        assert_eq!(
            err,
            ApiError::Server {
                status: 404,
                message: "Unknown error".to_string()
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(format!("{}", err), "Network error: connection refused");

        let err = ApiError::Server {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(format!("{}", err), "Server error (502): bad gateway");
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ApiClientConfig::new("http://localhost:5000/");
        assert_eq!(
            config.url(endpoints::DIAGNOSE),
            "http://localhost:5000/api/diagnose"
        );
    }
}
