//! League backend API.
//!
//! Only the three account endpoints the router depends on live here. The
//! rest of the backend is consumed by individual screens.

pub mod client;

pub use client::LeagueClient;

use crate::router::UserRole;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by backend calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout.
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Connection-level failure.
    #[error("Could not reach {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// The backend has no record for the request (404).
    #[error("{endpoint} returned 404 Not Found")]
    NotFound { endpoint: String },

    /// Any other non-success status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Short text for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout { .. } => "The server took too long to respond".to_string(),
            ApiError::Transport { .. } => "Could not reach the server".to_string(),
            ApiError::NotFound { .. } => "Your account could not be found".to_string(),
            ApiError::Status { status, .. } => format!("The server returned an error ({})", status),
            ApiError::Decode { .. } => "The server sent an unexpected response".to_string(),
        }
    }
}

/// Body of `POST /auth/sync-user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserRequest {
    pub stack_user_id: String,
    pub email: String,
    pub display_name: String,
}

/// Body of `POST /auth/me` and `POST /auth/complete-onboarding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: String,
}

/// Response of `POST /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub onboarding_completed: bool,
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Account endpoints of the league backend.
#[async_trait]
pub trait LeagueApi: Send + Sync {
    /// `POST /auth/sync-user`
    async fn sync_user(&self, request: &SyncUserRequest) -> Result<(), ApiError>;

    /// `POST /auth/me`
    async fn me(&self, user_id: &str) -> Result<MeResponse, ApiError>;

    /// `POST /auth/complete-onboarding`
    async fn complete_onboarding(&self, user_id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies_use_camel_case() {
        let body = SyncUserRequest {
            stack_user_id: "u1".to_string(),
            email: "sam@example.com".to_string(),
            display_name: "Sam".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stackUserId"], "u1");
        assert_eq!(json["displayName"], "Sam");

        let json = serde_json::to_value(UserIdRequest {
            user_id: "u1".to_string(),
        })
        .unwrap();
        assert_eq!(json["userId"], "u1");
    }

    #[test]
    fn test_me_response_role_is_optional() {
        let me: MeResponse = serde_json::from_str(r#"{"onboardingCompleted":true}"#).unwrap();
        assert!(me.onboarding_completed);
        assert_eq!(me.role, None);

        let me: MeResponse =
            serde_json::from_str(r#"{"onboardingCompleted":false,"role":"captain"}"#).unwrap();
        assert_eq!(me.role, Some(UserRole::Captain));
    }

    #[test]
    fn test_not_found_classification() {
        let err = ApiError::NotFound {
            endpoint: "/auth/me".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!ApiError::Timeout {
            endpoint: "/auth/me".to_string()
        }
        .is_not_found());
    }
}
