use super::{ApiError, LeagueApi, MeResponse, SyncUserRequest, UserIdRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

const SYNC_USER: &str = "/auth/sync-user";
const ME: &str = "/auth/me";
const COMPLETE_ONBOARDING: &str = "/auth/complete-onboarding";

/// HTTP client for the league backend
#[derive(Debug, Clone)]
pub struct LeagueClient {
    http_client: Client,
    base_url: String,
}

impl LeagueClient {
    /// Create a client for `base_url` (e.g. `http://localhost:3001/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("courtside/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn post<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(endpoint);
        info!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("POST {} failed: {}", url, e);
                if e.is_timeout() {
                    ApiError::Timeout {
                        endpoint: endpoint.to_string(),
                    }
                } else {
                    ApiError::Transport {
                        endpoint: endpoint.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        debug!("POST {} -> {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                endpoint: endpoint.to_string(),
            });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("POST {} returned {}: {}", url, status, body);
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.post(endpoint, body).await?;
        response.json::<T>().await.map_err(|e| {
            error!("Failed to decode {} response: {}", endpoint, e);
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl LeagueApi for LeagueClient {
    async fn sync_user(&self, request: &SyncUserRequest) -> Result<(), ApiError> {
        self.post(SYNC_USER, request).await?;
        Ok(())
    }

    async fn me(&self, user_id: &str) -> Result<MeResponse, ApiError> {
        let body = UserIdRequest {
            user_id: user_id.to_string(),
        };
        self.post_json(ME, &body).await
    }

    async fn complete_onboarding(&self, user_id: &str) -> Result<(), ApiError> {
        let body = UserIdRequest {
            user_id: user_id.to_string(),
        };
        let response = self.post(COMPLETE_ONBOARDING, &body).await?;

        // Only 200 completes onboarding
        let status = response.status();
        if status != StatusCode::OK {
            error!("POST {} returned {}, expected 200", COMPLETE_ONBOARDING, status);
            return Err(ApiError::Status {
                endpoint: COMPLETE_ONBOARDING.to_string(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}
