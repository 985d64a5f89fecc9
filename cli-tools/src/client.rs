//! Native HTTP client implementation using reqwest

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::api::{endpoints, ApiClientConfig, ApiError, HealthChatApi};
use shared::{
    DiagnoseRequest, DiagnoseResponse, FollowupRequest, FollowupResponse, HealthQaRequest,
    HealthQaResponse, SuggestRequest, SuggestResponse, SymptomListResponse,
};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Native API client using reqwest
pub struct NativeApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl NativeApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config: ApiClientConfig::new(base_url),
        })
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.config.url(endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl HealthChatApi for NativeApiClient {
    async fn diagnose(&self, req: &DiagnoseRequest) -> Result<DiagnoseResponse, ApiError> {
        self.post(endpoints::DIAGNOSE, req).await
    }

    async fn diagnose_followup(
        &self,
        req: &FollowupRequest,
    ) -> Result<FollowupResponse, ApiError> {
        self.post(endpoints::DIAGNOSE_FOLLOWUP, req).await
    }

    async fn health_qa(&self, req: &HealthQaRequest) -> Result<HealthQaResponse, ApiError> {
        self.post(endpoints::HEALTH_QA, req).await
    }

    async fn suggest_symptoms(&self, req: &SuggestRequest) -> Result<SuggestResponse, ApiError> {
        self.post(endpoints::SUGGEST_SYMPTOMS, req).await
    }

    async fn list_symptoms(&self) -> Result<SymptomListResponse, ApiError> {
        let url = self.config.url(endpoints::GET_SYMPTOMS);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.handle_response(response).await
    }
}
