//! gloo-net implementation of the backend API

use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::api::endpoints;
use shared::{
    ApiClientConfig, ApiError, DiagnoseRequest, DiagnoseResponse, FollowupRequest,
    FollowupResponse, HealthChatApi, HealthQaRequest, HealthQaResponse, SuggestRequest,
    SuggestResponse, SymptomListResponse,
};

use crate::utils;

#[derive(Debug, Clone)]
pub struct WasmApiClient {
    config: ApiClientConfig,
}

impl WasmApiClient {
    pub fn new(config: ApiClientConfig) -> Self {
        Self { config }
    }

    /// Talk to the server that served the page
    pub fn same_origin() -> Self {
        Self::new(ApiClientConfig::new(utils::get_base_url()))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = Request::post(&self.config.url(endpoint))
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

impl HealthChatApi for WasmApiClient {
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
        let response = Request::get(&self.config.url(endpoints::GET_SYMPTOMS))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        handle_response(response).await
    }
}
