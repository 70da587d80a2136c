use std::env;

use async_trait::async_trait;
use progress_core::model::{
    ResourceId, ResourceKind, ResourceProgress, ResourceRef, UserResourceProgressDocument,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ProgressApiError;

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Body of `POST /v1-clear-resource-progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearProgressRequest {
    pub resource_id: ResourceId,
    pub resource_type: ResourceKind,
}

impl From<&ResourceRef> for ClearProgressRequest {
    fn from(resource: &ResourceRef) -> Self {
        Self {
            resource_id: resource.id.clone(),
            resource_type: resource.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearProgressResponse {
    pub status: String,
}

impl ClearProgressResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

/// Body of `GET /v1-get-user-stats`, reduced to the learning section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    #[serde(default)]
    pub learning: LearningActivity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningActivity {
    #[serde(default)]
    pub roadmaps: Vec<ResourceProgress>,
    #[serde(default)]
    pub best_practices: Vec<ResourceProgress>,
}

/// Remote progress endpoints.
#[async_trait]
pub trait ProgressApi: Send + Sync {
    /// Reset the user's progress on one resource.
    ///
    /// # Errors
    ///
    /// Returns `ProgressApiError` on transport failure, non-success status or
    /// an empty body.
    async fn clear_resource_progress(
        &self,
        request: &ClearProgressRequest,
    ) -> Result<ClearProgressResponse, ProgressApiError>;

    /// Progress counts for every resource the user has touched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressApiError` if the request or decoding fails.
    async fn fetch_user_activity(&self) -> Result<UserActivity, ProgressApiError>;

    /// Progress documents shown on the learning dashboard.
    ///
    /// # Errors
    ///
    /// Returns `ProgressApiError` if the request or decoding fails.
    async fn fetch_learning_progress(
        &self,
    ) -> Result<Vec<UserResourceProgressDocument>, ProgressApiError>;
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Reads `PROGRESS_API_URL` and `PROGRESS_API_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("PROGRESS_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        Self::new(base_url).with_token(env::var("PROGRESS_API_TOKEN").ok())
    }

    #[must_use]
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.trim_end_matches('/'))
    }
}

/// `ProgressApi` over HTTP with JSON bodies.
#[derive(Clone)]
pub struct HttpProgressApi {
    client: Client,
    config: ApiConfig,
}

impl HttpProgressApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ProgressApiError> {
        let request = match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ProgressApiError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        decode_body(&body)
    }
}

#[async_trait]
impl ProgressApi for HttpProgressApi {
    async fn clear_resource_progress(
        &self,
        request: &ClearProgressRequest,
    ) -> Result<ClearProgressResponse, ProgressApiError> {
        let url = self.config.endpoint("v1-clear-resource-progress");
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn fetch_user_activity(&self) -> Result<UserActivity, ProgressApiError> {
        let url = self.config.endpoint("v1-get-user-stats");
        self.send_json(self.client.get(url)).await
    }

    async fn fetch_learning_progress(
        &self,
    ) -> Result<Vec<UserResourceProgressDocument>, ProgressApiError> {
        let url = self.config.endpoint("v1-get-user-all-progress");
        self.send_json(self.client.get(url)).await
    }
}

/// A blank or `null` body counts as a missing response.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ProgressApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(ProgressApiError::EmptyResponse);
    }
    Ok(serde_json::from_str(trimmed)?)
}
