use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::model::{
    ActivitiesResponse, CreateSessionRequest, SendMessageRequest, Session, SessionsResponse,
    Source, SourcesResponse,
};

/// Production endpoint of the Jules API.
pub const API_BASE_URL: &str = "https://jules.googleapis.com/v1alpha";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Operations the client layer needs from the Jules API.
///
/// Implemented over HTTP by [`JulesClient`] and in memory by
/// [`crate::api::mock::MockJulesApi`].
#[async_trait]
pub trait JulesApi: Send + Sync {
    /// `GET /sources`
    async fn list_sources(&self) -> Result<SourcesResponse, ApiError>;

    /// `GET /{source_name}`; includes the branch list.
    async fn get_source(&self, source_name: &str) -> Result<Source, ApiError>;

    /// `GET /sessions`
    async fn list_sessions(&self) -> Result<SessionsResponse, ApiError>;

    /// `POST /sessions`
    async fn create_session(&self, request: &CreateSessionRequest) -> Result<Session, ApiError>;

    /// `GET /sessions/{id}/activities`
    async fn list_activities(&self, session_id: &str) -> Result<ActivitiesResponse, ApiError>;

    /// `POST /sessions/{id}:sendMessage`
    async fn send_message(&self, session_id: &str, prompt: &str) -> Result<(), ApiError>;
}

/// HTTP client for the Jules API.
#[derive(Clone)]
pub struct JulesClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for JulesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JulesClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl JulesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue one request and return the response body as JSON.
    ///
    /// An empty 2xx body is returned as `Value::Null`.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "Jules API request");

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(body) = body {
            // `json` also sets Content-Type: application/json
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(method = %method, url = %url, error = %err, "Jules API request failed");
            ApiError::Network(err)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                method = %method,
                url = %url,
                status = %status,
                "Jules API returned an error status"
            );
            return Err(ApiError::http(status, text));
        }

        tracing::debug!(method = %method, url = %url, status = %status, "Jules API response");
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.request::<Value>(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }
}

#[async_trait]
impl JulesApi for JulesClient {
    async fn list_sources(&self) -> Result<SourcesResponse, ApiError> {
        self.get("sources").await
    }

    async fn get_source(&self, source_name: &str) -> Result<Source, ApiError> {
        self.get(source_name).await
    }

    async fn list_sessions(&self) -> Result<SessionsResponse, ApiError> {
        self.get("sessions").await
    }

    async fn create_session(&self, request: &CreateSessionRequest) -> Result<Session, ApiError> {
        let value = self.post("sessions", request).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn list_activities(&self, session_id: &str) -> Result<ActivitiesResponse, ApiError> {
        self.get(&format!("sessions/{}/activities", session_id))
            .await
    }

    async fn send_message(&self, session_id: &str, prompt: &str) -> Result<(), ApiError> {
        let request = SendMessageRequest {
            prompt: prompt.to_string(),
        };
        // The response body carries nothing we use.
        self.post(&format!("sessions/{}:sendMessage", session_id), &request)
            .await?;
        Ok(())
    }
}
