//! Client layer: orchestrates HTTP calls and maps wire ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::codec::ParseError;
use crate::domain::{
    ChannelResponse, ErrorDetails, Experiment, ExperimentResponse, PushPayload, PushResponse,
    SchedulePayload, ScheduleResponse, ValidationError,
};
use crate::wire::{
    decode_channel_response_json, decode_experiment_response_json, decode_push_response_json,
    decode_schedule_response_json, encode_experiment_json, encode_push_payload_json,
    encode_schedule_payload_json,
};

const DEFAULT_BASE_URL: &str = "https://go.urbanairship.com";
const ACCEPT_HEADER: &str = "application/vnd.urbanairship+json; version=3";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    auth: Auth,
}

impl ReqwestTransport {
    fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .basic_auth(&self.auth.app_key, Some(&self.auth.app_secret))
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .apply(self.client.post(url))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.apply(self.client.get(url)).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Application credentials, sent as HTTP basic auth on every request.
pub struct Auth {
    app_key: String,
    app_secret: String,
}

impl Auth {
    /// Create credentials and validate that both parts are non-empty.
    pub fn basic(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let app_key = app_key.into();
        if app_key.trim().is_empty() {
            return Err(ValidationError::Empty { field: "app_key" });
        }
        let app_secret = app_secret.into();
        if app_secret.trim().is_empty() {
            return Err(ValidationError::Empty { field: "app_secret" });
        }
        Ok(Self { app_key, app_secret })
    }

    /// The application key identifying the app.
    pub fn app_key(&self) -> &str {
        &self.app_key
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AirshipClient`].
pub enum AirshipError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The server answered with `ok: false` and an error description.
    #[error("API error: {error}")]
    Api {
        error: String,
        details: Option<ErrorDetails>,
    },

    /// Response body could not be mapped to the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// One of the domain builders rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`AirshipClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct AirshipClientBuilder {
    auth: Auth,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AirshipClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent
    /// override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`AirshipClient`].
    pub fn build(self) -> Result<AirshipClient, AirshipError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| AirshipError::Transport(Box::new(err)))?;

        Ok(AirshipClient {
            base_url: self.base_url,
            http: Arc::new(ReqwestTransport {
                client,
                auth: self.auth,
            }),
        })
    }
}

#[derive(Clone)]
/// High-level API client.
///
/// All requests carry HTTP basic auth and the versioned
/// `application/vnd.urbanairship+json` accept header; request and response
/// bodies are JSON.
pub struct AirshipClient {
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl AirshipClient {
    /// Create a client against the default base URL.
    ///
    /// For more customization, use [`AirshipClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
                auth,
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> AirshipClientBuilder {
        AirshipClientBuilder::new(auth)
    }

    /// Send a push immediately.
    ///
    /// Errors:
    /// - [`AirshipError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`AirshipError::Api`] when the server answers `ok: false`,
    /// - [`AirshipError::Parse`] for unexpected response bodies.
    pub async fn send_push(&self, payload: &PushPayload) -> Result<PushResponse, AirshipError> {
        let url = format!("{}/api/push/", self.base_url);
        let body = self.post(&url, encode_push_payload_json(payload)).await?;
        let parsed = decode_push_response_json(&body)?;
        if !parsed.ok {
            return Err(api_error(parsed.error, parsed.error_details));
        }
        Ok(parsed)
    }

    /// Schedule a push for later delivery.
    pub async fn create_schedule(
        &self,
        payload: &SchedulePayload,
    ) -> Result<ScheduleResponse, AirshipError> {
        let url = format!("{}/api/schedules/", self.base_url);
        let body = self
            .post(&url, encode_schedule_payload_json(payload))
            .await?;
        let parsed = decode_schedule_response_json(&body)?;
        if !parsed.ok {
            return Err(api_error(parsed.error, parsed.error_details));
        }
        Ok(parsed)
    }

    /// Look up a single channel by its id.
    pub async fn lookup_channel(&self, channel_id: &str) -> Result<ChannelResponse, AirshipError> {
        let url = format!("{}/api/channels/{channel_id}", self.base_url);
        tracing::debug!(%url, "channel lookup");
        let response = self
            .http
            .get(&url)
            .await
            .map_err(AirshipError::Transport)?;
        let body = check_status(response)?;
        let parsed = decode_channel_response_json(&body)?;
        if !parsed.ok {
            return Err(api_error(parsed.error, parsed.error_details));
        }
        Ok(parsed)
    }

    /// Create an A/B test experiment.
    pub async fn create_experiment(
        &self,
        experiment: &Experiment,
    ) -> Result<ExperimentResponse, AirshipError> {
        let url = format!("{}/api/experiments/", self.base_url);
        let body = self.post(&url, encode_experiment_json(experiment)).await?;
        let parsed = decode_experiment_response_json(&body)?;
        if !parsed.ok {
            return Err(api_error(parsed.error, parsed.error_details));
        }
        Ok(parsed)
    }

    async fn post(&self, url: &str, body: String) -> Result<String, AirshipError> {
        tracing::debug!(%url, body_len = body.len(), "request");
        let response = self
            .http
            .post_json(url, body)
            .await
            .map_err(AirshipError::Transport)?;
        tracing::debug!(status = response.status, "response");
        check_status(response)
    }
}

fn check_status(response: HttpResponse) -> Result<String, AirshipError> {
    // 4xx bodies still carry the structured `ok`/`error` shape, so keep them
    // for the caller when the status alone is the failure.
    if !(200..=299).contains(&response.status) {
        if let Ok(parsed) = decode_push_response_json(&response.body)
            && !parsed.ok
            && parsed.error.is_some()
        {
            return Err(api_error(parsed.error, parsed.error_details));
        }
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(AirshipError::HttpStatus {
            status: response.status,
            body,
        });
    }
    Ok(response.body)
}

fn api_error(error: Option<String>, details: Option<ErrorDetails>) -> AirshipError {
    AirshipError::Api {
        error: error.unwrap_or_else(|| "request failed".to_owned()),
        details,
    }
}
