//! HTTP transport for [`RequestDescription`]s.

use std::time::Instant;

use metrics::histogram;
use reqwest::{Client, Response, StatusCode, header};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiSettings;
use crate::infra::error::InfraError;

use super::request::RequestDescription;

const METRIC_REQUEST_MS: &str = "medistore_api_request_ms";

/// Ways a call can fail before a usable JSON body is in hand.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} ({status}) is not valid JSON: {source}")]
    Decode {
        url: String,
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
    /// Non-2xx status, or a 2xx body that reports failure itself.
    #[error("API rejected the request with status {status}")]
    Rejected { status: StatusCode, body: Value },
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, InfraError> {
        if settings.base_url.cannot_be_a_base() {
            return Err(InfraError::configuration(format!(
                "API base `{}` cannot carry a resource path",
                settings.base_url
            )));
        }

        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base: settings.base_url.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("medistore/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Perform `request` and return its JSON body.
    pub async fn execute(&self, request: &RequestDescription) -> Result<Value, ClientError> {
        let started = Instant::now();
        let result = self.send(request).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(ClientError::Rejected { .. }) => "rejected",
            Err(_) => "error",
        };
        histogram!(
            METRIC_REQUEST_MS,
            "method" => request.method.to_string(),
            "outcome" => outcome
        )
        .record(started.elapsed().as_secs_f64() * 1000.0);

        match &result {
            Err(err @ ClientError::Rejected { status, .. }) => {
                warn!(method = %request.method, url = %request.url, status = status.as_u16(), "{err}");
            }
            Err(err) => {
                debug!(method = %request.method, url = %request.url, error = %err, "API call failed");
            }
            Ok(_) => {
                debug!(method = %request.method, url = %request.url, "API call succeeded");
            }
        }
        result
    }

    async fn send(&self, request: &RequestDescription) -> Result<Value, ClientError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .header(header::ACCEPT, "application/json");
        if let Some(session) = &request.session {
            builder = builder.header(header::COOKIE, session.cookie_header());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| ClientError::Transport {
            url: request.url.to_string(),
            source,
        })?;
        Self::handle(response).await
    }

    async fn handle(response: Response) -> Result<Value, ClientError> {
        let status = response.status();
        let url = response.url().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            let body = serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            return Err(ClientError::Rejected { status, body });
        }

        let body: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
                url,
                status,
                source,
            })?
        };

        if reports_failure(&body) {
            return Err(ClientError::Rejected { status, body });
        }
        Ok(body)
    }
}

/// A 2xx body can still describe a failure: a non-null `error` field or
/// `success: false`.
pub fn reports_failure(body: &Value) -> bool {
    let Value::Object(map) = body else {
        return false;
    };
    let has_error = map.get("error").is_some_and(|error| match error {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    });
    has_error || map.get("success") == Some(&Value::Bool(false))
}
