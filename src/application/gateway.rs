//! Cache-aware execution of request descriptions.

use std::sync::Arc;

use medistore_api_types::{Page, Payload};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::cache::{CacheMode, Freshness, TagCache};
use crate::infra::remote::{ApiClient, RequestDescription};

use super::error::ApiError;

/// Runs reads through the tag cache and writes straight to the API.
pub struct Gateway {
    client: ApiClient,
    cache: Arc<dyn TagCache>,
}

impl Gateway {
    pub fn new(client: ApiClient, cache: Arc<dyn TagCache>) -> Self {
        Self { client, cache }
    }

    pub fn base(&self) -> &Url {
        self.client.base()
    }

    pub fn cache(&self) -> Arc<dyn TagCache> {
        Arc::clone(&self.cache)
    }

    /// Perform `request`, returning the raw JSON body.
    ///
    /// Reads consult the cache according to their directive. The tag
    /// snapshot is taken before the fetch so a write landing mid-flight
    /// keeps the result out of the cache.
    pub async fn call(
        &self,
        request: &RequestDescription,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        if !request.is_read() {
            return self.send(request, fallback).await;
        }

        let mode = request.directive.effective_mode();
        let key = request.cache_key();

        if mode.may_serve_cached() {
            let freshness = if mode == CacheMode::ForceCache {
                Freshness::IgnoreWindow
            } else {
                Freshness::WithinWindow
            };
            if let Some(body) = self.cache.lookup(&key, freshness) {
                return Ok(body);
            }
        }

        if !mode.may_store() {
            debug!(url = %request.url, "read bypasses cache");
            return self.send(request, fallback).await;
        }

        let snapshot = self.cache.snapshot(&request.tags);
        let body = self.send(request, fallback).await?;
        if !body.is_null() {
            self.cache
                .store(key, snapshot, request.directive.revalidate, body.clone());
        }
        Ok(body)
    }

    /// Perform a single-item call, unwrapping a `data` field when present.
    /// A `null` payload counts as a failure.
    pub async fn fetch_data(
        &self,
        request: &RequestDescription,
        fallback: &str,
    ) -> Result<Payload, ApiError> {
        let data = unwrap_data(self.call(request, fallback).await?);
        if data.is_null() {
            return Err(ApiError::EmptyPayload {
                message: fallback.to_string(),
            });
        }
        Ok(data)
    }

    /// Read a list endpoint into a [`Page`].
    pub async fn read_page(
        &self,
        request: &RequestDescription,
        fallback: &str,
    ) -> Result<Page<Payload>, ApiError> {
        let body = self.call(request, fallback).await?;
        Page::from_body(body).map_err(ApiError::transport)
    }

    async fn send(&self, request: &RequestDescription, fallback: &str) -> Result<Value, ApiError> {
        self.client
            .execute(request)
            .await
            .map_err(|err| ApiError::from_client(err, fallback))
    }
}

/// The envelope's data: the body's non-null `data` field, else the body.
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Serialize a typed payload for a write.
pub fn to_body<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(ApiError::transport)
}
