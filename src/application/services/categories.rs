use std::sync::Arc;

use medistore_api_types::{CategoryOption, Envelope, Page, Payload};
use reqwest::Method;
use serde_json::Value;

use crate::application::error::ApiError;
use crate::application::gateway::Gateway;
use crate::cache::CacheDirective;
use crate::domain::params::QueryParams;
use crate::domain::session::Session;
use crate::domain::tags::CacheTag;
use crate::domain::validation::{require_id, require_name, require_session};
use crate::infra::remote::RequestDescription;

use super::envelope;

const RESOURCE: &str = "categories";
const ENTITY: &str = "Category";
const DROPDOWN_REVALIDATE_SECS: u64 = 3600;

#[derive(Clone)]
pub struct CategoryService {
    gateway: Arc<Gateway>,
}

impl CategoryService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(
        &self,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(self.try_list(params, directive).await)
    }

    async fn try_list(
        &self,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Result<Page<Payload>, ApiError> {
        let request = RequestDescription::read(
            self.gateway.base(),
            &[RESOURCE],
            params,
            directive,
            vec![CacheTag::Categories],
        )?;
        self.gateway
            .read_page(&request, "Failed to fetch categories")
            .await
    }

    /// Categories shaped as `{value, label}` options.
    pub async fn dropdown(&self, directive: CacheDirective) -> Envelope<Vec<CategoryOption>> {
        envelope(self.try_dropdown(directive).await)
    }

    async fn try_dropdown(
        &self,
        directive: CacheDirective,
    ) -> Result<Vec<CategoryOption>, ApiError> {
        let request = RequestDescription::read(
            self.gateway.base(),
            &[RESOURCE, "dropdown"],
            &QueryParams::new(),
            directive.or(CacheDirective::revalidate_secs(DROPDOWN_REVALIDATE_SECS)),
            vec![CacheTag::Categories],
        )?;
        let data = self
            .gateway
            .fetch_data(&request, "Failed to fetch category options")
            .await?;
        match data {
            Value::Array(items) => Ok(CategoryOption::from_list(&items)),
            other => Err(ApiError::transport(format!(
                "category dropdown returned a non-list body: {other}"
            ))),
        }
    }

    pub async fn get(&self, id: &str) -> Envelope<Payload> {
        envelope(self.try_get(id).await)
    }

    async fn try_get(&self, id: &str) -> Result<Payload, ApiError> {
        let id = require_id(ENTITY, id)?;
        let request = RequestDescription::read(
            self.gateway.base(),
            &[RESOURCE, id],
            &QueryParams::new(),
            CacheDirective::default(),
            vec![CacheTag::Categories],
        )?;
        self.gateway
            .fetch_data(&request, "Failed to fetch category")
            .await
    }

    pub async fn create(&self, session: Option<&Session>, payload: &Payload) -> Envelope<Payload> {
        envelope(self.try_create(session, payload).await)
    }

    async fn try_create(
        &self,
        session: Option<&Session>,
        payload: &Payload,
    ) -> Result<Payload, ApiError> {
        require_name(ENTITY, payload)?;
        let session = require_session(session)?;
        let request = RequestDescription::write(
            Method::POST,
            self.gateway.base(),
            &[RESOURCE],
            Some(payload.clone()),
        )?
        .authenticated(session);
        self.gateway.fetch_data(&request, "Failed to create category").await
    }

    pub async fn update(
        &self,
        session: Option<&Session>,
        id: &str,
        partial: &Payload,
    ) -> Envelope<Payload> {
        envelope(self.try_update(session, id, partial).await)
    }

    async fn try_update(
        &self,
        session: Option<&Session>,
        id: &str,
        partial: &Payload,
    ) -> Result<Payload, ApiError> {
        let id = require_id(ENTITY, id)?;
        let session = require_session(session)?;
        let request = RequestDescription::write(
            Method::PUT,
            self.gateway.base(),
            &[RESOURCE, id],
            Some(partial.clone()),
        )?
        .authenticated(session);
        self.gateway.fetch_data(&request, "Failed to update category").await
    }

    pub async fn delete(&self, session: Option<&Session>, id: &str) -> Envelope<Payload> {
        envelope(self.try_delete(session, id).await)
    }

    async fn try_delete(&self, session: Option<&Session>, id: &str) -> Result<Payload, ApiError> {
        let id = require_id(ENTITY, id)?;
        let session = require_session(session)?;
        let request =
            RequestDescription::write(Method::DELETE, self.gateway.base(), &[RESOURCE, id], None)?
                .authenticated(session);
        self.gateway.fetch_data(&request, "Failed to delete category").await
    }
}
