use std::sync::Arc;

use medistore_api_types::{Envelope, Page, Payload};

use crate::application::error::ApiError;
use crate::application::gateway::Gateway;
use crate::cache::CacheDirective;
use crate::domain::params::QueryParams;
use crate::domain::tags::CacheTag;
use crate::domain::validation::require_id;
use crate::infra::remote::RequestDescription;

use super::envelope;

const RESOURCE: &str = "posts";

/// Health articles. Read-only; nothing invalidates `blogs`, so entries age
/// out through their revalidate window.
#[derive(Clone)]
pub struct BlogService {
    gateway: Arc<Gateway>,
}

impl BlogService {
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
            vec![CacheTag::Blogs],
        )?;
        self.gateway
            .read_page(&request, "Failed to fetch blog posts")
            .await
    }

    pub async fn get(&self, id: &str, directive: CacheDirective) -> Envelope<Payload> {
        envelope(self.try_get(id, directive).await)
    }

    async fn try_get(&self, id: &str, directive: CacheDirective) -> Result<Payload, ApiError> {
        let id = require_id("Blog", id)?;
        let request = RequestDescription::read(
            self.gateway.base(),
            &[RESOURCE, id],
            &QueryParams::new(),
            directive,
            vec![CacheTag::Blogs],
        )?;
        self.gateway
            .fetch_data(&request, "Failed to fetch blog post")
            .await
    }
}
