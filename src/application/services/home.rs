use std::sync::Arc;

use medistore_api_types::{Envelope, Payload};

use crate::application::error::ApiError;
use crate::application::gateway::Gateway;
use crate::cache::CacheDirective;
use crate::domain::params::QueryParams;
use crate::domain::tags::CacheTag;
use crate::infra::remote::RequestDescription;

use super::envelope;

const HOMEPAGE_REVALIDATE_SECS: u64 = 60;

/// The homepage aggregate (featured medicines, categories, banners...).
#[derive(Clone)]
pub struct HomeService {
    gateway: Arc<Gateway>,
}

impl HomeService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn get(&self, directive: CacheDirective) -> Envelope<Payload> {
        envelope(self.try_get(directive).await)
    }

    async fn try_get(&self, directive: CacheDirective) -> Result<Payload, ApiError> {
        let request = RequestDescription::read(
            self.gateway.base(),
            &["home"],
            &QueryParams::new(),
            directive.or(CacheDirective::revalidate_secs(HOMEPAGE_REVALIDATE_SECS)),
            vec![CacheTag::Homepage],
        )?;
        self.gateway
            .fetch_data(&request, "Failed to load homepage")
            .await
    }
}
