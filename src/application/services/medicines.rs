use std::sync::Arc;

use medistore_api_types::{Envelope, Page, Payload};
use reqwest::Method;

use crate::application::error::ApiError;
use crate::application::gateway::Gateway;
use crate::cache::CacheDirective;
use crate::domain::params::QueryParams;
use crate::domain::session::Session;
use crate::domain::tags::CacheTag;
use crate::domain::validation::{require_id, require_name, require_session};
use crate::infra::remote::RequestDescription;

use super::{envelope, user_scoped};

const RESOURCE: &str = "medicines";
const ENTITY: &str = "Medicine";

#[derive(Clone)]
pub struct MedicineService {
    gateway: Arc<Gateway>,
}

impl MedicineService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Public catalogue listing (search, categoryId, page, limit, sort...).
    pub async fn list(
        &self,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(self.try_list(None, &[RESOURCE], params, directive).await)
    }

    /// The signed-in seller's own medicines.
    pub async fn mine(
        &self,
        session: Option<&Session>,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        let result = match require_session(session) {
            Ok(session) => {
                self.try_list(
                    Some(session),
                    &[RESOURCE, "myMedicines"],
                    params,
                    directive.or(user_scoped()),
                )
                .await
            }
            Err(err) => Err(err.into()),
        };
        envelope(result)
    }

    async fn try_list(
        &self,
        session: Option<&Session>,
        segments: &[&str],
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Result<Page<Payload>, ApiError> {
        let mut request = RequestDescription::read(
            self.gateway.base(),
            segments,
            params,
            directive,
            vec![CacheTag::Medicines],
        )?;
        if let Some(session) = session {
            request = request.authenticated(session);
        }
        self.gateway
            .read_page(&request, "Failed to fetch medicines")
            .await
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
            vec![CacheTag::Medicines],
        )?;
        self.gateway
            .fetch_data(&request, "Failed to fetch medicine")
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
        self.gateway
            .fetch_data(&request, "Failed to create medicine")
            .await
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
        self.gateway
            .fetch_data(&request, "Failed to update medicine")
            .await
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
        self.gateway
            .fetch_data(&request, "Failed to delete medicine")
            .await
    }
}
