use std::sync::Arc;

use medistore_api_types::{CreateReview, Envelope, Page, Payload, ReplyReview};
use reqwest::Method;

use crate::application::error::ApiError;
use crate::application::gateway::{Gateway, to_body};
use crate::cache::CacheDirective;
use crate::domain::params::QueryParams;
use crate::domain::session::Session;
use crate::domain::tags::CacheTag;
use crate::domain::validation::{require_id, require_session, validate_reply, validate_review};
use crate::infra::remote::RequestDescription;

use super::{envelope, user_scoped};

const RESOURCE: &str = "reviews";
const ENTITY: &str = "Review";

#[derive(Clone)]
pub struct ReviewService {
    gateway: Arc<Gateway>,
}

impl ReviewService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Public reviews of one medicine, tagged `reviews-<medicineId>`.
    pub async fn for_medicine(
        &self,
        medicine_id: &str,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(self.try_for_medicine(medicine_id, params, directive).await)
    }

    async fn try_for_medicine(
        &self,
        medicine_id: &str,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Result<Page<Payload>, ApiError> {
        let medicine_id = require_id("Medicine", medicine_id)?;
        let request = RequestDescription::read(
            self.gateway.base(),
            &[RESOURCE, "medicine", medicine_id],
            params,
            directive,
            vec![CacheTag::reviews_for(medicine_id)],
        )?;
        self.gateway
            .read_page(&request, "Failed to fetch reviews")
            .await
    }

    /// Reviews written by the signed-in customer.
    pub async fn mine(
        &self,
        session: Option<&Session>,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(
            self.try_scoped(
                session,
                "myReviews",
                params,
                directive,
                CacheTag::MyReviews,
            )
            .await,
        )
    }

    /// Reviews of the signed-in seller's medicines.
    pub async fn seller(
        &self,
        session: Option<&Session>,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(
            self.try_scoped(
                session,
                "sellerReviews",
                params,
                directive,
                CacheTag::SellerReviews,
            )
            .await,
        )
    }

    async fn try_scoped(
        &self,
        session: Option<&Session>,
        segment: &str,
        params: &QueryParams,
        directive: CacheDirective,
        tag: CacheTag,
    ) -> Result<Page<Payload>, ApiError> {
        let session = require_session(session)?;
        let request = RequestDescription::read(
            self.gateway.base(),
            &[RESOURCE, segment],
            params,
            directive.or(user_scoped()),
            vec![tag],
        )?
        .authenticated(session);
        self.gateway
            .read_page(&request, "Failed to fetch reviews")
            .await
    }

    pub async fn create(
        &self,
        session: Option<&Session>,
        review: &CreateReview,
    ) -> Envelope<Payload> {
        envelope(self.try_create(session, review).await)
    }

    async fn try_create(
        &self,
        session: Option<&Session>,
        review: &CreateReview,
    ) -> Result<Payload, ApiError> {
        validate_review(review)?;
        let session = require_session(session)?;
        let request = RequestDescription::write(
            Method::POST,
            self.gateway.base(),
            &[RESOURCE],
            Some(to_body(review)?),
        )?
        .authenticated(session);
        self.gateway
            .fetch_data(&request, "Failed to submit review")
            .await
    }

    pub async fn reply(
        &self,
        session: Option<&Session>,
        id: &str,
        reply: &ReplyReview,
    ) -> Envelope<Payload> {
        envelope(self.try_reply(session, id, reply).await)
    }

    async fn try_reply(
        &self,
        session: Option<&Session>,
        id: &str,
        reply: &ReplyReview,
    ) -> Result<Payload, ApiError> {
        let id = require_id(ENTITY, id)?;
        validate_reply(reply)?;
        let session = require_session(session)?;
        let request = RequestDescription::write(
            Method::POST,
            self.gateway.base(),
            &[RESOURCE, id, "reply"],
            Some(to_body(reply)?),
        )?
        .authenticated(session);
        self.gateway
            .fetch_data(&request, "Failed to reply to review")
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
            .fetch_data(&request, "Failed to delete review")
            .await
    }
}
