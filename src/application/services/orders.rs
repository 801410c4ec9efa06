use std::sync::Arc;

use medistore_api_types::{CreateOrder, Envelope, Page, Payload, UpdateOrderStatus};
use reqwest::Method;

use crate::application::error::ApiError;
use crate::application::gateway::{Gateway, to_body};
use crate::cache::CacheDirective;
use crate::domain::params::QueryParams;
use crate::domain::session::Session;
use crate::domain::tags::CacheTag;
use crate::domain::validation::{require_id, require_session, validate_order, validate_status};
use crate::infra::remote::RequestDescription;

use super::{envelope, user_scoped};

const RESOURCE: &str = "orders";
const ENTITY: &str = "Order";

/// Orders are always read on behalf of someone; every call needs a session.
#[derive(Clone)]
pub struct OrderService {
    gateway: Arc<Gateway>,
}

impl OrderService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Every order (admin).
    pub async fn all(
        &self,
        session: Option<&Session>,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(
            self.try_list(session, &[RESOURCE], params, directive, CacheTag::Orders)
                .await,
        )
    }

    /// The signed-in customer's orders.
    pub async fn mine(
        &self,
        session: Option<&Session>,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(
            self.try_list(
                session,
                &[RESOURCE, "myOrders"],
                params,
                directive,
                CacheTag::MyOrders,
            )
            .await,
        )
    }

    /// Orders containing the signed-in seller's medicines.
    pub async fn seller(
        &self,
        session: Option<&Session>,
        params: &QueryParams,
        directive: CacheDirective,
    ) -> Envelope<Page<Payload>> {
        envelope(
            self.try_list(
                session,
                &[RESOURCE, "sellerOrders"],
                params,
                directive,
                CacheTag::SellerOrders,
            )
            .await,
        )
    }

    async fn try_list(
        &self,
        session: Option<&Session>,
        segments: &[&str],
        params: &QueryParams,
        directive: CacheDirective,
        tag: CacheTag,
    ) -> Result<Page<Payload>, ApiError> {
        let session = require_session(session)?;
        let request = RequestDescription::read(
            self.gateway.base(),
            segments,
            params,
            directive.or(user_scoped()),
            vec![tag],
        )?
        .authenticated(session);
        self.gateway
            .read_page(&request, "Failed to fetch orders")
            .await
    }

    pub async fn get(
        &self,
        session: Option<&Session>,
        id: &str,
        directive: CacheDirective,
    ) -> Envelope<Payload> {
        envelope(self.try_get(session, id, directive).await)
    }

    async fn try_get(
        &self,
        session: Option<&Session>,
        id: &str,
        directive: CacheDirective,
    ) -> Result<Payload, ApiError> {
        let id = require_id(ENTITY, id)?;
        let session = require_session(session)?;
        let request = RequestDescription::read(
            self.gateway.base(),
            &[RESOURCE, id],
            &QueryParams::new(),
            directive.or(user_scoped()),
            vec![CacheTag::Orders],
        )?
        .authenticated(session);
        self.gateway
            .fetch_data(&request, "Failed to fetch order")
            .await
    }

    pub async fn create(&self, session: Option<&Session>, order: &CreateOrder) -> Envelope<Payload> {
        envelope(self.try_create(session, order).await)
    }

    async fn try_create(
        &self,
        session: Option<&Session>,
        order: &CreateOrder,
    ) -> Result<Payload, ApiError> {
        validate_order(order)?;
        let session = require_session(session)?;
        let request = RequestDescription::write(
            Method::POST,
            self.gateway.base(),
            &[RESOURCE],
            Some(to_body(order)?),
        )?
        .authenticated(session);
        self.gateway
            .fetch_data(&request, "Failed to place order")
            .await
    }

    pub async fn cancel(&self, session: Option<&Session>, id: &str) -> Envelope<Payload> {
        envelope(self.try_cancel(session, id).await)
    }

    async fn try_cancel(&self, session: Option<&Session>, id: &str) -> Result<Payload, ApiError> {
        let id = require_id(ENTITY, id)?;
        let session = require_session(session)?;
        let request = RequestDescription::write(
            Method::PATCH,
            self.gateway.base(),
            &[RESOURCE, id, "cancel"],
            None,
        )?
        .authenticated(session);
        self.gateway
            .fetch_data(&request, "Failed to cancel order")
            .await
    }

    pub async fn update_status(
        &self,
        session: Option<&Session>,
        id: &str,
        update: &UpdateOrderStatus,
    ) -> Envelope<Payload> {
        envelope(self.try_update_status(session, id, update).await)
    }

    async fn try_update_status(
        &self,
        session: Option<&Session>,
        id: &str,
        update: &UpdateOrderStatus,
    ) -> Result<Payload, ApiError> {
        let id = require_id(ENTITY, id)?;
        validate_status(update)?;
        let session = require_session(session)?;
        let request = RequestDescription::write(
            Method::PATCH,
            self.gateway.base(),
            &[RESOURCE, id, "status"],
            Some(to_body(update)?),
        )?
        .authenticated(session);
        self.gateway
            .fetch_data(&request, "Failed to update order status")
            .await
    }
}
