//! Application layer: data-access services, mutation actions, and the
//! [`Storefront`] that wires them to one gateway.

pub mod actions;
pub mod error;
pub mod gateway;
pub mod pagination;
pub mod services;

use std::sync::Arc;

use crate::cache::{CacheConfig, InMemoryTagCache, Revalidator, TagCache};
use crate::config::Settings;
use crate::domain::mutations::InvalidationPolicy;
use crate::infra::error::InfraError;
use crate::infra::remote::ApiClient;

use self::actions::Actions;
use self::gateway::Gateway;
use self::services::{
    BlogService, CategoryService, HomeService, MedicineService, OrderService, ReviewService,
};

/// Every data-access service plus the mutation actions, sharing one gateway
/// and one tag cache.
#[derive(Clone)]
pub struct Storefront {
    pub categories: CategoryService,
    pub medicines: MedicineService,
    pub orders: OrderService,
    pub reviews: ReviewService,
    pub blogs: BlogService,
    pub home: HomeService,
    pub actions: Actions,
    cache: Arc<dyn TagCache>,
}

impl Storefront {
    /// Build with the in-memory tag cache described by `settings.cache`.
    pub fn from_settings(settings: &Settings) -> Result<Self, InfraError> {
        let config = CacheConfig::from(&settings.cache);
        let policy = config.invalidation_policy;
        let cache: Arc<dyn TagCache> = Arc::new(InMemoryTagCache::new(config));
        Self::with_cache(settings, cache, policy)
    }

    /// Build around an externally supplied cache.
    pub fn with_cache(
        settings: &Settings,
        cache: Arc<dyn TagCache>,
        policy: InvalidationPolicy,
    ) -> Result<Self, InfraError> {
        let client = ApiClient::new(&settings.api)?;
        let gateway = Arc::new(Gateway::new(client, Arc::clone(&cache)));
        Ok(Self::assemble(gateway, policy))
    }

    pub fn assemble(gateway: Arc<Gateway>, policy: InvalidationPolicy) -> Self {
        let cache = gateway.cache();
        let categories = CategoryService::new(Arc::clone(&gateway));
        let medicines = MedicineService::new(Arc::clone(&gateway));
        let orders = OrderService::new(Arc::clone(&gateway));
        let reviews = ReviewService::new(Arc::clone(&gateway));
        let actions = Actions::new(
            categories.clone(),
            medicines.clone(),
            orders.clone(),
            reviews.clone(),
            Revalidator::new(Arc::clone(&cache), policy),
        );

        Self {
            categories,
            medicines,
            orders,
            reviews,
            blogs: BlogService::new(Arc::clone(&gateway)),
            home: HomeService::new(gateway),
            actions,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<dyn TagCache> {
        &self.cache
    }
}
