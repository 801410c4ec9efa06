//! Per-domain data-access services.
//!
//! Every public operation is an error boundary: it returns an [`Envelope`]
//! and never an `Err`. Local guards run before any request is built.

mod blogs;
mod categories;
mod home;
mod medicines;
mod orders;
mod reviews;

use medistore_api_types::Envelope;

pub use blogs::BlogService;
pub use categories::CategoryService;
pub use home::HomeService;
pub use medicines::MedicineService;
pub use orders::OrderService;
pub use reviews::ReviewService;

use crate::cache::{CacheDirective, CacheMode};

use super::error::ApiError;

/// Default directive for reads scoped to the signed-in user.
pub(crate) fn user_scoped() -> CacheDirective {
    CacheDirective::mode(CacheMode::NoStore)
}

pub(crate) fn envelope<T>(result: Result<T, ApiError>) -> Envelope<T> {
    result.map_err(ApiError::into_body).into()
}
