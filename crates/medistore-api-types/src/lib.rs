//! Shared request and response types for the medistore pharmacy API layer.
//!
//! Every data-access and mutation operation returns an [`Envelope`]. Domain
//! payloads the layer does not interpret travel as [`Payload`].

mod catalog;
mod envelope;
mod orders;
mod page;
mod reviews;

pub use catalog::CategoryOption;
pub use envelope::{Envelope, ErrorBody, codes};
pub use orders::{CreateOrder, OrderItem, UpdateOrderStatus};
pub use page::{Page, PageMeta};
pub use reviews::{CreateReview, ReplyReview};

/// Opaque JSON payload passed through unchanged (medicine, order, blog, ...).
pub type Payload = serde_json::Value;
