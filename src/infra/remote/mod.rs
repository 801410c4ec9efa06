//! Outbound calls to the storefront REST API.

pub mod client;
pub mod request;

pub use client::{ApiClient, ClientError};
pub use request::{RequestDescription, RequestError};
