//! Data layer for an online pharmacy storefront.
//!
//! Per-domain services call the storefront REST API and answer with a
//! `{data, error}` envelope. Reads are tagged and cached in-process; writes
//! go through [`application::actions::Actions`], which stale the tags a
//! later read depends on.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;

pub use application::Storefront;
pub use medistore_api_types as api_types;
