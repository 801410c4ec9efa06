//! In-process tag cache for remote reads.
//!
//! Reads are stored under a [`CacheKey`] together with a snapshot of their
//! tags' generations. Invalidating a tag bumps its generation, so every
//! entry captured before the bump stops being served.

pub mod config;
pub mod directive;
pub mod keys;
mod lock;
pub mod registry;
pub mod store;
pub mod tag_cache;
pub mod trigger;

pub use config::CacheConfig;
pub use directive::{CacheDirective, CacheMode};
pub use keys::CacheKey;
pub use registry::{TagRegistry, TagSnapshot};
pub use tag_cache::{Freshness, InMemoryTagCache, TagCache};
pub use trigger::Revalidator;
