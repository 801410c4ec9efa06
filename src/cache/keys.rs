//! Cache key definitions.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use url::Url;

use crate::domain::session::Session;

/// Identifies one cached read: the fully qualified URL plus, for
/// authenticated reads, a fingerprint of the session so users never share
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    url: String,
    session: Option<u64>,
}

impl CacheKey {
    pub fn for_read(url: &Url, session: Option<&Session>) -> Self {
        Self {
            url: url.as_str().to_string(),
            session: session.map(|s| hash_value(&s.cookie_header())),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Compute a hash for any hashable value.
pub fn hash_value<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
