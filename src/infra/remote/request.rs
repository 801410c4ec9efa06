//! Request descriptions: everything needed to perform, and cache, one call.

use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::cache::{CacheDirective, CacheKey};
use crate::domain::params::QueryParams;
use crate::domain::session::Session;
use crate::domain::tags::CacheTag;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("API base `{0}` cannot carry a resource path")]
    CannotBeABase(String),
}

/// A fully resolved outbound call.
#[derive(Debug, Clone)]
pub struct RequestDescription {
    pub method: Method,
    pub url: Url,
    pub session: Option<Session>,
    pub body: Option<Value>,
    pub directive: CacheDirective,
    pub tags: Vec<CacheTag>,
}

impl RequestDescription {
    /// An unauthenticated read of `segments` below `base` carrying `params`.
    pub fn read(
        base: &Url,
        segments: &[&str],
        params: &QueryParams,
        directive: CacheDirective,
        tags: Vec<CacheTag>,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            method: Method::GET,
            url: resource_url(base, segments, params)?,
            session: None,
            body: None,
            directive,
            tags,
        })
    }

    /// A write. Writes are never cached and carry no tags.
    pub fn write(
        method: Method,
        base: &Url,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            method,
            url: resource_url(base, segments, &QueryParams::new())?,
            session: None,
            body,
            directive: CacheDirective::no_store(),
            tags: Vec::new(),
        })
    }

    /// Forward the caller's session cookie.
    pub fn authenticated(mut self, session: &Session) -> Self {
        self.session = Some(session.clone());
        self
    }

    pub fn is_read(&self) -> bool {
        self.method == Method::GET
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_read(&self.url, self.session.as_ref())
    }
}

/// Join `segments` onto `base`, percent-encoding each one, then attach the
/// non-empty query parameters.
pub fn resource_url(
    base: &Url,
    segments: &[&str],
    params: &QueryParams,
) -> Result<Url, RequestError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| RequestError::CannotBeABase(base.to_string()))?;
        path.pop_if_empty();
        path.extend(segments);
    }

    url.set_query(None);
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params.iter() {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheMode;

    fn base() -> Url {
        Url::parse("https://api.test/api/v1/").expect("base url")
    }

    #[test]
    fn read_drops_empty_params() {
        let params = QueryParams::new()
            .with("categoryId", "c1")
            .with("page", "");
        let request = RequestDescription::read(
            &base(),
            &["medicines"],
            &params,
            CacheDirective::default(),
            vec![CacheTag::Medicines],
        )
        .expect("request");

        assert_eq!(
            request.url.as_str(),
            "https://api.test/api/v1/medicines?categoryId=c1"
        );
        assert_eq!(request.method, Method::GET);
        assert!(request.session.is_none());
        assert_eq!(request.tags, vec![CacheTag::Medicines]);
    }

    #[test]
    fn no_params_means_no_query_string() {
        let url = resource_url(&base(), &["categories", "dropdown"], &QueryParams::new())
            .expect("url");
        assert_eq!(url.as_str(), "https://api.test/api/v1/categories/dropdown");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn identifiers_are_encoded_as_one_segment() {
        let url = resource_url(&base(), &["orders", "a/b c", "cancel"], &QueryParams::new())
            .expect("url");
        assert_eq!(url.path(), "/api/v1/orders/a%2Fb%20c/cancel");
    }

    #[test]
    fn authenticated_read_carries_session_and_partitions_key() {
        let session = Session::new("sid=1").expect("session");
        let anonymous = RequestDescription::read(
            &base(),
            &["orders", "myOrders"],
            &QueryParams::new(),
            CacheDirective::mode(CacheMode::NoStore),
            vec![CacheTag::MyOrders],
        )
        .expect("request");
        let signed_in = anonymous.clone().authenticated(&session);

        assert_eq!(signed_in.session.as_ref(), Some(&session));
        assert_ne!(anonymous.cache_key(), signed_in.cache_key());
        assert_eq!(signed_in.directive.cache, Some(CacheMode::NoStore));
    }

    #[test]
    fn writes_are_uncached_and_untagged() {
        let request = RequestDescription::write(
            Method::PATCH,
            &base(),
            &["orders", "o1", "status"],
            Some(serde_json::json!({"status": "shipped"})),
        )
        .expect("request");
        assert!(!request.is_read());
        assert!(request.tags.is_empty());
        assert_eq!(request.directive.cache, Some(CacheMode::NoStore));
    }

    #[test]
    fn base_without_trailing_slash_still_joins() {
        let base = Url::parse("https://api.test/api").expect("base");
        let url = resource_url(&base, &["home"], &QueryParams::new()).expect("url");
        assert_eq!(url.as_str(), "https://api.test/api/home");
    }
}
