//! Request shaping and envelope behaviour of the data-access services.

mod common;

use httpmock::MockServer;
use medistore::api_types::{CategoryOption, codes};
use medistore::cache::CacheDirective;
use medistore::domain::mutations::InvalidationPolicy;
use medistore::domain::params::QueryParams;
use serde_json::json;

use common::{UNROUTABLE, session, storefront};

#[tokio::test]
async fn empty_filters_never_reach_the_query_string() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/medicines")
            .query_param("categoryId", "c1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[{"id":"m1"},{"id":"m2"}],"meta":{"page":1,"limit":2,"total":7}}"#);
    });
    let (store, _) = storefront(&server.base_url(), InvalidationPolicy::OnSuccess);

    let params = QueryParams::from_json(&json!({"categoryId": "c1", "page": "", "search": null}));
    assert_eq!(params.len(), 1);

    let envelope = store
        .medicines
        .list(&params, CacheDirective::no_store())
        .await;
    let page = envelope.data().expect("page");
    assert_eq!(page.data.len(), 2);
    assert_eq!(
        page.meta.as_ref().and_then(|meta| meta.total_pages()),
        Some(4)
    );
    mock.assert();
}

#[tokio::test]
async fn single_items_are_unwrapped_from_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/medicines/m1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"id":"m1","name":"Paracetamol"}}"#);
    });
    server.mock(|when, then| {
        when.method("GET").path("/home");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"featured":[],"banners":[]}"#);
    });
    let (store, _) = storefront(&server.base_url(), InvalidationPolicy::OnSuccess);

    let medicine = store.medicines.get(" m1 ").await;
    assert_eq!(
        medicine.data(),
        Some(&json!({"id": "m1", "name": "Paracetamol"}))
    );
    assert!(medicine.error().is_none());

    let home = store.home.get(CacheDirective::default()).await;
    assert_eq!(home.data(), Some(&json!({"featured": [], "banners": []})));
}

#[tokio::test]
async fn dropdown_is_shaped_into_options() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/categories/dropdown");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[{"_id":"c1","name":"Vitamins"},{"id":"c2","title":"Cold & Flu"},{"name":"orphan"}]}"#);
    });
    let (store, _) = storefront(&server.base_url(), InvalidationPolicy::OnSuccess);

    let envelope = store.categories.dropdown(CacheDirective::default()).await;
    let options = envelope.data().expect("options");
    assert_eq!(
        options,
        &vec![
            CategoryOption {
                value: "c1".into(),
                label: "Vitamins".into()
            },
            CategoryOption {
                value: "c2".into(),
                label: "Cold & Flu".into()
            },
        ]
    );
}

#[tokio::test]
async fn reviews_for_medicine_use_the_medicine_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/reviews/medicine/m7")
            .query_param("limit", "5");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id":"r1"}]"#);
    });
    let (store, _) = storefront(&server.base_url(), InvalidationPolicy::OnSuccess);

    let params = QueryParams::new().with("limit", 5);
    let envelope = store
        .reviews
        .for_medicine("m7", &params, CacheDirective::default())
        .await;
    assert_eq!(envelope.data().map(|page| page.data.len()), Some(1));
    mock.assert();
}

#[tokio::test]
async fn authenticated_reads_forward_the_cookie() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/orders/myOrders")
            .header("cookie", "token=alice");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[{"id":"o1"}]}"#);
    });
    let (store, cache) = storefront(&server.base_url(), InvalidationPolicy::OnSuccess);

    let envelope = store
        .orders
        .mine(
            Some(&session("token=alice")),
            &QueryParams::new(),
            CacheDirective::default(),
        )
        .await;
    assert!(envelope.is_ok());
    assert_eq!(cache.len(), 0, "user-scoped reads default to no-store");
    mock.assert();
}

#[tokio::test]
async fn user_scoped_reads_require_a_session() {
    let (store, _) = storefront(UNROUTABLE, InvalidationPolicy::OnSuccess);
    let envelope = store
        .reviews
        .seller(None, &QueryParams::new(), CacheDirective::default())
        .await;
    let error = envelope.error().expect("unauthenticated");
    assert_eq!(error.message, "You must be logged in");
    assert_eq!(error.code.as_deref(), Some(codes::UNAUTHENTICATED));
}

#[tokio::test]
async fn remote_rejection_prefers_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/medicines/missing");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"success":false,"message":"Medicine not found"}"#);
    });
    server.mock(|when, then| {
        when.method("GET").path("/posts/p1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"error":"Post is archived"}"#);
    });
    let (store, cache) = storefront(&server.base_url(), InvalidationPolicy::OnSuccess);

    let missing = store.medicines.get("missing").await;
    let error = missing.error().expect("not found");
    assert_eq!(error.message, "Medicine not found");
    assert_eq!(error.code.as_deref(), Some("HTTP_404"));
    assert!(missing.data().is_none());

    let archived = store.blogs.get("p1", CacheDirective::default()).await;
    assert_eq!(
        archived.error().map(|e| e.message.as_str()),
        Some("Post is archived")
    );
    assert_eq!(cache.len(), 0, "failed reads are never cached");
}

#[tokio::test]
async fn transport_failure_is_generic() {
    let (store, _) = storefront(UNROUTABLE, InvalidationPolicy::OnSuccess);
    let envelope = store
        .categories
        .list(&QueryParams::new(), CacheDirective::default())
        .await;
    let error = envelope.error().expect("transport failure");
    assert_eq!(error.message, "Something Went Wrong");
    assert_eq!(error.code.as_deref(), Some(codes::NETWORK_ERROR));
}

#[tokio::test]
async fn malformed_json_is_a_transport_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body("{not json");
    });
    let (store, _) = storefront(&server.base_url(), InvalidationPolicy::OnSuccess);

    let envelope = store
        .blogs
        .list(&QueryParams::new(), CacheDirective::default())
        .await;
    assert_eq!(
        envelope.error().map(|e| e.message.as_str()),
        Some("Something Went Wrong")
    );
}

#[tokio::test]
async fn envelope_serializes_both_keys() {
    let (store, _) = storefront(UNROUTABLE, InvalidationPolicy::OnSuccess);
    let envelope = store.categories.get("").await;
    let value = serde_json::to_value(&envelope).expect("serialize");
    assert_eq!(
        value,
        json!({
            "data": null,
            "error": {"message": "Category ID is required", "code": "VALIDATION_ERROR"}
        })
    );
}
