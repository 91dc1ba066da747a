//! REST Surface Invariant Tests
//!
//! Drives the assembled router end to end and checks the HTTP contract:
//! - status-code taxonomy (400 bad id, 404 missing, 500 failures)
//! - the perPage cap regardless of what the caller requests
//! - the safe-filter allow-list as a silent security boundary
//! - public vs manage visibility of trashed pieces
//! - delete monotonicity (DELETE then public GET is 404)

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use piecebox::api::{ApiServer, DefaultPiecesApi};
use piecebox::config::{EndpointConfig, ServerConfig};
use piecebox::pieces::{Piece, PieceStore};

const EDITOR_KEY: &str = "editor_test-key";

fn router_with(endpoint: EndpointConfig, seed: &[(&str, &str, bool)]) -> Router {
    let config = ServerConfig::default();
    let store = Arc::new(PieceStore::new(endpoint.collection.clone()));
    for (id, topic, trashed) in seed {
        let mut fields = Map::new();
        fields.insert("topic".to_string(), json!(topic));
        let mut piece = Piece::with_id(*id, fields);
        piece.trashed = *trashed;
        store.insert(piece).unwrap();
    }
    let api = Arc::new(DefaultPiecesApi::with_defaults(
        endpoint,
        store,
        &config.base,
    ));
    ApiServer::new(config).register(&api).router()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as_editor(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("apikey", EDITOR_KEY)
        .body(Body::empty())
        .unwrap()
}

fn write(method: &str, uri: &str, body: &Value, editor: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if editor {
        builder = builder.header("apikey", EDITOR_KEY);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_list_shape_and_per_page_cap() {
    let router = router_with(
        EndpointConfig::new("articles").with_max_per_page(10),
        &[("a", "news", false), ("b", "sport", false)],
    );

    // Caller requests far above the cap; the response reports the cap.
    let (status, body) = send(&router, get("/api/v1/articles?perPage=1000")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["perPage"], 10);
    assert_eq!(body["total"], 2);
    assert_eq!(body["pages"], 1);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    // No requested size: same cap.
    let (_, body) = send(&router, get("/api/v1/articles")).await;
    assert_eq!(body["perPage"], 10);
}

#[tokio::test]
async fn test_disallowed_filter_has_no_effect() {
    let router = router_with(
        EndpointConfig::new("articles").with_safe_filters(&["topic"]),
        &[("a", "news", false), ("b", "sport", false)],
    );

    let (_, plain) = send(&router, get("/api/v1/articles")).await;
    let (_, filtered) = send(&router, get("/api/v1/articles?secret=x")).await;
    assert_eq!(plain["total"], filtered["total"]);

    // An allow-listed filter does restrict the result set.
    let (_, by_topic) = send(&router, get("/api/v1/articles?topic=news")).await;
    assert_eq!(by_topic["total"], 1);
}

#[tokio::test]
async fn test_get_one_status_taxonomy() {
    let router = router_with(EndpointConfig::new("articles"), &[("a", "news", false)]);

    // Unparsable id: 400, no query runs.
    let (status, body) = send(&router, get("/api/v1/articles/not.a.valid.id")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad request");

    // Well-formed but absent: 404, distinct from infrastructure failure.
    let (status, body) = send(&router, get("/api/v1/articles/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "notfound");

    // Present: 200 with the rendered, annotated piece.
    let (status, body) = send(&router, get("/api/v1/articles/a")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "a");
    assert_eq!(body["_url"], "/api/v1/articles/a");
}

#[tokio::test]
async fn test_trashed_pieces_invisible_to_public_callers() {
    let router = router_with(
        EndpointConfig::new("articles"),
        &[("live", "news", false), ("gone", "news", true)],
    );

    let (_, public) = send(&router, get("/api/v1/articles")).await;
    assert_eq!(public["total"], 1);

    let (status, _) = send(&router, get("/api/v1/articles/gone")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Edit-capable caller gets the manage scope.
    let (_, manage) = send(&router, get_as_editor("/api/v1/articles")).await;
    assert_eq!(manage["total"], 2);

    let (status, body) = send(&router, get_as_editor("/api/v1/articles/gone")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trashed"], true);
}

#[tokio::test]
async fn test_create_then_read_back() {
    let router = router_with(EndpointConfig::new("articles"), &[]);

    let (status, created) = send(
        &router,
        write("POST", "/api/v1/articles", &json!({"title": "New"}), true),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "New");
    let id = created["id"].as_str().unwrap().to_string();

    // Repeated reads return bit-identical rendered output.
    let uri = format!("/api/v1/articles/{id}");
    let (_, first) = send(&router, get(&uri)).await;
    let (_, second) = send(&router, get(&uri)).await;
    assert_eq!(first, second);
    assert_eq!(first["title"], "New");
}

#[tokio::test]
async fn test_invalid_create_body_yields_error_envelope() {
    let router = router_with(EndpointConfig::new("articles"), &[]);

    let (status, body) = send(
        &router,
        write("POST", "/api/v1/articles", &json!([1, 2, 3]), true),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "error");

    // Nothing was created.
    let (_, list) = send(&router, get("/api/v1/articles")).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_update_without_edit_permission_is_not_found() {
    let router = router_with(EndpointConfig::new("articles"), &[("a", "news", false)]);

    let (status, _) = send(
        &router,
        write("PUT", "/api/v1/articles/a", &json!({"title": "Nope"}), false),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The piece is untouched.
    let (_, body) = send(&router, get("/api/v1/articles/a")).await;
    assert!(body.get("title").is_none());

    // With permission the same request succeeds.
    let (status, body) = send(
        &router,
        write("PUT", "/api/v1/articles/a", &json!({"title": "Yes"}), true),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Yes");
}

#[tokio::test]
async fn test_delete_is_monotone() {
    let router = router_with(EndpointConfig::new("articles"), &[("a", "news", false)]);

    let (status, body) = send(
        &router,
        Request::builder()
            .method("DELETE")
            .uri("/api/v1/articles/a")
            .header("apikey", EDITOR_KEY)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, _) = send(&router, get("/api/v1/articles/a")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_failures_collapse_to_500() {
    let router = router_with(EndpointConfig::new("articles"), &[]);

    for uri in ["/api/v1/articles/missing", "/api/v1/articles/not.an.id"] {
        let (status, body) = send(
            &router,
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header("apikey", EDITOR_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "error");
    }
}

#[tokio::test]
async fn test_disabled_collection_exposes_nothing() {
    let router = router_with(
        EndpointConfig::new("articles").disabled(),
        &[("a", "news", false)],
    );

    let (status, _) = send(&router, get("/api/v1/articles")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, get("/api/v1/articles/a")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pagination_pages_through_results() {
    let endpoint = EndpointConfig::new("articles").with_max_per_page(2);
    let seed: Vec<(String, String, bool)> = (0..5)
        .map(|i| (format!("p{i}"), "news".to_string(), false))
        .collect();
    let seed_refs: Vec<(&str, &str, bool)> = seed
        .iter()
        .map(|(id, topic, trashed)| (id.as_str(), topic.as_str(), *trashed))
        .collect();
    let router = router_with(endpoint, &seed_refs);

    let mut seen = HashMap::new();
    for page in 1..=3 {
        let (_, body) = send(&router, get(&format!("/api/v1/articles?page={page}"))).await;
        assert_eq!(body["pages"], 3);
        for piece in body["results"].as_array().unwrap() {
            seen.insert(piece["id"].as_str().unwrap().to_string(), page);
        }
    }
    assert_eq!(seen.len(), 5);
}

#[tokio::test]
async fn test_extreme_page_number_returns_empty_page() {
    let router = router_with(
        EndpointConfig::new("articles").with_max_per_page(2),
        &[("a", "news", false), ("b", "sport", false)],
    );

    // A page number at the usize limit must not wrap the offset; it lands
    // past the end and yields an empty (but well-formed) page.
    let uri = format!("/api/v1/articles?page={}", usize::MAX);
    let (status, body) = send(&router, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert!(body["results"].as_array().unwrap().is_empty());
}
