//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_bytes, body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_returns_correct_headers(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/places.geojson")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("GET"),
        "Allow-Methods should contain GET, got: {allow_methods}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn media_files_are_served_under_media_url(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(media.path().join("places")).unwrap();
    std::fs::write(media.path().join("places/pic.jpg"), b"jpeg bytes").unwrap();

    let app = common::build_test_app(pool.clone(), media.path());
    let response = get(app, "/media/places/pic.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"jpeg bytes");

    let app = common::build_test_app(pool, media.path());
    let response = get(app, "/media/places/missing.jpg").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
