//! Auth, validation, and gateway-classification behavior through the
//! full middleware stack. None of these paths reach the database.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn authed(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder.header(header::AUTHORIZATION, "Bearer secret-token")
}

// ---------------------------------------------------------------------------
// Bearer auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_routes_require_a_bearer_token() {
    let app = common::build_test_app(vec!["secret-token".into()]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/jobs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let app = common::build_test_app(vec!["secret-token".into()]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/prompts/faq")
                .header(header::AUTHORIZATION, "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Local validation (runs before any database or remote call)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_job_rejects_unknown_job_type() {
    let app = common::build_test_app(vec!["secret-token".into()]);

    let payload = serde_json::json!({
        "job_type": "video",
        "request_data": {"prompt_id": 1}
    });
    let response = app
        .oneshot(
            authed(Request::builder().method("POST").uri("/api/v1/jobs"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_job_rejects_non_object_request_data() {
    let app = common::build_test_app(vec!["secret-token".into()]);

    let payload = serde_json::json!({
        "job_type": "faq",
        "request_data": [1, 2, 3]
    });
    let response = app
        .oneshot(
            authed(Request::builder().method("POST").uri("/api/v1/jobs"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_prompt_kind_is_rejected_before_the_gateway() {
    let app = common::build_test_app(vec!["secret-token".into()]);

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/v1/prompts/video"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Gateway classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_api_key_maps_to_service_unavailable() {
    let app = common::build_test_app(vec!["secret-token".into()]);

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/v1/credits/account"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "API_KEY_MISSING");
}

#[tokio::test]
async fn prompt_listing_without_api_key_maps_to_service_unavailable() {
    let app = common::build_test_app(vec!["secret-token".into()]);

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/v1/prompts/faq"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
