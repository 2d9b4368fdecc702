//! HTTP tests for the order service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use order_service::OrderBook;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_order_assigns_id() {
    let book = Arc::new(OrderBook::new());
    let app = order_service::create_app(book.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/orders")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "userId": "u1",
                        "items": [{ "sku": "SKU123", "quantity": 2 }]
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "CREATED");
    assert!(json["orderId"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(book.created_count(), 1);
}

#[tokio::test]
async fn test_create_order_accepts_numeric_user_id() {
    let book = Arc::new(OrderBook::new());
    let app = order_service::create_app(book.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/orders")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"userId":42,"items":[]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(book.created_count(), 1);
}

#[tokio::test]
async fn test_health_check() {
    let app = order_service::create_app(Arc::new(OrderBook::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
