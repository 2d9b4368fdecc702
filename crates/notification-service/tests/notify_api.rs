//! HTTP tests for the notification service.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use notification_service::Outbox;
use tower::ServiceExt;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Collects the field names declared by `send_notification` spans.
#[derive(Clone, Default)]
struct SpanFields(Arc<Mutex<Vec<String>>>);

impl<S: tracing::Subscriber> Layer<S> for SpanFields {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        if attrs.metadata().name() == "send_notification" {
            self.0.lock().unwrap().extend(
                attrs
                    .metadata()
                    .fields()
                    .iter()
                    .map(|f| f.name().to_string()),
            );
        }
    }
}

#[tokio::test]
async fn test_notify_records_confirmation() {
    let outbox = Arc::new(Outbox::new());
    let app = notification_service::create_app(outbox.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/notify")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "email": "a@b.com",
                        "orderId": "ord-1"
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
    assert_eq!(json, serde_json::json!({ "status": "SENT", "email": "a@b.com" }));

    assert_eq!(outbox.sent_count(), 1);
}

#[tokio::test]
async fn test_notify_accepts_numeric_order_id() {
    let outbox = Arc::new(Outbox::new());
    let app = notification_service::create_app(outbox.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/notify")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"email":"a@b.com","orderId":42}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(outbox.sent_count(), 1);
}

#[tokio::test]
async fn test_notify_rejects_missing_order_id() {
    let outbox = Arc::new(Outbox::new());
    let app = notification_service::create_app(outbox.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/notify")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"email":"a@b.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(outbox.sent_count(), 0);
}

#[tokio::test]
async fn test_notify_span_names_channel_and_recipient() {
    let fields = SpanFields::default();
    let _guard =
        tracing::subscriber::set_default(tracing_subscriber::registry().with(fields.clone()));

    let app = notification_service::create_app(Arc::new(Outbox::new()));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/notify")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"email":"a@b.com","orderId":"ord-1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fields = fields.0.lock().unwrap().clone();
    assert!(fields.contains(&"notification.type".to_string()), "{fields:?}");
    assert!(fields.contains(&"notification.recipient".to_string()));
    assert!(fields.contains(&"trace_id".to_string()));
}
