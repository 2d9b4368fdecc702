//! Notification service entry point.

use std::sync::Arc;

use common::ServerConfig;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env("notification-service", 8083);
    let _telemetry = common::telemetry::init(&config).expect("failed to initialize tracing");

    let metrics_handle =
        common::metrics::install_recorder().expect("failed to install Prometheus recorder");

    let app = notification_service::create_app(Arc::new(notification_service::Outbox::new()))
        .merge(common::metrics::router(metrics_handle));

    common::server::serve(&config, app)
        .await
        .expect("server error");
}
