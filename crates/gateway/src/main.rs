//! API gateway entry point.

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = gateway::config::Config::from_env();
    let _telemetry = common::telemetry::init(&config.server).expect("failed to initialize tracing");

    // 2. Install Prometheus metrics recorder
    let metrics_handle =
        common::metrics::install_recorder().expect("failed to install Prometheus recorder");

    // 3. Wire the downstream services
    tracing::info!(
        inventory = %config.inventory_service_url,
        orders = %config.order_service_url,
        notifications = %config.notification_service_url,
        "downstream services configured"
    );
    let state = gateway::create_state(&config);

    // 4. Build the application and serve
    let app = gateway::create_app(state, metrics_handle);
    common::server::serve(&config.server, app)
        .await
        .expect("server error");
}
