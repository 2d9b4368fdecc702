//! Inventory service entry point.

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = inventory::Config::from_env().expect("invalid inventory configuration");
    let _telemetry = common::telemetry::init(&config.server).expect("failed to initialize tracing");

    let metrics_handle =
        common::metrics::install_recorder().expect("failed to install Prometheus recorder");

    let stock = Arc::new(config.stock_table());
    tracing::info!(stock = ?stock.snapshot(), "inventory loaded");

    let app = inventory::create_app(stock).merge(common::metrics::router(metrics_handle));

    common::server::serve(&config.server, app)
        .await
        .expect("server error");
}
