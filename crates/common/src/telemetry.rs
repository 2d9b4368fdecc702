//! Process-wide tracing subscriber setup.
//!
//! Log output goes through `tracing-subscriber` with an `EnvFilter` read from
//! `RUST_LOG` (default `info`). `LOG_FORMAT=json` switches to JSON lines. With
//! the `otlp` feature, spans are also exported to the configured collector.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::server::ServerConfig;

/// Errors raised while installing the tracing pipeline.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),

    /// The span exporter could not be built.
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(String),
}

/// Keeps the exporter alive; flushes pending spans on drop.
#[must_use = "dropping the guard shuts telemetry down"]
pub struct TelemetryGuard {
    #[cfg(feature = "otlp")]
    provider: opentelemetry_sdk::trace::SdkTracerProvider,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        #[cfg(feature = "otlp")]
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "failed to flush trace exporter");
        }
    }
}

/// Installs the global subscriber for a service.
pub fn init(config: &ServerConfig) -> Result<TelemetryGuard, TelemetryError> {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()));

    #[cfg(feature = "otlp")]
    {
        use opentelemetry::trace::TracerProvider as _;

        let provider = otlp_provider(config)?;
        let tracer = provider.tracer(config.service_name.clone());
        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
        tracing::info!(
            service = %config.service_name,
            endpoint = %config.otlp_endpoint,
            "trace export enabled"
        );
        Ok(TelemetryGuard { provider })
    }

    #[cfg(not(feature = "otlp"))]
    {
        registry.try_init()?;
        tracing::debug!(
            service = %config.service_name,
            endpoint = %config.otlp_endpoint,
            "trace export disabled, built without the otlp feature"
        );
        Ok(TelemetryGuard {})
    }
}

#[cfg(feature = "otlp")]
fn otlp_provider(
    config: &ServerConfig,
) -> Result<opentelemetry_sdk::trace::SdkTracerProvider, TelemetryError> {
    use opentelemetry_otlp::WithExportConfig;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();

    Ok(opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build())
}
