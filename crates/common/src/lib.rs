//! Shared building blocks for the order gateway and its downstream services.
//!
//! - wire types for order lines and identifiers
//! - the explicit [`TraceContext`] read from `traceparent`
//! - telemetry, Prometheus and server bootstrap helpers

pub mod health;
pub mod metrics;
pub mod server;
pub mod telemetry;
pub mod trace;
pub mod types;

pub use server::ServerConfig;
pub use trace::{TRACEPARENT_HEADER, TraceContext, UNKNOWN_TRACE_ID};
pub use types::{LineItem, OpaqueId, OrderId, Sku, UserId};
