//! Explicit distributed trace context.
//!
//! Every service reads the W3C `traceparent` header once at its entry point
//! and threads the resulting [`TraceContext`] by value through the calls it
//! makes. Absence of a trace is a normal condition and resolves to
//! [`UNKNOWN_TRACE_ID`].
//!
//! With the `otlp` feature the extractor also parents the current request
//! span on the inbound trace, and the context it yields is that span's, so the
//! reported trace ID is the one the collector receives. A request without a
//! `traceparent` then reports the trace its own span started.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the W3C trace context.
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Trace identifier reported when no trace context is active.
pub const UNKNOWN_TRACE_ID: &str = "unknown";

const TRACE_ID_LEN: usize = 32;
const SPAN_ID_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SpanContext {
    trace_id: String,
    span_id: String,
    flags: String,
}

/// The trace a request belongs to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceContext {
    span: Option<SpanContext>,
}

impl TraceContext {
    /// A context with no active trace.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses a `traceparent` header value.
    ///
    /// Malformed values yield an empty context rather than an error.
    pub fn from_traceparent(value: &str) -> Self {
        Self {
            span: parse_traceparent(value.trim()),
        }
    }

    /// Reads the trace context from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(TRACEPARENT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Self::from_traceparent)
            .unwrap_or_default()
    }

    /// Returns true if a trace is active.
    pub fn is_active(&self) -> bool {
        self.span.is_some()
    }

    /// Returns the active trace ID, or `"unknown"`.
    pub fn trace_id(&self) -> &str {
        self.span
            .as_ref()
            .map_or(UNKNOWN_TRACE_ID, |s| s.trace_id.as_str())
    }

    /// Derives the context for an outgoing call: same trace, fresh span ID.
    ///
    /// With the `otlp` feature the current exported span is used as the
    /// parent when it belongs to the same trace.
    pub fn child(&self) -> Self {
        #[cfg(feature = "otlp")]
        if let Some(current) = otel::current_span()
            .filter(|c| self.span.as_ref().is_some_and(|s| s.trace_id == c.trace_id))
        {
            return Self {
                span: Some(current),
            };
        }

        let span = self.span.as_ref().map(|parent| SpanContext {
            trace_id: parent.trace_id.clone(),
            span_id: new_span_id(),
            flags: parent.flags.clone(),
        });
        Self { span }
    }

    /// Renders the `traceparent` header value to forward, if a trace is active.
    pub fn traceparent(&self) -> Option<String> {
        self.span
            .as_ref()
            .map(|s| format!("00-{}-{}-{}", s.trace_id, s.span_id, s.flags))
    }
}

impl<S> FromRequestParts<S> for TraceContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        #[cfg(feature = "otlp")]
        {
            otel::adopt_inbound(&parts.headers);
            if let Some(span) = otel::current_span() {
                return Ok(Self { span: Some(span) });
            }
        }
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(feature = "otlp")]
mod otel {
    use axum::http::HeaderMap;
    use opentelemetry::propagation::{Extractor, TextMapPropagator};
    use opentelemetry::trace::TraceContextExt;
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    use super::SpanContext;

    struct HeaderExtractor<'a>(&'a HeaderMap);

    impl Extractor for HeaderExtractor<'_> {
        fn get(&self, key: &str) -> Option<&str> {
            self.0.get(key).and_then(|v| v.to_str().ok())
        }

        fn keys(&self) -> Vec<&str> {
            self.0.keys().map(|k| k.as_str()).collect()
        }
    }

    /// Makes the inbound trace, if any, the parent of the current span.
    pub(super) fn adopt_inbound(headers: &HeaderMap) {
        let parent = TraceContextPropagator::new().extract(&HeaderExtractor(headers));
        if parent.span().span_context().is_valid() {
            let _ = tracing::Span::current().set_parent(parent);
        }
    }

    /// Context of the current span as the exporter sees it.
    ///
    /// `None` outside a span or when no OpenTelemetry layer is installed.
    pub(super) fn current_span() -> Option<SpanContext> {
        let cx = tracing::Span::current().context();
        let span = cx.span();
        let sc = span.span_context();
        sc.is_valid().then(|| SpanContext {
            trace_id: sc.trace_id().to_string(),
            span_id: sc.span_id().to_string(),
            flags: format!("{:02x}", sc.trace_flags().to_u8()),
        })
    }
}

fn parse_traceparent(value: &str) -> Option<SpanContext> {
    let mut parts = value.split('-');
    let version = parts.next()?;
    let trace_id = parts.next()?;
    let span_id = parts.next()?;
    let flags = parts.next()?;

    // Version 00 has exactly four fields; later versions may append more.
    if version == "00" && parts.next().is_some() {
        return None;
    }
    if !is_hex(version, 2) || version.eq_ignore_ascii_case("ff") {
        return None;
    }
    if !is_hex(trace_id, TRACE_ID_LEN) || is_all_zero(trace_id) {
        return None;
    }
    if !is_hex(span_id, SPAN_ID_LEN) || is_all_zero(span_id) {
        return None;
    }
    if !is_hex(flags, 2) {
        return None;
    }

    Some(SpanContext {
        trace_id: trace_id.to_ascii_lowercase(),
        span_id: span_id.to_ascii_lowercase(),
        flags: flags.to_ascii_lowercase(),
    })
}

fn is_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_all_zero(s: &str) -> bool {
    s.bytes().all(|b| b == b'0')
}

fn new_span_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(SPAN_ID_LEN);
    id
}
