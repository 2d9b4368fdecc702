//! Shared HTTP plumbing for downstream calls.

use common::{TRACEPARENT_HEADER, TraceContext};
use reqwest::StatusCode;
use serde::Serialize;

use crate::error::CallError;

/// Thin JSON-over-HTTP client shared by every downstream service.
///
/// Sends the request, forwards the trace context, and folds every kind of
/// failure into a [`CallError`]. No retries and no timeout beyond the
/// transport default.
#[derive(Debug, Clone, Default)]
pub struct DownstreamClient {
    client: reqwest::Client,
}

impl DownstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured `reqwest` client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POSTs `body` as JSON and returns the response if its status is a success.
    ///
    /// Each call carries its own span ID within the caller's trace.
    pub async fn post_json<B>(
        &self,
        url: &str,
        ctx: &TraceContext,
        body: &B,
    ) -> Result<reqwest::Response, CallError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.client.post(url).json(body);
        if let Some(traceparent) = ctx.child().traceparent() {
            request = request.header(TRACEPARENT_HEADER, traceparent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CallError::Transport(format!("failed reading error body: {e}")))?;

        Err(CallError::Rejected {
            status: status.as_u16(),
            message: rejection_message(status, &body),
        })
    }
}

/// Joins a base URL and an absolute path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Picks the most specific human-readable message from an error body:
/// a JSON `message` or `detail` string, else the raw text, else a generic
/// line naming the status.
fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    let from_json = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "detail"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        });
    if let Some(message) = from_json {
        return message;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        format!("Request failed with status code {}", status.as_u16())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_preferred() {
        let body = br#"{"message":"Item SKU1 out of stock","detail":"ignored"}"#;
        assert_eq!(
            rejection_message(StatusCode::BAD_REQUEST, body),
            "Item SKU1 out of stock"
        );
    }

    #[test]
    fn test_detail_field_used_when_no_message() {
        let body = br#"{"detail":"Not Found"}"#;
        assert_eq!(rejection_message(StatusCode::NOT_FOUND, body), "Not Found");
    }

    #[test]
    fn test_raw_body_used_when_not_json() {
        assert_eq!(
            rejection_message(StatusCode::BAD_GATEWAY, b"upstream down\n"),
            "upstream down"
        );
    }

    #[test]
    fn test_generic_message_for_empty_body() {
        assert_eq!(
            rejection_message(StatusCode::SERVICE_UNAVAILABLE, b""),
            "Request failed with status code 503"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("http://inventory:8081/", "/inventory/reserve"),
            "http://inventory:8081/inventory/reserve"
        );
    }
}
