//! Orchestration error types.

use common::TraceContext;
use thiserror::Error;

use crate::steps::Step;

/// Status reported when a failure did not come from a downstream HTTP response.
pub const DEFAULT_FAILURE_STATUS: u16 = 500;

/// A failed call to a downstream service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer: connection refused, timeout, reset.
    #[error("{0}")]
    Transport(String),

    /// The service answered successfully but the answer was unusable.
    #[error("{0}")]
    MalformedResponse(String),
}

impl CallError {
    /// The upstream HTTP status, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::MalformedResponse(_) => None,
        }
    }
}

/// An orchestration run that stopped at a failing step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{step} failed: {source}")]
pub struct OrchestrationError {
    /// The step whose call failed. Later steps were not attempted.
    pub step: Step,
    /// Trace the run belonged to, `"unknown"` if none.
    pub trace_id: String,
    #[source]
    pub source: CallError,
}

impl OrchestrationError {
    pub fn new(step: Step, ctx: &TraceContext, source: CallError) -> Self {
        Self {
            step,
            trace_id: ctx.trace_id().to_string(),
            source,
        }
    }

    /// The upstream status, or 500 when the failure was not an HTTP response.
    pub fn status(&self) -> u16 {
        self.source.status().unwrap_or(DEFAULT_FAILURE_STATUS)
    }

    /// The failure detail as reported by the failing service.
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}
