//! Provisioning error types

use std::time::Duration;
use thiserror::Error;

/// Errors that abort a provisioning or deletion run
#[derive(Error, Debug)]
pub enum CloudError {
    /// The wait budget of a step ran out before a terminal state was seen
    #[error("Exceeded max wait time of {}s polling for status of {step}", .max_wait.as_secs())]
    PollTimeout { step: String, max_wait: Duration },

    /// A collaborator reported a state classified as failed
    #[error("{step} failed: resource reported state {state}")]
    TerminalResourceFailure { step: String, state: String },

    /// A collaborator reported a state outside the known vocabulary
    #[error("{step}: unrecognized {resource} state '{state}'")]
    UnrecognizedState {
        step: String,
        resource: &'static str,
        state: String,
    },

    /// The request itself failed at the transport or protocol level
    #[error("{service} request failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    RequestFailed {
        service: String,
        status: Option<u16>,
        message: String,
    },

    /// A step needs a result that no earlier step produced
    #[error("{step}: {item} is missing from the provisioning context")]
    MissingContext { step: String, item: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The orchestrator already reached a terminal state
    #[error("Provisioning run already finished ({0})")]
    RunFinished(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    pub fn request_failed(
        service: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::RequestFailed {
            service: service.into(),
            status,
            message: message.into(),
        }
    }

    pub fn missing(step: impl Into<String>, item: &'static str) -> Self {
        Self::MissingContext {
            step: step.into(),
            item,
        }
    }

    /// Name of the step the error is attributed to, when it carries one
    pub fn step(&self) -> Option<&str> {
        match self {
            Self::PollTimeout { step, .. }
            | Self::TerminalResourceFailure { step, .. }
            | Self::UnrecognizedState { step, .. }
            | Self::MissingContext { step, .. } => Some(step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
