//! Azure and Terra service client error types

use lzflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AzureError {
    #[error("{program} not found. Please install it or pass the token explicitly")]
    CliNotFound { program: &'static str },

    #[error("{program} command failed: {message}")]
    CommandFailed {
        program: &'static str,
        message: String,
    },

    #[error("No {audience} access token configured")]
    MissingToken { audience: &'static str },

    #[error("{program} returned an empty access token")]
    EmptyToken { program: &'static str },

    #[error("{service} returned HTTP {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unexpected {service} response: {source}")]
    UnexpectedResponse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AzureError>;

impl From<AzureError> for CloudError {
    fn from(err: AzureError) -> Self {
        match err {
            AzureError::Api {
                service,
                status,
                body,
            } => CloudError::request_failed(service, Some(status), body),
            AzureError::Http(e) => {
                let status = e.status().map(|s| s.as_u16());
                CloudError::request_failed("http", status, e.to_string())
            }
            AzureError::UnexpectedResponse { service, source } => {
                CloudError::request_failed(service, None, source.to_string())
            }
            AzureError::Json(e) => CloudError::Json(e),
            other => CloudError::request_failed("auth", None, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_status() {
        let err: CloudError = AzureError::Api {
            service: "rawls",
            status: 409,
            body: "conflict".to_string(),
        }
        .into();

        match err {
            CloudError::RequestFailed {
                service, status, ..
            } => {
                assert_eq!(service, "rawls");
                assert_eq!(status, Some(409));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_errors_map_to_auth() {
        let err: CloudError = AzureError::CliNotFound { program: "gcloud" }.into();
        assert!(err.to_string().contains("auth request failed"));
        assert!(err.to_string().contains("gcloud not found"));
    }
}
