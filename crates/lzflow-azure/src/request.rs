//! Shared HTTP state and response handling for the service clients

use crate::error::{AzureError, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP client plus the bearer tokens used against Terra services and Azure
/// Resource Manager. Built once per invocation and shared between clients.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    client: reqwest::Client,
    terra_token: Option<String>,
    azure_token: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terra_token(mut self, token: impl Into<String>) -> Self {
        self.terra_token = Some(token.into());
        self
    }

    pub fn with_azure_token(mut self, token: impl Into<String>) -> Self {
        self.azure_token = Some(token.into());
        self
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Attach the Terra user token (Rawls, BPM, landing zone service)
    pub fn terra(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .terra_token
            .as_deref()
            .ok_or(AzureError::MissingToken { audience: "Terra" })?;
        Ok(request.bearer_auth(token))
    }

    /// Attach the Azure management token (ARM)
    pub fn azure(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .azure_token
            .as_deref()
            .ok_or(AzureError::MissingToken { audience: "Azure" })?;
        Ok(request.bearer_auth(token))
    }
}

/// Fail on any non-2xx status, keeping the response body for the error
pub(crate) async fn ensure_success(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!("{} responded {}: {}", service, status, body);
    Err(AzureError::Api {
        service,
        status: status.as_u16(),
        body,
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T> {
    let response = ensure_success(service, response).await?;
    let text = response.text().await?;
    parse_body(service, &text)
}

/// Like [`read_json`], but a 404 is `Ok(None)`
pub(crate) async fn read_optional_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<Option<T>> {
    if response.status() == StatusCode::NOT_FOUND {
        tracing::debug!("{} responded 404", service);
        return Ok(None);
    }
    read_json(service, response).await.map(Some)
}

pub(crate) fn parse_body<T: DeserializeOwned>(service: &'static str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| AzureError::UnexpectedResponse { service, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_parse_body_reports_service() {
        let parsed: Named = parse_body("bpm", r#"{"name":"ok"}"#).unwrap();
        assert_eq!(parsed.name, "ok");

        let err = parse_body::<Named>("bpm", "<html>").unwrap_err();
        assert!(matches!(
            err,
            AzureError::UnexpectedResponse { service: "bpm", .. }
        ));
    }

    fn response(status: u16, body: &str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_not_found_is_absent() {
        let found: Option<Named> = read_optional_json("rawls", response(404, "gone"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_optional_json_reads_success_body() {
        let found: Option<Named> = read_optional_json("rawls", response(200, r#"{"name":"ws-1"}"#))
            .await
            .unwrap();
        assert_eq!(found.unwrap().name, "ws-1");
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_and_body() {
        let err = read_optional_json::<Named>("rawls", response(500, "boom"))
            .await
            .unwrap_err();
        match &err {
            AzureError::Api {
                service,
                status,
                body,
            } => {
                assert_eq!(*service, "rawls");
                assert_eq!(*status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Api, got {other:?}"),
        }

        match lzflow_cloud::CloudError::from(err) {
            lzflow_cloud::CloudError::RequestFailed { status, .. } => assert_eq!(status, Some(500)),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_required_json_rejects_not_found() {
        let err = read_json::<Named>("bpm", response(404, "")).await.unwrap_err();
        assert!(matches!(err, AzureError::Api { status: 404, .. }));
    }

    #[test]
    fn test_missing_tokens_are_reported_per_audience() {
        let ctx = RequestContext::new().with_terra_token("terra");
        let request = ctx.client().get("https://example.org");

        assert!(ctx.terra(request.try_clone().unwrap()).is_ok());
        match ctx.azure(request) {
            Err(AzureError::MissingToken { audience }) => assert_eq!(audience, "Azure"),
            other => panic!("expected MissingToken, got {other:?}"),
        }
    }
}
