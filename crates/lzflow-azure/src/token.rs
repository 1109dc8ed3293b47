//! Access token acquisition
//!
//! Tokens are taken from an explicit value when one is given, otherwise from the
//! locally logged-in `gcloud` (Terra services) or `az` (Azure Resource Manager)
//! CLI.

use crate::error::{AzureError, Result};
use std::process::Stdio;
use tokio::process::Command;

const GCLOUD_ARGS: &[&str] = &["auth", "print-access-token"];
const AZ_ARGS: &[&str] = &[
    "account",
    "get-access-token",
    "--resource",
    "https://management.core.windows.net/",
    "--query",
    "accessToken",
    "--output",
    "tsv",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Explicit(String),
    Gcloud,
    AzureCli,
}

impl TokenSource {
    /// Token for Rawls, BPM and the landing zone service
    pub fn terra(explicit: Option<String>) -> Self {
        match explicit.filter(|t| !t.trim().is_empty()) {
            Some(token) => TokenSource::Explicit(token),
            None => TokenSource::Gcloud,
        }
    }

    /// Token for Azure Resource Manager
    pub fn azure(explicit: Option<String>) -> Self {
        match explicit.filter(|t| !t.trim().is_empty()) {
            Some(token) => TokenSource::Explicit(token),
            None => TokenSource::AzureCli,
        }
    }

    pub async fn acquire(&self) -> Result<String> {
        let (program, args) = match self {
            TokenSource::Explicit(token) => return Ok(token.trim().to_string()),
            TokenSource::Gcloud => ("gcloud", GCLOUD_ARGS),
            TokenSource::AzureCli => ("az", AZ_ARGS),
        };

        tracing::debug!("Running: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AzureError::CliNotFound { program },
                _ => AzureError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AzureError::CommandFailed {
                program,
                message: stderr.trim().to_string(),
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AzureError::EmptyToken { program });
        }
        Ok(token)
    }
}
