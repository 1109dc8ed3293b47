//! Landing zone service client

use crate::error::Result;
use crate::request::{RequestContext, read_json};
use async_trait::async_trait;
use lzflow_cloud::{JobReport, LandingZoneDefinition, LandingZoneJob, LandingZoneService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Network and AKS parameters applied to every landing zone
const LANDING_ZONE_PARAMETERS: &[(&str, &str)] = &[
    ("VNET_ADDRESS_SPACE", "10.1.0.0/18"),
    ("AKS_SUBNET", "10.1.0.0/22"),
    ("BATCH_SUBNET", "10.1.4.0/22"),
    ("POSTGRESQL_SUBNET", "10.1.8.0/22"),
    ("COMPUTE_SUBNET", "10.1.12.0/22"),
    ("AKS_AUTOSCALING_ENABLED", "true"),
    ("AKS_AUTOSCALING_MIN", "1"),
    ("AKS_AUTOSCALING_MAX", "100"),
    ("AKS_MACHINE_TYPE", "Standard_D4as_v5"),
];

pub struct LandingZoneClient {
    ctx: Arc<RequestContext>,
    host: String,
}

impl LandingZoneClient {
    pub fn new(ctx: Arc<RequestContext>, host: impl Into<String>) -> Self {
        Self {
            ctx,
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    fn create_url(&self) -> String {
        format!("{}/api/landingzones/v1/azure", self.host)
    }

    fn create_result_url(&self, job_id: &str) -> String {
        format!("{}/api/landingzones/v1/azure/create-result/{}", self.host, job_id)
    }

    async fn submit(
        &self,
        billing_profile_id: &str,
        definition: LandingZoneDefinition,
    ) -> Result<LandingZoneJob> {
        let body = CreateLandingZoneRequest::new(
            billing_profile_id,
            definition,
            uuid::Uuid::new_v4().to_string(),
            uuid::Uuid::new_v4().to_string(),
        );
        tracing::debug!(
            "Submitting {} landing zone for billing profile {}",
            definition,
            billing_profile_id
        );

        let response = self
            .ctx
            .terra(self.ctx.client().post(self.create_url()))?
            .json(&body)
            .send()
            .await?;
        let created: JobResult = read_json("landing zone", response).await?;

        Ok(LandingZoneJob {
            landing_zone_id: created.landing_zone_id.unwrap_or(body.landing_zone_id),
            job_control_id: created.job_report.id,
        })
    }

    async fn create_result(&self, job_id: &str) -> Result<JobReport> {
        let url = self.create_result_url(job_id);
        tracing::debug!("GET {}", url);
        let response = self.ctx.terra(self.ctx.client().get(&url))?.send().await?;
        let result: JobResult = read_json("landing zone", response).await?;
        Ok(result.into())
    }
}

#[async_trait]
impl LandingZoneService for LandingZoneClient {
    async fn create_job(
        &self,
        billing_profile_id: &str,
        definition: LandingZoneDefinition,
    ) -> lzflow_cloud::Result<LandingZoneJob> {
        Ok(self.submit(billing_profile_id, definition).await?)
    }

    async fn job_status(&self, job_control_id: &str) -> lzflow_cloud::Result<JobReport> {
        Ok(self.create_result(job_control_id).await?)
    }
}

// ============ API Types ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLandingZoneRequest {
    landing_zone_id: String,
    definition: &'static str,
    version: &'static str,
    parameters: Vec<Parameter>,
    billing_profile_id: String,
    job_control: JobControl,
}

impl CreateLandingZoneRequest {
    fn new(
        billing_profile_id: &str,
        definition: LandingZoneDefinition,
        landing_zone_id: String,
        job_control_id: String,
    ) -> Self {
        Self {
            landing_zone_id,
            definition: definition.factory(),
            version: "v1",
            parameters: LANDING_ZONE_PARAMETERS
                .iter()
                .map(|&(key, value)| Parameter { key, value })
                .collect(),
            billing_profile_id: billing_profile_id.to_string(),
            job_control: JobControl { id: job_control_id },
        }
    }
}

#[derive(Debug, Serialize)]
struct Parameter {
    key: &'static str,
    value: &'static str,
}

#[derive(Debug, Serialize)]
struct JobControl {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobResult {
    job_report: ApiJobReport,
    #[serde(default)]
    error_report: Option<ErrorReport>,
    #[serde(default)]
    landing_zone_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiJobReport {
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    status_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ErrorReport {
    #[serde(default)]
    message: Option<String>,
}

impl From<JobResult> for JobReport {
    fn from(result: JobResult) -> Self {
        JobReport {
            id: result.job_report.id,
            status: result.job_report.status,
            status_code: result.job_report.status_code,
            error_message: result.error_report.and_then(|e| e.message),
        }
    }
}
