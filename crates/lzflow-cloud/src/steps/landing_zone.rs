//! Landing zone job submission and completion

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::Result;
use crate::model::LandingZoneDefinition;
use crate::poll::{PollConfig, PollOutcome};
use crate::provider::LandingZoneService;
use crate::status::{JobStatus, interpret};
use crate::step::ProvisioningStep;
use async_trait::async_trait;
use std::sync::Arc;

/// Submits the landing zone creation job for the billing profile in the context.
/// Acceptance of the job is the convergence point; its outcome is awaited by
/// [`AwaitLandingZoneJob`].
pub struct SubmitLandingZone {
    service: Arc<dyn LandingZoneService>,
    definition: LandingZoneDefinition,
}

impl SubmitLandingZone {
    pub const NAME: &'static str = "landing zone submission";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(0, 5);

    pub fn new(service: Arc<dyn LandingZoneService>, definition: LandingZoneDefinition) -> Self {
        Self {
            service,
            definition,
        }
    }
}

#[async_trait]
impl ProvisioningStep for SubmitLandingZone {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        Self::DEFAULT_POLL
    }

    async fn initiate(&self, ctx: &ProvisioningContext) -> Result<Option<StepOutput>> {
        let profile = ctx.require_billing_profile(Self::NAME)?;
        let job = self
            .service
            .create_job(&profile.id, self.definition)
            .await?;
        tracing::info!(
            "Creating landing zone..[landing_zone_id={}, job_control_id={}]",
            job.landing_zone_id,
            job.job_control_id
        );
        Ok(Some(StepOutput::LandingZoneJob(job)))
    }
}

/// Polls the asynchronous create-result endpoint of the submitted job
pub struct AwaitLandingZoneJob {
    service: Arc<dyn LandingZoneService>,
    poll: PollConfig,
}

impl AwaitLandingZoneJob {
    pub const NAME: &'static str = "landing zone creation";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(1200, 5);

    pub fn new(service: Arc<dyn LandingZoneService>) -> Self {
        Self {
            service,
            poll: Self::DEFAULT_POLL,
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

#[async_trait]
impl ProvisioningStep for AwaitLandingZoneJob {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        self.poll
    }

    async fn status(&self, ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        let job = ctx.require_landing_zone_job(Self::NAME)?;
        let report = self.service.job_status(&job.job_control_id).await?;

        if report.status == JobStatus::Failed.as_str() {
            tracing::error!(
                "Landing zone job {} failed: {}",
                report.id,
                report.error_message.as_deref().unwrap_or("no error report")
            );
        }

        let status = report.status.clone();
        interpret(
            Self::NAME,
            &status,
            JobStatus::readiness,
            Some(StepOutput::JobReport(report)),
        )
    }
}
