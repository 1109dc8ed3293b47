//! Rawls billing project creation and deletion

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::{CloudError, Result};
use crate::model::BillingProjectRequest;
use crate::poll::{PollConfig, PollOutcome};
use crate::provider::BillingProjectService;
use crate::status::{BillingProjectStatus, interpret};
use crate::step::ProvisioningStep;
use async_trait::async_trait;
use std::sync::Arc;

/// Creates a billing project and waits for it to become `Ready`
pub struct CreateBillingProject {
    rawls: Arc<dyn BillingProjectService>,
    request: BillingProjectRequest,
    poll: PollConfig,
}

impl CreateBillingProject {
    pub const NAME: &'static str = "Billing project creation";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(1800, 5);

    pub fn new(rawls: Arc<dyn BillingProjectService>, request: BillingProjectRequest) -> Self {
        Self {
            rawls,
            request,
            poll: Self::DEFAULT_POLL,
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

#[async_trait]
impl ProvisioningStep for CreateBillingProject {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        self.poll
    }

    async fn initiate(&self, _ctx: &ProvisioningContext) -> Result<Option<StepOutput>> {
        tracing::info!(
            "Creating billing project {} [protected_data={}]",
            self.request.project_name,
            self.request.protected_data
        );
        self.rawls.create(&self.request).await?;
        Ok(None)
    }

    async fn status(&self, _ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        let project = self
            .rawls
            .get(&self.request.project_name)
            .await?
            .ok_or_else(|| {
                CloudError::request_failed(
                    "rawls",
                    Some(404),
                    format!("billing project {} not found", self.request.project_name),
                )
            })?;

        let status = project.status.clone();
        interpret(
            Self::NAME,
            &status,
            BillingProjectStatus::creation_readiness,
            Some(StepOutput::BillingProject(project)),
        )
    }
}

/// Deletes a billing project; a 404 at any point means it is gone
pub struct DeleteBillingProject {
    rawls: Arc<dyn BillingProjectService>,
    project_name: String,
    poll: PollConfig,
}

impl DeleteBillingProject {
    pub const NAME: &'static str = "Billing project deletion";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(1200, 5);

    pub fn new(rawls: Arc<dyn BillingProjectService>, project_name: impl Into<String>) -> Self {
        Self {
            rawls,
            project_name: project_name.into(),
            poll: Self::DEFAULT_POLL,
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

#[async_trait]
impl ProvisioningStep for DeleteBillingProject {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        self.poll
    }

    async fn already_absent(&self, _ctx: &ProvisioningContext) -> Result<bool> {
        Ok(self.rawls.get(&self.project_name).await?.is_none())
    }

    async fn initiate(&self, _ctx: &ProvisioningContext) -> Result<Option<StepOutput>> {
        tracing::info!("Deleting billing project {}", self.project_name);
        self.rawls.delete(&self.project_name).await?;
        Ok(None)
    }

    async fn status(&self, _ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        let Some(project) = self.rawls.get(&self.project_name).await? else {
            tracing::info!("Deleted billing project");
            return Ok(PollOutcome::Ready(None));
        };

        interpret(
            Self::NAME,
            &project.status,
            BillingProjectStatus::deletion_readiness,
            None,
        )
    }
}
