//! Managed application deployment and BPM registration lookup

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::Result;
use crate::model::DeploymentRequest;
use crate::poll::{PollConfig, PollOutcome};
use crate::provider::{BillingProfileManager, ManagedAppDeployer};
use crate::status::{ManagedAppState, interpret};
use crate::step::ProvisioningStep;
use async_trait::async_trait;
use std::sync::Arc;

/// Deploys the Terra managed application and waits for a ready provisioning state
pub struct DeployManagedApp {
    deployer: Arc<dyn ManagedAppDeployer>,
    request: DeploymentRequest,
    poll: PollConfig,
}

impl DeployManagedApp {
    pub const NAME: &'static str = "MRG creation";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(300, 5);

    pub fn new(deployer: Arc<dyn ManagedAppDeployer>, request: DeploymentRequest) -> Self {
        Self {
            deployer,
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
impl ProvisioningStep for DeployManagedApp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        self.poll
    }

    async fn initiate(&self, _ctx: &ProvisioningContext) -> Result<Option<StepOutput>> {
        tracing::info!(
            "Creating MRG [subscription={}, resource_group={}, users={:?}]",
            self.request.subscription_id,
            self.request.resource_group,
            self.request.authorized_users
        );
        self.deployer.deploy(&self.request).await?;
        Ok(None)
    }

    async fn status(&self, _ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        let app = self
            .deployer
            .get(
                &self.request.subscription_id,
                &self.request.resource_group,
                &self.request.deployment_name,
            )
            .await?;
        let state = app.provisioning_state.clone();
        interpret(
            Self::NAME,
            &state,
            ManagedAppState::readiness,
            Some(StepOutput::ManagedApplication(app)),
        )
    }
}

/// Waits until BPM lists a managed app whose deployment name matches
pub struct LocateManagedApp {
    bpm: Arc<dyn BillingProfileManager>,
    subscription_id: String,
    deployment_name: String,
    poll: PollConfig,
}

impl LocateManagedApp {
    pub const NAME: &'static str = "managed app creation";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(120, 5);

    pub fn new(
        bpm: Arc<dyn BillingProfileManager>,
        subscription_id: impl Into<String>,
        deployment_name: impl Into<String>,
    ) -> Self {
        Self {
            bpm,
            subscription_id: subscription_id.into(),
            deployment_name: deployment_name.into(),
            poll: Self::DEFAULT_POLL,
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

#[async_trait]
impl ProvisioningStep for LocateManagedApp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        self.poll
    }

    async fn status(&self, _ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        let apps = self.bpm.list_managed_apps(&self.subscription_id).await?;
        let found = apps
            .into_iter()
            .find(|app| app.application_deployment_name == self.deployment_name);

        Ok(match found {
            Some(app) => {
                tracing::info!(
                    "Found managed app {} [mrg={}, tenant={}]",
                    app.application_deployment_name,
                    app.managed_resource_group_id,
                    app.tenant_id
                );
                PollOutcome::Ready(Some(StepOutput::ManagedAppRecord(app)))
            }
            None => PollOutcome::Pending,
        })
    }
}
