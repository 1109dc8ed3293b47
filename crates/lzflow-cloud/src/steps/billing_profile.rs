//! Billing profile creation from the located managed app

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::{CloudError, Result};
use crate::model::BillingProfileRequest;
use crate::poll::{PollConfig, PollOutcome};
use crate::provider::BillingProfileManager;
use crate::step::ProvisioningStep;
use async_trait::async_trait;
use std::sync::Arc;

/// Creates a billing profile from the managed app coordinates in the context,
/// then waits until BPM serves it back by id.
pub struct CreateBillingProfile {
    bpm: Arc<dyn BillingProfileManager>,
    subscription_id: String,
    poll: PollConfig,
}

impl CreateBillingProfile {
    pub const NAME: &'static str = "billing profile creation";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(60, 5);

    pub fn new(bpm: Arc<dyn BillingProfileManager>, subscription_id: impl Into<String>) -> Self {
        Self {
            bpm,
            subscription_id: subscription_id.into(),
            poll: Self::DEFAULT_POLL,
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

#[async_trait]
impl ProvisioningStep for CreateBillingProfile {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        self.poll
    }

    async fn initiate(&self, ctx: &ProvisioningContext) -> Result<Option<StepOutput>> {
        let app = ctx.require_managed_app(Self::NAME)?;
        let request = BillingProfileRequest {
            subscription_id: self.subscription_id.clone(),
            managed_resource_group_id: app.managed_resource_group_id.clone(),
            tenant_id: app.tenant_id.clone(),
        };

        tracing::info!("Creating billing profile...");
        let profile = self.bpm.create_billing_profile(&request).await?;
        tracing::info!("Created billing profile {}", profile.id);
        Ok(Some(StepOutput::BillingProfile(profile)))
    }

    async fn status(&self, ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        let id = &ctx.require_billing_profile(Self::NAME)?.id;
        match self.bpm.get_billing_profile(id).await? {
            Some(profile) if profile.id == *id => {
                Ok(PollOutcome::Ready(Some(StepOutput::BillingProfile(profile))))
            }
            Some(profile) => Err(CloudError::request_failed(
                "bpm",
                None,
                format!("asked for billing profile {} but got {}", id, profile.id),
            )),
            None => Ok(PollOutcome::Pending),
        }
    }
}
