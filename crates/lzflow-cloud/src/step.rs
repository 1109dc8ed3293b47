//! Provisioning step abstraction

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::Result;
use crate::poll::{PollConfig, PollOutcome};
use async_trait::async_trait;

/// One named unit of provisioning work.
///
/// The orchestrator calls [`initiate`](ProvisioningStep::initiate) exactly once,
/// then polls [`status`](ProvisioningStep::status) within
/// [`poll_config`](ProvisioningStep::poll_config) until it is ready.
#[async_trait]
pub trait ProvisioningStep: Send + Sync {
    /// Human readable name used in logs and errors
    fn name(&self) -> &str;

    fn poll_config(&self) -> PollConfig;

    /// Returns `true` when the target resource is already gone, in which case
    /// the step completes without initiating or polling. Only deletion steps
    /// override this.
    async fn already_absent(&self, _ctx: &ProvisioningContext) -> Result<bool> {
        Ok(false)
    }

    /// Issue the side-effecting request. A returned value is merged into the
    /// context before polling starts.
    async fn initiate(&self, _ctx: &ProvisioningContext) -> Result<Option<StepOutput>> {
        Ok(None)
    }

    /// Read-only status check, repeated by the poller
    async fn status(&self, _ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        Ok(PollOutcome::Ready(None))
    }
}
