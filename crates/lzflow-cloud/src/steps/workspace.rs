//! Rawls workspace deletion

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::Result;
use crate::model::Workspace;
use crate::poll::{PollConfig, PollOutcome};
use crate::provider::WorkspaceService;
use crate::status::{WorkspaceState, interpret};
use crate::step::ProvisioningStep;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// How the workspace to delete is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceTarget {
    ByName { namespace: String, name: String },
    ById(String),
}

impl fmt::Display for WorkspaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceTarget::ByName { namespace, name } => write!(f, "{}/{}", namespace, name),
            WorkspaceTarget::ById(id) => write!(f, "id={}", id),
        }
    }
}

/// Deletes a workspace and waits until Rawls reports it `Deleted` or stops
/// returning it.
pub struct DeleteWorkspace {
    workspaces: Arc<dyn WorkspaceService>,
    target: WorkspaceTarget,
    poll: PollConfig,
    /// Workspace seen by the absence check, consumed by `initiate`
    found: Mutex<Option<Workspace>>,
}

impl DeleteWorkspace {
    pub const NAME: &'static str = "Workspace deletion";
    pub const DEFAULT_POLL: PollConfig = PollConfig::preset(1200, 5);

    pub fn new(workspaces: Arc<dyn WorkspaceService>, target: WorkspaceTarget) -> Self {
        Self {
            workspaces,
            target,
            poll: Self::DEFAULT_POLL,
            found: Mutex::new(None),
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    async fn lookup(&self) -> Result<Option<Workspace>> {
        match &self.target {
            WorkspaceTarget::ByName { namespace, name } => {
                self.workspaces.get_by_name(namespace, name).await
            }
            WorkspaceTarget::ById(id) => self.workspaces.get_by_id(id).await,
        }
    }
}

#[async_trait]
impl ProvisioningStep for DeleteWorkspace {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn poll_config(&self) -> PollConfig {
        self.poll
    }

    async fn already_absent(&self, _ctx: &ProvisioningContext) -> Result<bool> {
        let found = self.lookup().await?;
        let absent = found.is_none();
        if absent {
            tracing::warn!("Workspace {} not found", self.target);
        }
        *self.found.lock().await = found;
        Ok(absent)
    }

    async fn initiate(&self, _ctx: &ProvisioningContext) -> Result<Option<StepOutput>> {
        let cached = self.found.lock().await.take();
        let workspace = match cached {
            Some(workspace) => Some(workspace),
            None => self.lookup().await?,
        };
        let Some(workspace) = workspace else {
            tracing::warn!("Workspace {} not found, nothing to delete", self.target);
            return Ok(Some(StepOutput::Absent(Self::NAME.to_string())));
        };

        tracing::info!(
            "Start deletion of workspace {}/{}",
            workspace.namespace,
            workspace.name
        );
        self.workspaces
            .delete(&workspace.namespace, &workspace.name)
            .await?;
        Ok(Some(StepOutput::Workspace(workspace)))
    }

    async fn status(&self, _ctx: &ProvisioningContext) -> Result<PollOutcome<Option<StepOutput>>> {
        let Some(workspace) = self.lookup().await? else {
            return Ok(PollOutcome::Ready(None));
        };

        let outcome = interpret(
            Self::NAME,
            &workspace.state,
            WorkspaceState::deletion_readiness,
            None,
        );
        if outcome.is_err() {
            tracing::error!(
                "Error deleting workspace {}/{}, id = {} status = {}",
                workspace.namespace,
                workspace.name,
                workspace.workspace_id,
                workspace.state
            );
        }
        outcome
    }
}
