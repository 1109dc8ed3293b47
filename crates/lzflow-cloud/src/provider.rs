//! Collaborator traits
//!
//! Each downstream service the orchestration talks to is reached through one of
//! these traits. Status reads are idempotent and may be repeated by the poller;
//! mutating calls are issued at most once per run. Lookups that can legitimately
//! miss return `Ok(None)` for a 404 so deletion flows can treat absence as done.

use crate::error::Result;
use crate::model::{
    AzureResource, BillingProfile, BillingProfileRequest, BillingProject, BillingProjectRequest,
    DeploymentRequest, JobReport, LandingZoneDefinition, LandingZoneJob, ManagedAppRecord,
    ManagedApplication, Workspace,
};
use async_trait::async_trait;

/// Azure Resource Manager operations on managed applications
#[async_trait]
pub trait ManagedAppDeployer: Send + Sync {
    /// Submit the managed application deployment
    async fn deploy(&self, request: &DeploymentRequest) -> Result<ManagedApplication>;

    /// Read the current provisioning state
    async fn get(
        &self,
        subscription_id: &str,
        resource_group: &str,
        deployment_name: &str,
    ) -> Result<ManagedApplication>;

    /// Request deletion; completion is not awaited
    async fn delete(
        &self,
        subscription_id: &str,
        resource_group: &str,
        deployment_name: &str,
    ) -> Result<()>;

    /// Resources deployed into a managed resource group
    async fn list_resources(
        &self,
        subscription_id: &str,
        managed_resource_group: &str,
    ) -> Result<Vec<AzureResource>>;
}

/// Billing profile manager: managed app registry and billing profiles
#[async_trait]
pub trait BillingProfileManager: Send + Sync {
    async fn list_managed_apps(&self, subscription_id: &str) -> Result<Vec<ManagedAppRecord>>;

    async fn create_billing_profile(&self, request: &BillingProfileRequest)
    -> Result<BillingProfile>;

    async fn get_billing_profile(&self, id: &str) -> Result<Option<BillingProfile>>;
}

/// Rawls billing project API
#[async_trait]
pub trait BillingProjectService: Send + Sync {
    async fn create(&self, request: &BillingProjectRequest) -> Result<()>;

    async fn get(&self, project_name: &str) -> Result<Option<BillingProject>>;

    async fn delete(&self, project_name: &str) -> Result<()>;

    async fn list(&self) -> Result<Vec<BillingProject>>;
}

/// Landing zone service job API
#[async_trait]
pub trait LandingZoneService: Send + Sync {
    async fn create_job(
        &self,
        billing_profile_id: &str,
        definition: LandingZoneDefinition,
    ) -> Result<LandingZoneJob>;

    async fn job_status(&self, job_control_id: &str) -> Result<JobReport>;
}

/// Rawls workspace API
#[async_trait]
pub trait WorkspaceService: Send + Sync {
    async fn get_by_name(&self, namespace: &str, name: &str) -> Result<Option<Workspace>>;

    async fn get_by_id(&self, workspace_id: &str) -> Result<Option<Workspace>>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<()>;
}
