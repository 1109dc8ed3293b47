//! Composed provisioning and deletion runs

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::Result;
use crate::model::{
    BillingProfile, BillingProjectRequest, DeploymentRequest, LandingZoneDefinition,
};
use crate::orchestrator::Orchestrator;
use crate::provider::{
    BillingProfileManager, BillingProjectService, LandingZoneService, ManagedAppDeployer,
    WorkspaceService,
};
use crate::steps::{
    AwaitLandingZoneJob, CreateBillingProfile, CreateBillingProject, DeleteBillingProject,
    DeleteWorkspace, DeployManagedApp, LocateManagedApp, SubmitLandingZone, WorkspaceTarget,
};
use std::sync::Arc;

/// Collaborators used by the end-to-end landing zone run
#[derive(Clone)]
pub struct LandingZoneCollaborators {
    pub deployer: Arc<dyn ManagedAppDeployer>,
    pub bpm: Arc<dyn BillingProfileManager>,
    pub landing_zones: Arc<dyn LandingZoneService>,
}

/// Deploy a managed application, register a billing profile for it and build
/// a landing zone on top:
///
/// 1. deploy the managed application and wait for a ready provisioning state
/// 2. find the BPM managed app record by deployment name
/// 3. create a billing profile from its MRG/tenant coordinates
/// 4. submit the landing zone creation job for that billing profile
/// 5. wait for the job to succeed
pub fn landing_zone_e2e(
    collaborators: &LandingZoneCollaborators,
    deployment: DeploymentRequest,
    definition: LandingZoneDefinition,
) -> Orchestrator {
    let subscription_id = deployment.subscription_id.clone();
    let deployment_name = deployment.deployment_name.clone();

    Orchestrator::new(format!("landing zone e2e {}", deployment_name))
        .step(DeployManagedApp::new(
            Arc::clone(&collaborators.deployer),
            deployment,
        ))
        .step(LocateManagedApp::new(
            Arc::clone(&collaborators.bpm),
            subscription_id.clone(),
            deployment_name,
        ))
        .step(CreateBillingProfile::new(
            Arc::clone(&collaborators.bpm),
            subscription_id,
        ))
        .step(SubmitLandingZone::new(
            Arc::clone(&collaborators.landing_zones),
            definition,
        ))
        .step(AwaitLandingZoneJob::new(Arc::clone(
            &collaborators.landing_zones,
        )))
}

/// Submit a landing zone for an existing billing profile and wait for the job
pub fn create_landing_zone(
    landing_zones: Arc<dyn LandingZoneService>,
    billing_profile_id: impl Into<String>,
    definition: LandingZoneDefinition,
) -> Orchestrator {
    let profile = BillingProfile {
        id: billing_profile_id.into(),
        display_name: None,
        tenant_id: None,
        subscription_id: None,
        managed_resource_group_id: None,
    };
    let mut seed = ProvisioningContext::new();
    seed.merge(StepOutput::BillingProfile(profile));

    Orchestrator::new(format!("landing zone {}", definition))
        .with_context(seed)
        .step(SubmitLandingZone::new(Arc::clone(&landing_zones), definition))
        .step(AwaitLandingZoneJob::new(landing_zones))
}

/// Deploy the managed application named after the project, then create the
/// Rawls billing project on top of it and wait until it is `Ready`.
pub fn create_billing_project(
    deployer: Arc<dyn ManagedAppDeployer>,
    rawls: Arc<dyn BillingProjectService>,
    deployment: DeploymentRequest,
    tenant_id: impl Into<String>,
    protected_data: bool,
) -> Orchestrator {
    let request = BillingProjectRequest {
        project_name: deployment.deployment_name.clone(),
        tenant_id: tenant_id.into(),
        subscription_id: deployment.subscription_id.clone(),
        managed_resource_group_id: deployment.deployment_name.clone(),
        protected_data,
    };

    Orchestrator::new(format!("billing project {}", request.project_name))
        .step(DeployManagedApp::new(deployer, deployment))
        .step(CreateBillingProject::new(rawls, request))
}

pub fn delete_billing_project(
    rawls: Arc<dyn BillingProjectService>,
    project_name: &str,
) -> Orchestrator {
    Orchestrator::new(format!("delete billing project {}", project_name))
        .step(DeleteBillingProject::new(rawls, project_name))
}

pub fn delete_workspace(
    workspaces: Arc<dyn WorkspaceService>,
    target: WorkspaceTarget,
) -> Orchestrator {
    Orchestrator::new(format!("delete workspace {}", target))
        .step(DeleteWorkspace::new(workspaces, target))
}

/// Deploy a managed application on its own
pub async fn deploy_managed_application(
    deployer: Arc<dyn ManagedAppDeployer>,
    deployment: DeploymentRequest,
) -> Result<ProvisioningContext> {
    Orchestrator::new(format!("managed application {}", deployment.deployment_name))
        .step(DeployManagedApp::new(deployer, deployment))
        .run()
        .await
}
