#![allow(dead_code)]

use async_trait::async_trait;
use lzflow_cloud::{
    AzureResource, BillingProfile, BillingProfileManager, BillingProfileRequest, BillingProject,
    BillingProjectRequest, BillingProjectService, DeploymentRequest, JobReport,
    LandingZoneDefinition, LandingZoneJob, LandingZoneService, ManagedAppDeployer,
    ManagedAppRecord, ManagedApplication, MarketplacePlan, Result, Workspace, WorkspaceService,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays values in order, repeating the last one once the script runs out
pub struct Script<T> {
    items: Mutex<VecDeque<T>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn next(&self) -> T {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.lock().unwrap();
        if items.len() > 1 {
            items.pop_front().unwrap()
        } else {
            items.front().cloned().expect("script must not be empty")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn plan() -> MarketplacePlan {
    MarketplacePlan {
        name: "terra-dev".to_string(),
        publisher: "thebroadinstituteinc1615909626976".to_string(),
        product: "terra-dev-preview".to_string(),
        version: "0.0.8".to_string(),
    }
}

pub fn deployment(name: &str) -> DeploymentRequest {
    DeploymentRequest {
        subscription_id: "sub-1".to_string(),
        deployment_name: name.to_string(),
        resource_group: "rg-1".to_string(),
        authorized_users: vec!["user@example.org".to_string()],
        plan: plan(),
        location: "southcentralus".to_string(),
    }
}

pub fn managed_app_record(deployment_name: &str) -> ManagedAppRecord {
    ManagedAppRecord {
        application_deployment_name: deployment_name.to_string(),
        managed_resource_group_id: format!("mrg-{}", deployment_name),
        tenant_id: "tenant-1".to_string(),
        subscription_id: "sub-1".to_string(),
        region: None,
        assigned: Some(false),
    }
}

pub fn billing_project(name: &str, status: &str) -> Option<BillingProject> {
    Some(BillingProject {
        project_name: name.to_string(),
        status: status.to_string(),
        message: None,
    })
}

pub fn workspace(state: &str) -> Option<Workspace> {
    Some(Workspace {
        workspace_id: "ws-id-1".to_string(),
        namespace: "bp-1".to_string(),
        name: "ws-1".to_string(),
        state: state.to_string(),
    })
}

pub struct FakeDeployer {
    pub states: Script<&'static str>,
    pub deployed: Mutex<Vec<DeploymentRequest>>,
    pub deleted: AtomicUsize,
}

impl FakeDeployer {
    pub fn new(states: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            states: Script::new(states),
            deployed: Mutex::new(Vec::new()),
            deleted: AtomicUsize::new(0),
        }
    }

    pub fn deploy_calls(&self) -> usize {
        self.deployed.lock().unwrap().len()
    }
}

#[async_trait]
impl ManagedAppDeployer for FakeDeployer {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<ManagedApplication> {
        self.deployed.lock().unwrap().push(request.clone());
        Ok(ManagedApplication {
            name: request.deployment_name.clone(),
            provisioning_state: "Accepted".to_string(),
            managed_resource_group_id: Some(request.managed_resource_group_id()),
        })
    }

    async fn get(
        &self,
        _subscription_id: &str,
        _resource_group: &str,
        deployment_name: &str,
    ) -> Result<ManagedApplication> {
        Ok(ManagedApplication {
            name: deployment_name.to_string(),
            provisioning_state: self.states.next().to_string(),
            managed_resource_group_id: None,
        })
    }

    async fn delete(
        &self,
        _subscription_id: &str,
        _resource_group: &str,
        _deployment_name: &str,
    ) -> Result<()> {
        self.deleted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_resources(
        &self,
        _subscription_id: &str,
        _managed_resource_group: &str,
    ) -> Result<Vec<AzureResource>> {
        Ok(Vec::new())
    }
}

pub struct FakeBpm {
    pub listings: Script<Vec<ManagedAppRecord>>,
    pub created: Mutex<Vec<BillingProfileRequest>>,
}

impl FakeBpm {
    pub fn new(listings: impl IntoIterator<Item = Vec<ManagedAppRecord>>) -> Self {
        Self {
            listings: Script::new(listings),
            created: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BillingProfileManager for FakeBpm {
    async fn list_managed_apps(&self, _subscription_id: &str) -> Result<Vec<ManagedAppRecord>> {
        Ok(self.listings.next())
    }

    async fn create_billing_profile(
        &self,
        request: &BillingProfileRequest,
    ) -> Result<BillingProfile> {
        self.created.lock().unwrap().push(request.clone());
        Ok(BillingProfile {
            id: "profile-1".to_string(),
            display_name: None,
            tenant_id: Some(request.tenant_id.clone()),
            subscription_id: Some(request.subscription_id.clone()),
            managed_resource_group_id: Some(request.managed_resource_group_id.clone()),
        })
    }

    async fn get_billing_profile(&self, id: &str) -> Result<Option<BillingProfile>> {
        let created = self.created.lock().unwrap();
        Ok(created.last().map(|request| BillingProfile {
            id: id.to_string(),
            display_name: None,
            tenant_id: Some(request.tenant_id.clone()),
            subscription_id: Some(request.subscription_id.clone()),
            managed_resource_group_id: Some(request.managed_resource_group_id.clone()),
        }))
    }
}

pub struct FakeLandingZones {
    pub statuses: Script<&'static str>,
    pub submitted: Mutex<Vec<(String, LandingZoneDefinition)>>,
}

impl FakeLandingZones {
    pub fn new(statuses: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            statuses: Script::new(statuses),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LandingZoneService for FakeLandingZones {
    async fn create_job(
        &self,
        billing_profile_id: &str,
        definition: LandingZoneDefinition,
    ) -> Result<LandingZoneJob> {
        self.submitted
            .lock()
            .unwrap()
            .push((billing_profile_id.to_string(), definition));
        Ok(LandingZoneJob {
            landing_zone_id: "lz-1".to_string(),
            job_control_id: "job-1".to_string(),
        })
    }

    async fn job_status(&self, job_control_id: &str) -> Result<JobReport> {
        Ok(JobReport {
            id: job_control_id.to_string(),
            status: self.statuses.next().to_string(),
            status_code: None,
            error_message: None,
        })
    }
}

pub struct FakeRawls {
    pub projects: Script<Option<BillingProject>>,
    pub created: Mutex<Vec<BillingProjectRequest>>,
    pub deleted: AtomicUsize,
}

impl FakeRawls {
    pub fn new(projects: impl IntoIterator<Item = Option<BillingProject>>) -> Self {
        Self {
            projects: Script::new(projects),
            created: Mutex::new(Vec::new()),
            deleted: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BillingProjectService for FakeRawls {
    async fn create(&self, request: &BillingProjectRequest) -> Result<()> {
        self.created.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn get(&self, _project_name: &str) -> Result<Option<BillingProject>> {
        Ok(self.projects.next())
    }

    async fn delete(&self, _project_name: &str) -> Result<()> {
        self.deleted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<BillingProject>> {
        Ok(Vec::new())
    }
}

pub struct FakeWorkspaces {
    pub lookups: Script<Option<Workspace>>,
    pub deleted: Mutex<Vec<(String, String)>>,
}

impl FakeWorkspaces {
    pub fn new(lookups: impl IntoIterator<Item = Option<Workspace>>) -> Self {
        Self {
            lookups: Script::new(lookups),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn delete_calls(&self) -> usize {
        self.deleted.lock().unwrap().len()
    }
}

#[async_trait]
impl WorkspaceService for FakeWorkspaces {
    async fn get_by_name(&self, _namespace: &str, _name: &str) -> Result<Option<Workspace>> {
        Ok(self.lookups.next())
    }

    async fn get_by_id(&self, _workspace_id: &str) -> Result<Option<Workspace>> {
        Ok(self.lookups.next())
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        self.deleted
            .lock()
            .unwrap()
            .push((namespace.to_string(), name.to_string()));
        Ok(())
    }
}
