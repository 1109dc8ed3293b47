//! Results carried forward between provisioning steps

use crate::error::{CloudError, Result};
use crate::model::{
    BillingProfile, BillingProject, JobReport, LandingZoneJob, ManagedAppRecord,
    ManagedApplication, Workspace,
};
use serde::Serialize;

/// Value produced by a step, merged into the [`ProvisioningContext`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput {
    ManagedApplication(ManagedApplication),
    ManagedAppRecord(ManagedAppRecord),
    BillingProfile(BillingProfile),
    LandingZoneJob(LandingZoneJob),
    JobReport(JobReport),
    BillingProject(BillingProject),
    Workspace(Workspace),
    /// The resource was already gone when the step looked for it
    Absent(String),
}

/// Accumulated results of one provisioning run.
///
/// Owned by the orchestrator while the run is in progress and handed back to
/// the caller once it succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningContext {
    pub managed_application: Option<ManagedApplication>,
    pub managed_app: Option<ManagedAppRecord>,
    pub billing_profile: Option<BillingProfile>,
    pub landing_zone_job: Option<LandingZoneJob>,
    pub job_report: Option<JobReport>,
    pub billing_project: Option<BillingProject>,
    pub workspace: Option<Workspace>,
    /// Resources found absent by deletion steps
    pub absent: Vec<String>,
}

impl ProvisioningContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, output: StepOutput) {
        match output {
            StepOutput::ManagedApplication(app) => self.managed_application = Some(app),
            StepOutput::ManagedAppRecord(record) => self.managed_app = Some(record),
            StepOutput::BillingProfile(profile) => self.billing_profile = Some(profile),
            StepOutput::LandingZoneJob(job) => self.landing_zone_job = Some(job),
            StepOutput::JobReport(report) => self.job_report = Some(report),
            StepOutput::BillingProject(project) => self.billing_project = Some(project),
            StepOutput::Workspace(workspace) => self.workspace = Some(workspace),
            StepOutput::Absent(resource) => self.absent.push(resource),
        }
    }

    pub fn require_managed_app(&self, step: &str) -> Result<&ManagedAppRecord> {
        self.managed_app
            .as_ref()
            .ok_or_else(|| CloudError::missing(step, "managed application record"))
    }

    pub fn require_billing_profile(&self, step: &str) -> Result<&BillingProfile> {
        self.billing_profile
            .as_ref()
            .ok_or_else(|| CloudError::missing(step, "billing profile"))
    }

    pub fn require_landing_zone_job(&self, step: &str) -> Result<&LandingZoneJob> {
        self.landing_zone_job
            .as_ref()
            .ok_or_else(|| CloudError::missing(step, "landing zone job"))
    }

    pub fn is_absent(&self, resource: &str) -> bool {
        self.absent.iter().any(|r| r == resource)
    }
}
