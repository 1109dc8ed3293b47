//! lzflow cloud core
//!
//! Bounded polling and sequential step orchestration for provisioning Terra
//! environments on Azure: a managed application, a billing profile or billing
//! project, and a landing zone.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   lzflow CLI                     │
//! │          (lz e2e, billing-project, ...)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 lzflow-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  Orchestrator ─▶ ProvisioningStep ─▶ poll │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐    │
//! │  │   status     │  │  collaborator traits  │    │
//! │  └──────────────┘  └──────────────────────┘    │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │   lzflow-azure (ARM, BPM, Rawls, LZ over HTTP)   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use lzflow_cloud::workflow::{landing_zone_e2e, LandingZoneCollaborators};
//!
//! let mut run = landing_zone_e2e(&collaborators, deployment, LandingZoneDefinition::Standard);
//! let ctx = run.run().await?;
//! println!("job {:?}", ctx.job_report);
//! ```

pub mod context;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod poll;
pub mod provider;
pub mod status;
pub mod step;
pub mod steps;
pub mod workflow;

// Re-exports
pub use context::{ProvisioningContext, StepOutput};
pub use error::{CloudError, Result};
pub use model::{
    AzureResource, BillingProfile, BillingProfileRequest, BillingProject, BillingProjectRequest,
    DEFAULT_LOCATION, DeploymentRequest, JobReport, LandingZoneDefinition, LandingZoneJob,
    ManagedAppRecord, ManagedApplication, MarketplacePlan, Workspace,
};
pub use orchestrator::{Orchestrator, RunState};
pub use poll::{PollConfig, PollOutcome, poll};
pub use provider::{
    BillingProfileManager, BillingProjectService, LandingZoneService, ManagedAppDeployer,
    WorkspaceService,
};
pub use status::{
    BillingProjectStatus, JobStatus, ManagedAppState, Readiness, ResourceStatus, WorkspaceState,
    interpret,
};
pub use step::ProvisioningStep;
