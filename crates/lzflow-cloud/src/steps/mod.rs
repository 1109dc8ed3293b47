//! Concrete provisioning steps
//!
//! Each step owns its collaborator handle and parameters; its status check is
//! a method, so nothing is captured implicitly between attempts.

pub mod billing_profile;
pub mod billing_project;
pub mod landing_zone;
pub mod managed_app;
pub mod workspace;

pub use billing_profile::CreateBillingProfile;
pub use billing_project::{CreateBillingProject, DeleteBillingProject};
pub use landing_zone::{AwaitLandingZoneJob, SubmitLandingZone};
pub use managed_app::{DeployManagedApp, LocateManagedApp};
pub use workspace::{DeleteWorkspace, WorkspaceTarget};
