//! Resource state vocabularies and their pending/ready/failed classification
//!
//! Each collaborator reports its own state strings. They are parsed into closed
//! enums here; a string outside the vocabulary never parses, so it surfaces as
//! [`CloudError::UnrecognizedState`] instead of being polled forever.

use crate::error::{CloudError, Result};
use crate::poll::PollOutcome;
use std::fmt;
use std::str::FromStr;

/// Three-way classification shared by every vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Readiness {
    Pending,
    Ready,
    Failed,
}

/// A closed set of states reported by one kind of resource
pub trait ResourceStatus: FromStr + fmt::Display + Copy {
    /// Resource kind used in error messages
    const RESOURCE: &'static str;
}

/// Parse `raw`, classify it with `readiness`, and turn the result into a poll
/// outcome carrying `value` when ready.
pub fn interpret<S, T>(
    step: &str,
    raw: &str,
    readiness: impl FnOnce(S) -> Readiness,
    value: T,
) -> Result<PollOutcome<T>>
where
    S: ResourceStatus,
{
    let status: S = raw.parse().map_err(|_| CloudError::UnrecognizedState {
        step: step.to_string(),
        resource: S::RESOURCE,
        state: raw.to_string(),
    })?;

    match readiness(status) {
        Readiness::Pending => {
            tracing::debug!("{}: {} is {}", step, S::RESOURCE, status);
            Ok(PollOutcome::Pending)
        }
        Readiness::Ready => Ok(PollOutcome::Ready(value)),
        Readiness::Failed => Err(CloudError::TerminalResourceFailure {
            step: step.to_string(),
            state: status.to_string(),
        }),
    }
}

/// Marker error for a state string outside a vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownState(pub String);

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($resource:literal) {
            $($variant:ident => $raw:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $raw),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownState;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($raw => Ok($name::$variant),)+
                    other => Err(UnknownState(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ResourceStatus for $name {
            const RESOURCE: &'static str = $resource;
        }
    };
}

vocabulary! {
    /// `properties.provisioningState` of an Azure managed application
    ManagedAppState ("managed application") {
        Accepted => "Accepted",
        Creating => "Creating",
        Succeeded => "Succeeded",
        Running => "Running",
        Ready => "Ready",
        Failed => "Failed",
        Deleted => "Deleted",
        Deleting => "Deleting",
    }
}

impl ManagedAppState {
    pub fn readiness(self) -> Readiness {
        match self {
            ManagedAppState::Accepted | ManagedAppState::Creating => Readiness::Pending,
            ManagedAppState::Succeeded | ManagedAppState::Running | ManagedAppState::Ready => {
                Readiness::Ready
            }
            ManagedAppState::Failed | ManagedAppState::Deleted | ManagedAppState::Deleting => {
                Readiness::Failed
            }
        }
    }
}

vocabulary! {
    /// Status of a Rawls Azure billing project
    BillingProjectStatus ("billing project") {
        Creating => "Creating",
        CreatingLandingZone => "CreatingLandingZone",
        Ready => "Ready",
        Updating => "Updating",
        Error => "Error",
        Deleting => "Deleting",
        DeletionFailed => "DeletionFailed",
    }
}

impl BillingProjectStatus {
    /// Classification while waiting for a new project to become usable
    pub fn creation_readiness(self) -> Readiness {
        match self {
            BillingProjectStatus::Creating | BillingProjectStatus::CreatingLandingZone => {
                Readiness::Pending
            }
            BillingProjectStatus::Ready => Readiness::Ready,
            BillingProjectStatus::Updating
            | BillingProjectStatus::Error
            | BillingProjectStatus::Deleting
            | BillingProjectStatus::DeletionFailed => Readiness::Failed,
        }
    }

    /// Classification while waiting for a deleted project to disappear.
    /// Completion is signalled by a 404, never by a status value.
    pub fn deletion_readiness(self) -> Readiness {
        match self {
            BillingProjectStatus::DeletionFailed | BillingProjectStatus::Error => {
                Readiness::Failed
            }
            BillingProjectStatus::Creating
            | BillingProjectStatus::CreatingLandingZone
            | BillingProjectStatus::Ready
            | BillingProjectStatus::Updating
            | BillingProjectStatus::Deleting => Readiness::Pending,
        }
    }
}

vocabulary! {
    /// `jobReport.status` of a landing zone creation job
    JobStatus ("landing zone job") {
        Running => "RUNNING",
        Succeeded => "SUCCEEDED",
        Failed => "FAILED",
    }
}

impl JobStatus {
    pub fn readiness(self) -> Readiness {
        match self {
            JobStatus::Running => Readiness::Pending,
            JobStatus::Succeeded => Readiness::Ready,
            JobStatus::Failed => Readiness::Failed,
        }
    }
}

vocabulary! {
    /// `workspace.state` of a Rawls workspace that is being deleted
    WorkspaceState ("workspace") {
        Deleting => "Deleting",
        Deleted => "Deleted",
        DeleteFailed => "DeleteFailed",
    }
}

impl WorkspaceState {
    pub fn deletion_readiness(self) -> Readiness {
        match self {
            WorkspaceState::Deleting => Readiness::Pending,
            WorkspaceState::Deleted => Readiness::Ready,
            WorkspaceState::DeleteFailed => Readiness::Failed,
        }
    }
}
