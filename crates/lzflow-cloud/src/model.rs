//! Domain types exchanged with the provisioning collaborators

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LOCATION: &str = "southcentralus";

/// Azure Marketplace plan of the Terra managed application offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplacePlan {
    pub name: String,
    pub publisher: String,
    pub product: String,
    pub version: String,
}

/// Everything needed to deploy a managed application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub subscription_id: String,
    pub deployment_name: String,
    pub resource_group: String,
    pub authorized_users: Vec<String>,
    pub plan: MarketplacePlan,
    pub location: String,
}

impl DeploymentRequest {
    /// Resource group the managed application creates for itself
    pub fn managed_resource_group_id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, self.deployment_name
        )
    }
}

/// Managed application as reported by Azure Resource Manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedApplication {
    pub name: String,
    pub provisioning_state: String,
    #[serde(default)]
    pub managed_resource_group_id: Option<String>,
}

/// Managed application record known to the billing profile manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedAppRecord {
    pub application_deployment_name: String,
    pub managed_resource_group_id: String,
    pub tenant_id: String,
    pub subscription_id: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub assigned: Option<bool>,
}

/// Coordinates for a new Azure billing profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingProfileRequest {
    pub subscription_id: String,
    pub managed_resource_group_id: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub managed_resource_group_id: Option<String>,
}

/// Request body fields for a new Rawls Azure billing project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingProjectRequest {
    pub project_name: String,
    pub tenant_id: String,
    pub subscription_id: String,
    pub managed_resource_group_id: String,
    pub protected_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingProject {
    pub project_name: String,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Kind of landing zone to deploy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingZoneDefinition {
    Standard,
    Protected,
}

impl LandingZoneDefinition {
    /// Factory name understood by the landing zone service
    pub fn factory(&self) -> &'static str {
        match self {
            LandingZoneDefinition::Standard => "CromwellBaseResourcesFactory",
            LandingZoneDefinition::Protected => "ProtectedDataResourcesFactory",
        }
    }
}

impl fmt::Display for LandingZoneDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandingZoneDefinition::Standard => write!(f, "standard"),
            LandingZoneDefinition::Protected => write!(f, "protected"),
        }
    }
}

impl FromStr for LandingZoneDefinition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(LandingZoneDefinition::Standard),
            "protected" => Ok(LandingZoneDefinition::Protected),
            other => Err(format!(
                "Definition must be one of [standard, protected], {} not found",
                other
            )),
        }
    }
}

/// Identifiers of a submitted landing zone creation job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingZoneJob {
    pub landing_zone_id: String,
    pub job_control_id: String,
}

/// Polled result of a landing zone creation job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReport {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub workspace_id: String,
    pub namespace: String,
    pub name: String,
    pub state: String,
}

/// Azure resource inside a managed resource group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_factories() {
        assert_eq!(
            "standard".parse::<LandingZoneDefinition>().unwrap().factory(),
            "CromwellBaseResourcesFactory"
        );
        assert_eq!(
            "protected".parse::<LandingZoneDefinition>().unwrap().factory(),
            "ProtectedDataResourcesFactory"
        );
        assert!("gpu".parse::<LandingZoneDefinition>().is_err());
    }

    #[test]
    fn test_managed_resource_group_id() {
        let request = DeploymentRequest {
            subscription_id: "sub-1".to_string(),
            deployment_name: "test-abc123".to_string(),
            resource_group: "rg".to_string(),
            authorized_users: vec!["a@example.org".to_string()],
            plan: MarketplacePlan {
                name: "terra-dev".to_string(),
                publisher: "pub".to_string(),
                product: "terra-dev-preview".to_string(),
                version: "0.0.8".to_string(),
            },
            location: DEFAULT_LOCATION.to_string(),
        };
        assert_eq!(
            request.managed_resource_group_id(),
            "/subscriptions/sub-1/resourceGroups/test-abc123"
        );
    }

    #[test]
    fn test_managed_app_record_from_bpm_json() {
        let json = serde_json::json!({
            "applicationDeploymentName": "test-abc123",
            "managedResourceGroupId": "mrg-test-abc123",
            "tenantId": "tenant",
            "subscriptionId": "sub-1",
            "assigned": false
        });
        let record: ManagedAppRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.application_deployment_name, "test-abc123");
        assert_eq!(record.assigned, Some(false));
        assert!(record.region.is_none());
    }
}
