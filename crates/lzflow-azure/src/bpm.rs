//! Billing profile manager (BPM) client

use crate::error::Result;
use crate::request::{RequestContext, read_json, read_optional_json};
use async_trait::async_trait;
use lzflow_cloud::{BillingProfile, BillingProfileManager, BillingProfileRequest, ManagedAppRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub struct BpmClient {
    ctx: Arc<RequestContext>,
    host: String,
}

impl BpmClient {
    pub fn new(ctx: Arc<RequestContext>, host: impl Into<String>) -> Self {
        Self {
            ctx,
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    fn managed_apps_url(&self, subscription_id: &str) -> String {
        format!(
            "{}/api/azure/v1/managedApps?azureSubscriptionId={}",
            self.host, subscription_id
        )
    }

    fn profiles_url(&self) -> String {
        format!("{}/api/profiles/v1", self.host)
    }

    async fn fetch_managed_apps(&self, subscription_id: &str) -> Result<Vec<ManagedAppRecord>> {
        tracing::info!("Getting managed apps from BPM {}", self.host);
        let response = self
            .ctx
            .terra(self.ctx.client().get(self.managed_apps_url(subscription_id)))?
            .send()
            .await?;
        let listing: ManagedAppListing = read_json("bpm", response).await?;
        Ok(listing.managed_apps)
    }

    async fn post_profile(&self, request: &BillingProfileRequest) -> Result<BillingProfile> {
        let body = CreateProfileRequest::new(request, uuid::Uuid::new_v4().to_string());
        tracing::debug!("POST {} [id={}]", self.profiles_url(), body.id);
        let response = self
            .ctx
            .terra(self.ctx.client().post(self.profiles_url()))?
            .json(&body)
            .send()
            .await?;
        read_json("bpm", response).await
    }

    async fn fetch_profile(&self, id: &str) -> Result<Option<BillingProfile>> {
        let url = format!("{}/{}", self.profiles_url(), id);
        tracing::debug!("GET {}", url);
        let response = self.ctx.terra(self.ctx.client().get(&url))?.send().await?;
        read_optional_json("bpm", response).await
    }
}

#[async_trait]
impl BillingProfileManager for BpmClient {
    async fn list_managed_apps(
        &self,
        subscription_id: &str,
    ) -> lzflow_cloud::Result<Vec<ManagedAppRecord>> {
        Ok(self.fetch_managed_apps(subscription_id).await?)
    }

    async fn create_billing_profile(
        &self,
        request: &BillingProfileRequest,
    ) -> lzflow_cloud::Result<BillingProfile> {
        Ok(self.post_profile(request).await?)
    }

    async fn get_billing_profile(&self, id: &str) -> lzflow_cloud::Result<Option<BillingProfile>> {
        Ok(self.fetch_profile(id).await?)
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManagedAppListing {
    #[serde(default)]
    managed_apps: Vec<ManagedAppRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProfileRequest<'a> {
    id: String,
    biller: &'static str,
    display_name: String,
    description: &'static str,
    cloud_platform: &'static str,
    tenant_id: &'a str,
    subscription_id: &'a str,
    managed_resource_group_id: &'a str,
}

impl<'a> CreateProfileRequest<'a> {
    fn new(request: &'a BillingProfileRequest, id: String) -> Self {
        Self {
            id,
            biller: "direct",
            display_name: format!("lzflow {}", request.managed_resource_group_id),
            description: "Created by lzflow",
            cloud_platform: "AZURE",
            tenant_id: &request.tenant_id,
            subscription_id: &request.subscription_id,
            managed_resource_group_id: &request.managed_resource_group_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::parse_body;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let bpm = BpmClient::new(
            Arc::new(RequestContext::new()),
            "https://bpm.dsde-dev.broadinstitute.org/",
        );
        assert_eq!(
            bpm.managed_apps_url("sub-1"),
            "https://bpm.dsde-dev.broadinstitute.org/api/azure/v1/managedApps?azureSubscriptionId=sub-1"
        );
        assert_eq!(
            bpm.profiles_url(),
            "https://bpm.dsde-dev.broadinstitute.org/api/profiles/v1"
        );
    }

    #[test]
    fn test_create_profile_body() {
        let request = BillingProfileRequest {
            subscription_id: "sub-1".to_string(),
            managed_resource_group_id: "mrg-1".to_string(),
            tenant_id: "tenant-1".to_string(),
        };
        let body = serde_json::to_value(CreateProfileRequest::new(&request, "id-1".to_string()))
            .unwrap();

        assert_eq!(body["id"], "id-1");
        assert_eq!(body["biller"], "direct");
        assert_eq!(body["cloudPlatform"], "AZURE");
        assert_eq!(body["tenantId"], "tenant-1");
        assert_eq!(body["subscriptionId"], "sub-1");
        assert_eq!(body["managedResourceGroupId"], "mrg-1");
    }

    #[test]
    fn test_managed_app_listing() {
        let listing: ManagedAppListing = parse_body(
            "bpm",
            r#"{"managedApps":[{
                "applicationDeploymentName":"test-abc123",
                "managedResourceGroupId":"mrg-abc",
                "tenantId":"tenant-1",
                "subscriptionId":"sub-1",
                "region":"southcentralus",
                "assigned":false
            }]}"#,
        )
        .unwrap();

        assert_eq!(listing.managed_apps.len(), 1);
        assert_eq!(listing.managed_apps[0].managed_resource_group_id, "mrg-abc");

        let empty: ManagedAppListing = parse_body("bpm", "{}").unwrap();
        assert!(empty.managed_apps.is_empty());
    }
}
