//! Azure Resource Manager client for Marketplace managed applications

use crate::error::Result;
use crate::request::{RequestContext, ensure_success, read_json};
use async_trait::async_trait;
use lzflow_cloud::{AzureResource, DeploymentRequest, ManagedAppDeployer, ManagedApplication};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

const ARM_BASE: &str = "https://management.azure.com";
const APPLICATIONS_API_VERSION: &str = "2018-06-01";
const APPLICATIONS_DELETE_API_VERSION: &str = "2019-07-01";
const RESOURCES_API_VERSION: &str = "2021-04-01";

pub struct ArmClient {
    ctx: Arc<RequestContext>,
    base_url: String,
}

impl ArmClient {
    pub fn new(ctx: Arc<RequestContext>) -> Self {
        Self {
            ctx,
            base_url: ARM_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn application_url(
        &self,
        subscription_id: &str,
        resource_group: &str,
        deployment_name: &str,
        api_version: &str,
    ) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Solutions/applications/{}?api-version={}",
            self.base_url, subscription_id, resource_group, deployment_name, api_version
        )
    }

    fn resources_url(&self, subscription_id: &str, managed_resource_group: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/resources?$expand=createdTime,changedTime&api-version={}",
            self.base_url, subscription_id, managed_resource_group, RESOURCES_API_VERSION
        )
    }
}

/// PUT body of a managed application deployment
fn deployment_body(request: &DeploymentRequest) -> Value {
    json!({
        "location": request.location,
        "plan": request.plan,
        "kind": "MarketPlace",
        "properties": {
            "managedResourceGroupId": request.managed_resource_group_id(),
            "parameters": {
                "authorizedTerraUser": { "value": request.authorized_users.join(",") },
                "location": { "value": request.location },
            },
        },
    })
}

impl ArmClient {
    async fn put_application(&self, request: &DeploymentRequest) -> Result<ManagedApplication> {
        let url = self.application_url(
            &request.subscription_id,
            &request.resource_group,
            &request.deployment_name,
            APPLICATIONS_API_VERSION,
        );
        tracing::debug!("PUT {}", url);

        let response = self
            .ctx
            .azure(self.ctx.client().put(&url))?
            .json(&deployment_body(request))
            .send()
            .await?;
        let app: ApiApplication = read_json("arm", response).await?;
        Ok(app.into())
    }

    async fn get_application(
        &self,
        subscription_id: &str,
        resource_group: &str,
        deployment_name: &str,
    ) -> Result<ManagedApplication> {
        let url = self.application_url(
            subscription_id,
            resource_group,
            deployment_name,
            APPLICATIONS_API_VERSION,
        );
        tracing::debug!("GET {}", url);

        let response = self.ctx.azure(self.ctx.client().get(&url))?.send().await?;
        let app: ApiApplication = read_json("arm", response).await?;
        Ok(app.into())
    }

    async fn delete_application(
        &self,
        subscription_id: &str,
        resource_group: &str,
        deployment_name: &str,
    ) -> Result<()> {
        let url = self.application_url(
            subscription_id,
            resource_group,
            deployment_name,
            APPLICATIONS_DELETE_API_VERSION,
        );
        tracing::info!(
            "Deleting MRG [subscription={}, resource_group={}, deployment_name={}]",
            subscription_id,
            resource_group,
            deployment_name
        );

        let response = self
            .ctx
            .azure(self.ctx.client().delete(&url))?
            .send()
            .await?;
        ensure_success("arm", response).await?;
        Ok(())
    }

    /// Walks `nextLink` until the listing is exhausted
    async fn all_resources(
        &self,
        subscription_id: &str,
        managed_resource_group: &str,
    ) -> Result<Vec<AzureResource>> {
        let mut resources = Vec::new();
        let mut next = Some(self.resources_url(subscription_id, managed_resource_group));
        while let Some(url) = next {
            tracing::debug!("GET {}", url);
            let response = self.ctx.azure(self.ctx.client().get(&url))?.send().await?;
            let page: ResourcePage = read_json("arm", response).await?;
            resources.extend(page.value);
            next = page.next_link;
        }
        Ok(resources)
    }
}

#[async_trait]
impl ManagedAppDeployer for ArmClient {
    async fn deploy(&self, request: &DeploymentRequest) -> lzflow_cloud::Result<ManagedApplication> {
        Ok(self.put_application(request).await?)
    }

    async fn get(
        &self,
        subscription_id: &str,
        resource_group: &str,
        deployment_name: &str,
    ) -> lzflow_cloud::Result<ManagedApplication> {
        Ok(self
            .get_application(subscription_id, resource_group, deployment_name)
            .await?)
    }

    async fn delete(
        &self,
        subscription_id: &str,
        resource_group: &str,
        deployment_name: &str,
    ) -> lzflow_cloud::Result<()> {
        Ok(self
            .delete_application(subscription_id, resource_group, deployment_name)
            .await?)
    }

    async fn list_resources(
        &self,
        subscription_id: &str,
        managed_resource_group: &str,
    ) -> lzflow_cloud::Result<Vec<AzureResource>> {
        tracing::info!(
            "Inspecting lz at coordinates [subscription_id={}, managed_resource_group_id={}]",
            subscription_id,
            managed_resource_group
        );
        Ok(self
            .all_resources(subscription_id, managed_resource_group)
            .await?)
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiApplication {
    name: String,
    #[serde(default)]
    properties: ApiApplicationProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiApplicationProperties {
    #[serde(default)]
    provisioning_state: Option<String>,
    #[serde(default)]
    managed_resource_group_id: Option<String>,
}

impl From<ApiApplication> for ManagedApplication {
    fn from(app: ApiApplication) -> Self {
        ManagedApplication {
            name: app.name,
            provisioning_state: app.properties.provisioning_state.unwrap_or_default(),
            managed_resource_group_id: app.properties.managed_resource_group_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourcePage {
    #[serde(default)]
    value: Vec<AzureResource>,
    #[serde(default)]
    next_link: Option<String>,
}
