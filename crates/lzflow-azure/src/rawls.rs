//! Rawls client: Azure billing projects and workspaces

use crate::error::Result;
use crate::request::{RequestContext, ensure_success, read_json, read_optional_json};
use async_trait::async_trait;
use lzflow_cloud::{
    BillingProject, BillingProjectRequest, BillingProjectService, Workspace, WorkspaceService,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub struct RawlsClient {
    ctx: Arc<RequestContext>,
    host: String,
}

impl RawlsClient {
    pub fn new(ctx: Arc<RequestContext>, host: impl Into<String>) -> Self {
        Self {
            ctx,
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    fn billing_url(&self) -> String {
        format!("{}/api/billing/v2", self.host)
    }

    fn billing_project_url(&self, project_name: &str) -> String {
        format!("{}/{}", self.billing_url(), project_name)
    }

    fn workspace_url(&self, namespace: &str, name: &str) -> String {
        format!("{}/api/workspaces/{}/{}", self.host, namespace, name)
    }

    fn workspace_by_id_url(&self, workspace_id: &str) -> String {
        format!("{}/api/workspaces/id/{}", self.host, workspace_id)
    }

    fn workspace_delete_url(&self, namespace: &str, name: &str) -> String {
        format!("{}/api/workspaces/v2/{}/{}", self.host, namespace, name)
    }

    // ========== Billing projects ==========

    async fn post_billing_project(&self, request: &BillingProjectRequest) -> Result<()> {
        let response = self
            .ctx
            .terra(self.ctx.client().post(self.billing_url()))?
            .json(&CreateBillingProjectRequest::from(request))
            .send()
            .await?;
        ensure_success("rawls", response).await?;
        Ok(())
    }

    async fn fetch_billing_project(&self, project_name: &str) -> Result<Option<BillingProject>> {
        let url = self.billing_project_url(project_name);
        tracing::debug!("GET {}", url);
        let response = self.ctx.terra(self.ctx.client().get(&url))?.send().await?;
        let project: Option<ApiBillingProject> = read_optional_json("rawls", response).await?;
        Ok(project.map(Into::into))
    }

    async fn delete_billing_project(&self, project_name: &str) -> Result<()> {
        let response = self
            .ctx
            .terra(self.ctx.client().delete(self.billing_project_url(project_name)))?
            .send()
            .await?;
        ensure_success("rawls", response).await?;
        Ok(())
    }

    async fn fetch_billing_projects(&self) -> Result<Vec<BillingProject>> {
        let response = self
            .ctx
            .terra(self.ctx.client().get(self.billing_url()))?
            .send()
            .await?;
        let projects: Vec<ApiBillingProject> = read_json("rawls", response).await?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    // ========== Workspaces ==========

    async fn fetch_workspace(&self, url: &str) -> Result<Option<Workspace>> {
        tracing::debug!("GET {}", url);
        let response = self.ctx.terra(self.ctx.client().get(url))?.send().await?;
        let found: Option<WorkspaceResponse> = read_optional_json("rawls", response).await?;
        Ok(found.map(|r| r.workspace))
    }

    async fn delete_workspace(&self, namespace: &str, name: &str) -> Result<()> {
        let response = self
            .ctx
            .terra(
                self.ctx
                    .client()
                    .delete(self.workspace_delete_url(namespace, name)),
            )?
            .send()
            .await?;
        ensure_success("rawls", response).await?;
        Ok(())
    }
}

#[async_trait]
impl BillingProjectService for RawlsClient {
    async fn create(&self, request: &BillingProjectRequest) -> lzflow_cloud::Result<()> {
        Ok(self.post_billing_project(request).await?)
    }

    async fn get(&self, project_name: &str) -> lzflow_cloud::Result<Option<BillingProject>> {
        Ok(self.fetch_billing_project(project_name).await?)
    }

    async fn delete(&self, project_name: &str) -> lzflow_cloud::Result<()> {
        Ok(self.delete_billing_project(project_name).await?)
    }

    async fn list(&self) -> lzflow_cloud::Result<Vec<BillingProject>> {
        Ok(self.fetch_billing_projects().await?)
    }
}

#[async_trait]
impl WorkspaceService for RawlsClient {
    async fn get_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> lzflow_cloud::Result<Option<Workspace>> {
        Ok(self
            .fetch_workspace(&self.workspace_url(namespace, name))
            .await?)
    }

    async fn get_by_id(&self, workspace_id: &str) -> lzflow_cloud::Result<Option<Workspace>> {
        Ok(self
            .fetch_workspace(&self.workspace_by_id_url(workspace_id))
            .await?)
    }

    async fn delete(&self, namespace: &str, name: &str) -> lzflow_cloud::Result<()> {
        Ok(self.delete_workspace(namespace, name).await?)
    }
}

// ============ API Types ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBillingProjectRequest<'a> {
    project_name: &'a str,
    managed_app_coordinates: ManagedAppCoordinates<'a>,
    protected_data: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManagedAppCoordinates<'a> {
    tenant_id: &'a str,
    subscription_id: &'a str,
    managed_resource_group_id: &'a str,
}

impl<'a> From<&'a BillingProjectRequest> for CreateBillingProjectRequest<'a> {
    fn from(request: &'a BillingProjectRequest) -> Self {
        Self {
            project_name: &request.project_name,
            managed_app_coordinates: ManagedAppCoordinates {
                tenant_id: &request.tenant_id,
                subscription_id: &request.subscription_id,
                managed_resource_group_id: &request.managed_resource_group_id,
            },
            protected_data: request.protected_data,
        }
    }
}

/// Listing entries omit `status` for projects the caller only has a role on
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBillingProject {
    project_name: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<ApiBillingProject> for BillingProject {
    fn from(project: ApiBillingProject) -> Self {
        BillingProject {
            project_name: project.project_name,
            status: project.status.unwrap_or_default(),
            message: project.message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkspaceResponse {
    workspace: Workspace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::parse_body;

    fn rawls() -> RawlsClient {
        RawlsClient::new(
            Arc::new(RequestContext::new()),
            "https://rawls.dsde-dev.broadinstitute.org",
        )
    }

    #[test]
    fn test_billing_urls() {
        let rawls = rawls();
        assert_eq!(
            rawls.billing_url(),
            "https://rawls.dsde-dev.broadinstitute.org/api/billing/v2"
        );
        assert_eq!(
            rawls.billing_project_url("bp-1"),
            "https://rawls.dsde-dev.broadinstitute.org/api/billing/v2/bp-1"
        );
    }

    #[test]
    fn test_workspace_urls() {
        let rawls = rawls();
        assert_eq!(
            rawls.workspace_url("bp-1", "ws-1"),
            "https://rawls.dsde-dev.broadinstitute.org/api/workspaces/bp-1/ws-1"
        );
        assert_eq!(
            rawls.workspace_by_id_url("ws-id-1"),
            "https://rawls.dsde-dev.broadinstitute.org/api/workspaces/id/ws-id-1"
        );
        assert_eq!(
            rawls.workspace_delete_url("bp-1", "ws-1"),
            "https://rawls.dsde-dev.broadinstitute.org/api/workspaces/v2/bp-1/ws-1"
        );
    }

    #[test]
    fn test_create_billing_project_body() {
        let request = BillingProjectRequest {
            project_name: "bp-1".to_string(),
            tenant_id: "tenant-1".to_string(),
            subscription_id: "sub-1".to_string(),
            managed_resource_group_id: "bp-1".to_string(),
            protected_data: true,
        };
        let body = serde_json::to_value(CreateBillingProjectRequest::from(&request)).unwrap();

        assert_eq!(body["projectName"], "bp-1");
        assert_eq!(body["managedAppCoordinates"]["tenantId"], "tenant-1");
        assert_eq!(body["managedAppCoordinates"]["subscriptionId"], "sub-1");
        assert_eq!(body["managedAppCoordinates"]["managedResourceGroupId"], "bp-1");
        assert_eq!(body["protectedData"], true);
    }

    #[test]
    fn test_billing_project_listing() {
        let projects: Vec<ApiBillingProject> = parse_body(
            "rawls",
            r#"[
                {"projectName": "bp-2", "status": "Ready", "roles": ["Owner"]},
                {"projectName": "bp-1", "roles": ["User"]}
            ]"#,
        )
        .unwrap();
        let projects: Vec<BillingProject> = projects.into_iter().map(Into::into).collect();

        assert_eq!(projects[0].status, "Ready");
        assert_eq!(projects[1].status, "");
    }

    #[test]
    fn test_workspace_response() {
        let response: WorkspaceResponse = parse_body(
            "rawls",
            r#"{"accessLevel": "OWNER", "workspace": {
                "workspaceId": "ws-id-1",
                "namespace": "bp-1",
                "name": "ws-1",
                "state": "Deleting",
                "bucketName": ""
            }}"#,
        )
        .unwrap();

        assert_eq!(response.workspace.workspace_id, "ws-id-1");
        assert_eq!(response.workspace.state, "Deleting");
    }
}
