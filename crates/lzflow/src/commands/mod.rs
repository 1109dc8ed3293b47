pub mod billing_profile;
pub mod billing_project;
pub mod lz;
pub mod mrg;
pub mod workspace;

use anyhow::Context;
use colored::Colorize;
use lzflow_azure::{
    ArmClient, BpmClient, LandingZoneClient, RawlsClient, RequestContext, TokenSource,
};
use lzflow_cloud::{DeploymentRequest, Orchestrator, ProvisioningContext};
use lzflow_config::EnvironmentConfig;
use std::sync::Arc;

/// Which tokens a command needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Terra,
    Azure,
    Both,
}

/// Resolved environment plus the explicitly supplied tokens
pub struct Session {
    pub config: EnvironmentConfig,
    user_token: Option<String>,
    azure_token: Option<String>,
}

impl Session {
    pub fn new(
        config: EnvironmentConfig,
        user_token: Option<String>,
        azure_token: Option<String>,
    ) -> Self {
        Self {
            config,
            user_token,
            azure_token,
        }
    }

    /// Acquire only the tokens `audience` needs
    pub async fn connect(&self, audience: Audience) -> anyhow::Result<Arc<RequestContext>> {
        let mut ctx = RequestContext::new();
        if matches!(audience, Audience::Terra | Audience::Both) {
            let token = TokenSource::terra(self.user_token.clone())
                .acquire()
                .await
                .context("Failed to obtain a Terra user token")?;
            ctx = ctx.with_terra_token(token);
        }
        if matches!(audience, Audience::Azure | Audience::Both) {
            let token = TokenSource::azure(self.azure_token.clone())
                .acquire()
                .await
                .context("Failed to obtain an Azure management token")?;
            ctx = ctx.with_azure_token(token);
        }
        Ok(Arc::new(ctx))
    }

    pub fn arm(&self, ctx: &Arc<RequestContext>) -> Arc<ArmClient> {
        Arc::new(ArmClient::new(Arc::clone(ctx)))
    }

    pub fn bpm(&self, ctx: &Arc<RequestContext>) -> Arc<BpmClient> {
        Arc::new(BpmClient::new(Arc::clone(ctx), &self.config.bpm_host))
    }

    pub fn rawls(&self, ctx: &Arc<RequestContext>) -> Arc<RawlsClient> {
        Arc::new(RawlsClient::new(Arc::clone(ctx), &self.config.rawls_host))
    }

    pub fn landing_zones(&self, ctx: &Arc<RequestContext>) -> Arc<LandingZoneClient> {
        Arc::new(LandingZoneClient::new(Arc::clone(ctx), &self.config.lz_host))
    }

    pub fn deployment(
        &self,
        subscription_id: String,
        deployment_name: String,
        resource_group: String,
        authorized_users: Vec<String>,
        location: String,
    ) -> DeploymentRequest {
        DeploymentRequest {
            subscription_id,
            deployment_name,
            resource_group,
            authorized_users,
            plan: self.config.plan.clone(),
            location,
        }
    }
}

/// Run `run` to completion, printing its steps and outcome
pub async fn execute(mut run: Orchestrator) -> anyhow::Result<ProvisioningContext> {
    println!("{}", format!("▶ {}", run.name()).blue().bold());
    for (i, step) in run.step_names().iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();

    match run.run().await {
        Ok(ctx) => {
            println!("{} {}", "✓".green(), run.name().green());
            Ok(ctx)
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), run.state().to_string().red());
            Err(e.into())
        }
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
