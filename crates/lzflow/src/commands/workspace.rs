use super::{Audience, Session, execute};
use crate::WorkspaceCommands;
use colored::Colorize;
use lzflow_cloud::steps::WorkspaceTarget;
use lzflow_cloud::workflow::delete_workspace;

pub async fn handle(session: &Session, cmd: WorkspaceCommands) -> anyhow::Result<()> {
    match cmd {
        WorkspaceCommands::Delete {
            workspace_name,
            billing_project_name,
            id,
        } => {
            let target = target(workspace_name, billing_project_name, id)?;
            let ctx = session.connect(Audience::Terra).await?;
            let result = execute(delete_workspace(session.rawls(&ctx), target.clone())).await?;
            if !result.absent.is_empty() {
                println!(
                    "  {}",
                    format!("Workspace {} did not exist", target).yellow()
                );
            }
        }
    }
    Ok(())
}

fn target(
    workspace_name: Option<String>,
    billing_project_name: Option<String>,
    id: Option<String>,
) -> anyhow::Result<WorkspaceTarget> {
    match (workspace_name, billing_project_name, id) {
        (_, _, Some(id)) => Ok(WorkspaceTarget::ById(id)),
        (Some(name), Some(namespace), None) => Ok(WorkspaceTarget::ByName { namespace, name }),
        _ => Err(anyhow::anyhow!(
            "Either --workspace-name with --billing-project-name, or --id is required"
        )),
    }
}
