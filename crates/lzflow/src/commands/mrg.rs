use super::{Audience, Session, print_json};
use crate::MrgCommands;
use colored::Colorize;
use lzflow_cloud::ManagedAppDeployer;
use lzflow_cloud::workflow::deploy_managed_application;

pub async fn handle(session: &Session, cmd: MrgCommands) -> anyhow::Result<()> {
    let ctx = session.connect(Audience::Azure).await?;
    let arm = session.arm(&ctx);

    match cmd {
        MrgCommands::Create {
            deployment_name,
            subscription_id,
            resource_group,
            users,
            location,
        } => {
            let deployment = session.deployment(
                subscription_id,
                deployment_name,
                resource_group,
                users,
                location,
            );
            let result = deploy_managed_application(arm, deployment).await?;
            print_json(&result.managed_application)?;
        }
        MrgCommands::Delete {
            deployment_name,
            subscription_id,
            resource_group,
        } => {
            arm.delete(&subscription_id, &resource_group, &deployment_name)
                .await?;
            println!("{}", "Deletion requested".green());
        }
    }
    Ok(())
}
