use super::{Audience, Session, execute};
use crate::BillingProjectCommands;
use colored::Colorize;
use lzflow_cloud::BillingProjectService;
use lzflow_cloud::workflow::{create_billing_project, delete_billing_project};

pub async fn handle(session: &Session, cmd: BillingProjectCommands) -> anyhow::Result<()> {
    match cmd {
        BillingProjectCommands::Create {
            billing_project_name,
            subscription_id,
            tenant_id,
            resource_group,
            users,
            protected_data,
            location,
        } => {
            let ctx = session.connect(Audience::Both).await?;
            let deployment = session.deployment(
                subscription_id,
                billing_project_name,
                resource_group,
                users,
                location,
            );
            let run = create_billing_project(
                session.arm(&ctx),
                session.rawls(&ctx),
                deployment,
                tenant_id,
                protected_data,
            );

            let result = execute(run).await?;
            if let Some(project) = result.billing_project {
                println!(
                    "  {} is {}",
                    project.project_name.cyan(),
                    project.status.green()
                );
            }
        }
        BillingProjectCommands::Delete {
            billing_project_name,
        } => {
            let ctx = session.connect(Audience::Terra).await?;
            let result =
                execute(delete_billing_project(session.rawls(&ctx), &billing_project_name)).await?;
            if !result.absent.is_empty() {
                println!(
                    "  {}",
                    format!("Billing project {} did not exist", billing_project_name).yellow()
                );
            }
        }
        BillingProjectCommands::List => {
            let ctx = session.connect(Audience::Terra).await?;
            let mut names: Vec<String> = session
                .rawls(&ctx)
                .list()
                .await?
                .into_iter()
                .map(|p| p.project_name)
                .collect();
            names.sort();
            for name in names {
                println!("{}", name);
            }
        }
    }
    Ok(())
}
