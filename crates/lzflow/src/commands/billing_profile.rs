use super::{Audience, Session, print_json};
use crate::BillingProfileCommands;
use lzflow_cloud::{BillingProfileManager, BillingProfileRequest};

pub async fn handle(session: &Session, cmd: BillingProfileCommands) -> anyhow::Result<()> {
    let ctx = session.connect(Audience::Terra).await?;
    let bpm = session.bpm(&ctx);

    match cmd {
        BillingProfileCommands::ManagedApps { subscription_id } => {
            let apps = bpm.list_managed_apps(&subscription_id).await?;
            print_json(&apps)?;
        }
        BillingProfileCommands::Create {
            subscription_id,
            mrg_id,
            tenant_id,
        } => {
            let profile = bpm
                .create_billing_profile(&BillingProfileRequest {
                    subscription_id,
                    managed_resource_group_id: mrg_id,
                    tenant_id,
                })
                .await?;
            print_json(&profile)?;
        }
    }
    Ok(())
}
