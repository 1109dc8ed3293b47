use super::{Audience, Session, execute, print_json};
use crate::{LzCommands, OutputFormat};
use colored::Colorize;
use lzflow_cloud::workflow::{LandingZoneCollaborators, create_landing_zone, landing_zone_e2e};
use lzflow_cloud::{AzureResource, LandingZoneService, ManagedAppDeployer};

pub async fn handle(session: &Session, cmd: LzCommands) -> anyhow::Result<()> {
    match cmd {
        LzCommands::Create {
            billing_profile_id,
            definition,
            wait,
        } => {
            let ctx = session.connect(Audience::Terra).await?;
            let landing_zones = session.landing_zones(&ctx);
            if wait {
                let result =
                    execute(create_landing_zone(landing_zones, billing_profile_id, definition))
                        .await?;
                print_json(&result.job_report)?;
            } else {
                let job = landing_zones
                    .create_job(&billing_profile_id, definition)
                    .await?;
                print_json(&job)?;
            }
        }
        LzCommands::JobStatus { job_id } => {
            let ctx = session.connect(Audience::Terra).await?;
            let report = session.landing_zones(&ctx).job_status(&job_id).await?;
            print_json(&report)?;
        }
        LzCommands::E2e {
            subscription_id,
            resource_group,
            authed_user,
            definition,
            prefix,
            location,
        } => {
            let deployment_name = format!("{}-{}", prefix, random_suffix());
            tracing::info!(
                "Creating Azure landing zone [subscription_id={}, resource_group={}, authed_user={}, deployment_name={}]",
                subscription_id,
                resource_group,
                authed_user,
                deployment_name
            );

            let ctx = session.connect(Audience::Both).await?;
            let collaborators = LandingZoneCollaborators {
                deployer: session.arm(&ctx),
                bpm: session.bpm(&ctx),
                landing_zones: session.landing_zones(&ctx),
            };
            let deployment = session.deployment(
                subscription_id,
                deployment_name,
                resource_group,
                vec![authed_user],
                location,
            );

            let result = execute(landing_zone_e2e(&collaborators, deployment, definition)).await?;
            if let Some(app) = &result.managed_app {
                println!("  MRG:             {}", app.managed_resource_group_id.cyan());
            }
            if let Some(profile) = &result.billing_profile {
                println!("  Billing profile: {}", profile.id.cyan());
            }
            if let Some(job) = &result.landing_zone_job {
                println!("  Landing zone:    {}", job.landing_zone_id.cyan());
            }
        }
        LzCommands::Inspect {
            subscription_id,
            managed_resource_group_id,
            output_format,
        } => {
            let ctx = session.connect(Audience::Azure).await?;
            let resources = session
                .arm(&ctx)
                .list_resources(&subscription_id, &managed_resource_group_id)
                .await?;
            match output_format {
                OutputFormat::Pretty => print_table(&resources),
                OutputFormat::Csv => print!("{}", render_csv(&resources)),
            }
        }
    }
    Ok(())
}

/// Six lowercase alphanumerics
fn random_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..6].to_string()
}

fn created(resource: &AzureResource) -> String {
    resource
        .created_time
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn print_table(resources: &[AzureResource]) {
    if resources.is_empty() {
        println!("{}", "No resources found".dimmed());
        return;
    }

    println!(
        "{}",
        format!("{:<40} {:<60} {:<20}", "NAME", "TYPE", "CREATED TIME").bold()
    );
    println!("{}", "─".repeat(120).dimmed());
    for resource in resources {
        println!(
            "{} {:<60} {:<20}",
            format!("{:<40}", resource.name).cyan(),
            resource.resource_type,
            created(resource)
        );
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_csv(resources: &[AzureResource]) -> String {
    let mut out = String::from("Name,Type,Created Time\n");
    for resource in resources {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&resource.name),
            csv_field(&resource.resource_type),
            created(resource)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_random_suffix() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), 6);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_render_csv() {
        let resources = vec![
            AzureResource {
                name: "aks-1".to_string(),
                resource_type: "Microsoft.ContainerService/managedClusters".to_string(),
                created_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
            },
            AzureResource {
                name: "odd,name".to_string(),
                resource_type: "Microsoft.Network/virtualNetworks".to_string(),
                created_time: None,
            },
        ];

        assert_eq!(
            render_csv(&resources),
            "Name,Type,Created Time\n\
             aks-1,Microsoft.ContainerService/managedClusters,2024-03-01 10:00:00\n\
             \"odd,name\",Microsoft.Network/virtualNetworks,\n"
        );
    }
}
