mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use lzflow_cloud::{DEFAULT_LOCATION, LandingZoneDefinition};
use lzflow_config::TerraEnv;

#[derive(Parser)]
#[command(name = "lzflow")]
#[command(about = "Provision and tear down Terra Azure landing zones", long_about = None)]
struct Cli {
    /// Terra environment (bee, dev, alpha, staging, prod)
    #[arg(short, long, env = "LZFLOW_ENV", global = true)]
    env: Option<TerraEnv>,

    /// BEE name, required when --env is bee
    #[arg(short, long, global = true)]
    bee: Option<String>,

    /// Terra user access token (default: gcloud auth print-access-token)
    #[arg(short = 'u', long, env = "LZFLOW_USER_TOKEN", global = true, hide_env_values = true)]
    user_token: Option<String>,

    /// Azure management access token (default: az account get-access-token)
    #[arg(long, env = "LZFLOW_AZURE_TOKEN", global = true, hide_env_values = true)]
    azure_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Landing zones
    #[command(subcommand)]
    Lz(LzCommands),
    /// Rawls Azure billing projects
    #[command(subcommand)]
    BillingProject(BillingProjectCommands),
    /// BPM billing profiles and managed apps
    #[command(subcommand)]
    BillingProfile(BillingProfileCommands),
    /// Marketplace managed application deployments (MRGs)
    #[command(subcommand)]
    Mrg(MrgCommands),
    /// Rawls workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommands),
    /// Show version
    Version,
}

#[derive(Subcommand)]
pub enum LzCommands {
    /// Submit a landing zone for an existing billing profile
    Create {
        #[arg(short = 'p', long)]
        billing_profile_id: String,
        /// standard or protected
        #[arg(short, long)]
        definition: LandingZoneDefinition,
        /// Wait for the creation job to finish
        #[arg(short, long)]
        wait: bool,
    },
    /// Show the result of a landing zone creation job
    JobStatus {
        #[arg(short, long)]
        job_id: String,
    },
    /// Deploy a managed app, register a billing profile and create a landing zone
    E2e {
        #[arg(short, long)]
        subscription_id: String,
        #[arg(short, long)]
        resource_group: String,
        /// User authorized on the managed application
        #[arg(long)]
        authed_user: String,
        /// standard or protected
        #[arg(short, long)]
        definition: LandingZoneDefinition,
        /// Deployment name prefix; a random suffix is appended
        #[arg(short, long, default_value = "test")]
        prefix: String,
        #[arg(short, long, default_value = DEFAULT_LOCATION)]
        location: String,
    },
    /// List the Azure resources of a landing zone
    Inspect {
        #[arg(short, long)]
        subscription_id: String,
        #[arg(short, long)]
        managed_resource_group_id: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        output_format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum BillingProjectCommands {
    /// Deploy a managed app and create a billing project on it
    Create {
        #[arg(short = 'n', long)]
        billing_project_name: String,
        #[arg(short, long)]
        subscription_id: String,
        #[arg(short, long)]
        tenant_id: String,
        #[arg(short, long)]
        resource_group: String,
        /// Users authorized on the managed application
        #[arg(long, num_args = 1.., required = true)]
        users: Vec<String>,
        #[arg(short, long)]
        protected_data: bool,
        #[arg(short, long, default_value = DEFAULT_LOCATION)]
        location: String,
    },
    /// Delete a billing project and wait until it is gone
    Delete {
        #[arg(short = 'n', long)]
        billing_project_name: String,
    },
    /// List billing projects visible to the user
    List,
}

#[derive(Subcommand)]
pub enum BillingProfileCommands {
    /// List managed apps BPM knows for a subscription
    ManagedApps {
        #[arg(short, long)]
        subscription_id: String,
    },
    /// Create a billing profile for a managed resource group
    Create {
        #[arg(short, long)]
        subscription_id: String,
        #[arg(short, long)]
        mrg_id: String,
        #[arg(short, long)]
        tenant_id: String,
    },
}

#[derive(Subcommand)]
pub enum MrgCommands {
    /// Deploy a managed application and wait until it is ready
    Create {
        #[arg(short, long)]
        deployment_name: String,
        #[arg(short, long)]
        subscription_id: String,
        #[arg(short, long)]
        resource_group: String,
        /// Users authorized on the managed application
        #[arg(long, num_args = 1.., required = true)]
        users: Vec<String>,
        #[arg(short, long, default_value = DEFAULT_LOCATION)]
        location: String,
    },
    /// Request deletion of a managed application
    Delete {
        #[arg(short, long)]
        deployment_name: String,
        #[arg(short, long)]
        subscription_id: String,
        #[arg(short, long)]
        resource_group: String,
    },
}

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// Delete a workspace and wait until it is gone
    Delete {
        #[arg(short, long, required_unless_present = "id", requires = "billing_project_name")]
        workspace_name: Option<String>,
        #[arg(short = 'n', long, requires = "workspace_name")]
        billing_project_name: Option<String>,
        /// Address the workspace by id instead of namespace/name
        #[arg(long, conflicts_with_all = ["workspace_name", "billing_project_name"])]
        id: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Csv,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if matches!(cli.command, Commands::Version) {
        println!("lzflow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let env = cli
        .env
        .ok_or_else(|| anyhow::anyhow!("--env (or LZFLOW_ENV) is required"))?;
    let config = lzflow_config::load(env, cli.bee.as_deref())?;
    tracing::debug!("Using {} configuration: {:?}", env, config);

    let session = commands::Session::new(config, cli.user_token, cli.azure_token);

    match cli.command {
        Commands::Lz(cmd) => commands::lz::handle(&session, cmd).await?,
        Commands::BillingProject(cmd) => commands::billing_project::handle(&session, cmd).await?,
        Commands::BillingProfile(cmd) => commands::billing_profile::handle(&session, cmd).await?,
        Commands::Mrg(cmd) => commands::mrg::handle(&session, cmd).await?,
        Commands::Workspace(cmd) => commands::workspace::handle(&session, cmd).await?,
        // Handled before config loading
        Commands::Version => {}
    }

    Ok(())
}
