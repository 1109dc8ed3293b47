//! Built-in Terra environments and per-field overrides

use crate::error::{ConfigError, Result};
use lzflow_cloud::MarketplacePlan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BEE_PLACEHOLDER: &str = "{bee}";
const DEV_POSTGRES_VAULT_PATH: &str =
    "secret/dsde/terra/azure/dev/workspacemanager/azure-postgres-credential";
const PROD_POSTGRES_VAULT_PATH: &str =
    "secret/suitable/terra/azure/prod/workspacemanager/azure-postgres-credential";
const PLAN_PUBLISHER: &str = "thebroadinstituteinc1615909626976";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerraEnv {
    Bee,
    Dev,
    Alpha,
    Staging,
    Prod,
}

impl TerraEnv {
    pub const ALL: [TerraEnv; 5] = [
        TerraEnv::Bee,
        TerraEnv::Dev,
        TerraEnv::Alpha,
        TerraEnv::Staging,
        TerraEnv::Prod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerraEnv::Bee => "bee",
            TerraEnv::Dev => "dev",
            TerraEnv::Alpha => "alpha",
            TerraEnv::Staging => "staging",
            TerraEnv::Prod => "prod",
        }
    }
}

impl fmt::Display for TerraEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerraEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        TerraEnv::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

/// Service endpoints and Marketplace plan of one Terra environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentConfig {
    pub env: TerraEnv,
    pub rawls_host: String,
    pub bpm_host: String,
    pub lz_host: String,
    pub plan: MarketplacePlan,
    pub lz_postgres_credentials_vault_path: String,
}

impl EnvironmentConfig {
    /// Built-in settings; BEE hosts still carry the `{bee}` placeholder
    pub fn builtin(env: TerraEnv) -> Self {
        let (rawls_host, bpm_host, lz_host) = match env {
            TerraEnv::Bee => (
                "https://rawls.{bee}.bee.envs-terra.bio".to_string(),
                "https://bpm.{bee}.bee.envs-terra.bio".to_string(),
                "https://workspace.{bee}.bee.envs-terra.bio".to_string(),
            ),
            other => {
                let domain = format!("dsde-{}.broadinstitute.org", other);
                (
                    format!("https://rawls.{}", domain),
                    format!("https://bpm.{}", domain),
                    format!("https://workspace.{}", domain),
                )
            }
        };

        let (plan, vault_path) = match env {
            TerraEnv::Prod => (
                MarketplacePlan {
                    name: "terra-prod".to_string(),
                    publisher: PLAN_PUBLISHER.to_string(),
                    product: "terra-prod".to_string(),
                    version: "1.0.2".to_string(),
                },
                PROD_POSTGRES_VAULT_PATH,
            ),
            _ => (
                MarketplacePlan {
                    name: "terra-dev".to_string(),
                    publisher: PLAN_PUBLISHER.to_string(),
                    product: "terra-dev-preview".to_string(),
                    version: "0.0.8".to_string(),
                },
                DEV_POSTGRES_VAULT_PATH,
            ),
        };

        Self {
            env,
            rawls_host,
            bpm_host,
            lz_host,
            plan,
            lz_postgres_credentials_vault_path: vault_path.to_string(),
        }
    }

    /// Apply the fields set in `overrides`
    pub fn apply(&mut self, overrides: &EnvironmentOverride) {
        if let Some(host) = &overrides.rawls_host {
            self.rawls_host = host.clone();
        }
        if let Some(host) = &overrides.bpm_host {
            self.bpm_host = host.clone();
        }
        if let Some(host) = &overrides.lz_host {
            self.lz_host = host.clone();
        }
        if let Some(path) = &overrides.lz_postgres_credentials_vault_path {
            self.lz_postgres_credentials_vault_path = path.clone();
        }
        if let Some(plan) = &overrides.plan {
            let fields = [
                (&mut self.plan.name, &plan.name),
                (&mut self.plan.publisher, &plan.publisher),
                (&mut self.plan.product, &plan.product),
                (&mut self.plan.version, &plan.version),
            ];
            for (field, value) in fields {
                if let Some(value) = value {
                    *field = value.clone();
                }
            }
        }
    }

    /// Substitute the BEE name into every host and check the result
    pub fn render(mut self, bee: Option<&str>) -> Result<Self> {
        if self.env == TerraEnv::Bee {
            let bee = bee
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .ok_or(ConfigError::BeeNameRequired)?;
            for value in [
                &mut self.rawls_host,
                &mut self.bpm_host,
                &mut self.lz_host,
                &mut self.lz_postgres_credentials_vault_path,
            ] {
                *value = value.replace(BEE_PLACEHOLDER, bee);
            }
        }

        for (field, value) in [
            ("rawls_host", &self.rawls_host),
            ("bpm_host", &self.bpm_host),
            ("lz_host", &self.lz_host),
        ] {
            let is_url = value.starts_with("https://") || value.starts_with("http://");
            if !is_url || value.contains(BEE_PLACEHOLDER) {
                return Err(ConfigError::InvalidHost {
                    env: self.env.to_string(),
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(self)
    }
}

/// One environment's entry in the override file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    pub rawls_host: Option<String>,
    pub bpm_host: Option<String>,
    pub lz_host: Option<String>,
    pub plan: Option<PlanOverride>,
    pub lz_postgres_credentials_vault_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanOverride {
    pub name: Option<String>,
    pub publisher: Option<String>,
    pub product: Option<String>,
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_from_str() {
        assert_eq!("dev".parse::<TerraEnv>().unwrap(), TerraEnv::Dev);
        assert_eq!("PROD".parse::<TerraEnv>().unwrap(), TerraEnv::Prod);
        assert!(matches!(
            "qa".parse::<TerraEnv>(),
            Err(ConfigError::UnknownEnvironment(name)) if name == "qa"
        ));
    }

    #[test]
    fn test_builtin_hosts() {
        let staging = EnvironmentConfig::builtin(TerraEnv::Staging);
        assert_eq!(staging.rawls_host, "https://rawls.dsde-staging.broadinstitute.org");
        assert_eq!(staging.bpm_host, "https://bpm.dsde-staging.broadinstitute.org");
        assert_eq!(staging.lz_host, "https://workspace.dsde-staging.broadinstitute.org");
        assert_eq!(staging.plan.product, "terra-dev-preview");
    }

    #[test]
    fn test_prod_uses_prod_plan() {
        let prod = EnvironmentConfig::builtin(TerraEnv::Prod);
        assert_eq!(prod.plan.name, "terra-prod");
        assert_eq!(prod.plan.version, "1.0.2");
        assert!(prod.lz_postgres_credentials_vault_path.contains("/prod/"));
    }

    #[test]
    fn test_bee_requires_name() {
        let bee = EnvironmentConfig::builtin(TerraEnv::Bee);
        assert!(matches!(
            bee.clone().render(None),
            Err(ConfigError::BeeNameRequired)
        ));
        assert!(matches!(
            bee.render(Some("  ")),
            Err(ConfigError::BeeNameRequired)
        ));
    }

    #[test]
    fn test_bee_name_substituted() {
        let bee = EnvironmentConfig::builtin(TerraEnv::Bee)
            .render(Some("mybee"))
            .unwrap();
        assert_eq!(bee.rawls_host, "https://rawls.mybee.bee.envs-terra.bio");
        assert_eq!(bee.bpm_host, "https://bpm.mybee.bee.envs-terra.bio");
        assert_eq!(bee.lz_host, "https://workspace.mybee.bee.envs-terra.bio");
    }

    #[test]
    fn test_bee_name_ignored_outside_bee() {
        let dev = EnvironmentConfig::builtin(TerraEnv::Dev)
            .render(Some("mybee"))
            .unwrap();
        assert_eq!(dev.rawls_host, "https://rawls.dsde-dev.broadinstitute.org");
    }

    #[test]
    fn test_apply_partial_override() {
        let mut dev = EnvironmentConfig::builtin(TerraEnv::Dev);
        dev.apply(&EnvironmentOverride {
            lz_host: Some("http://localhost:8080".to_string()),
            plan: Some(PlanOverride {
                version: Some("0.0.9".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(dev.lz_host, "http://localhost:8080");
        assert_eq!(dev.rawls_host, "https://rawls.dsde-dev.broadinstitute.org");
        assert_eq!(dev.plan.version, "0.0.9");
        assert_eq!(dev.plan.name, "terra-dev");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let mut dev = EnvironmentConfig::builtin(TerraEnv::Dev);
        dev.apply(&EnvironmentOverride {
            bpm_host: Some("bpm.local".to_string()),
            ..Default::default()
        });

        match dev.render(None) {
            Err(ConfigError::InvalidHost { field, .. }) => assert_eq!(field, "bpm_host"),
            other => panic!("expected InvalidHost, got {other:?}"),
        }
    }
}
