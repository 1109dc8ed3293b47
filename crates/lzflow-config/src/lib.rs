//! Terra environment configuration for lzflow
//!
//! Every environment has a built-in set of endpoints. An optional YAML file can
//! override individual fields per environment:
//!
//! ```yaml
//! dev:
//!   lz_host: http://localhost:8080
//!   plan:
//!     version: 0.0.9
//! ```

pub mod environment;
pub mod error;

pub use environment::{EnvironmentConfig, EnvironmentOverride, PlanOverride, TerraEnv};
pub use error::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "LZFLOW_CONFIG_PATH";

/// Override file location
///
/// 1. `LZFLOW_CONFIG_PATH`
/// 2. `~/.config/lzflow/environments.yaml` (platform config dir)
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|dir| dir.join("lzflow").join("environments.yaml"))
}

/// Read an override file; a missing file means no overrides
pub fn read_overrides(path: &Path) -> Result<HashMap<TerraEnv, EnvironmentOverride>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }

    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the configuration of `env`: built-in table, then the override file,
/// then BEE name substitution and validation.
pub fn load(env: TerraEnv, bee: Option<&str>) -> Result<EnvironmentConfig> {
    let overrides = match config_file_path() {
        Some(path) => read_overrides(&path)?,
        None => HashMap::new(),
    };
    resolve(env, bee, &overrides)
}

pub fn resolve(
    env: TerraEnv,
    bee: Option<&str>,
    overrides: &HashMap<TerraEnv, EnvironmentOverride>,
) -> Result<EnvironmentConfig> {
    let mut config = EnvironmentConfig::builtin(env);
    if let Some(entry) = overrides.get(&env) {
        config.apply(entry);
    }
    config.render(bee)
}
