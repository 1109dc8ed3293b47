use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown environment '{0}'. Expected one of: bee, dev, alpha, staging, prod")]
    UnknownEnvironment(String),

    #[error("BEE name is required when env is bee (use --bee)")]
    BeeNameRequired,

    #[error("Invalid {field} for {env}: '{value}' is not an http(s) URL")]
    InvalidHost {
        env: String,
        field: &'static str,
        value: String,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
