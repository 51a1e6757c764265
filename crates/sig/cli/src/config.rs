//! Configuration loading

use sig_types::SigConfig;
use std::path::Path;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Load the SIG configuration from a TOML file, or the defaults when no file
/// is given. Missing keys take their default values.
pub fn load(path: Option<&Path>) -> CliResult<SigConfig> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let config: SigConfig = toml::from_str(&content)?;
            debug!(path = %path.display(), "Configuration loaded");
            config
        }
        None => SigConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
