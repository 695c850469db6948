use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment prefix for overrides, e.g. `LABELBRIDGE_NORMALIZER__FALLBACK_WINDING=6`.
pub const ENV_PREFIX: &str = "LABELBRIDGE_";

/// Load configuration from file with `LABELBRIDGE_` environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_env(path, ENV_PREFIX)
}

/// Load configuration from file, overriding it with variables under `env_prefix`.
///
/// Nested keys are separated by `__`, so `{prefix}STAGING__OUTBOX_DIR`
/// sets `staging.outbox_dir`.
pub fn load_config_with_env(path: &Path, env_prefix: &str) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(env_prefix).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
