use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Fallback winding is a real winding code
/// - Dimension tolerance is a non-negative number
/// - Archives are not written into the folders being archived
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if !(1..=8).contains(&config.normalizer.fallback_winding) {
        return Err(ConfigError::ValidationError(format!(
            "normalizer.fallback_winding must be between 1 and 8, got {}",
            config.normalizer.fallback_winding
        )));
    }

    let tolerance = config.normalizer.dimension_tolerance_mm;
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ConfigError::ValidationError(
            "normalizer.dimension_tolerance_mm must be a non-negative number".to_string(),
        ));
    }

    if config.staging.download_dir == config.staging.outbox_dir {
        return Err(ConfigError::ValidationError(
            "staging.outbox_dir must differ from staging.download_dir".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NormalizerConfig, ServerConfig};
    use crate::staging::StagingConfig;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_fallback_winding_range() {
        for bad in [0u8, 9, 200] {
            let config = Config {
                normalizer: NormalizerConfig {
                    fallback_winding: bad,
                    ..Default::default()
                },
                ..Default::default()
            };
            assert!(validate_config(&config).is_err(), "code {}", bad);
        }
    }

    #[test]
    fn test_validate_negative_tolerance_fails() {
        let config = Config {
            normalizer: NormalizerConfig {
                dimension_tolerance_mm: -0.1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_same_staging_dirs_fails() {
        let config = Config {
            staging: StagingConfig {
                download_dir: PathBuf::from("/srv/staging"),
                outbox_dir: PathBuf::from("/srv/staging"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
