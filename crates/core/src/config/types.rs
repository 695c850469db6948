use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::staging::StagingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub staging: StagingConfig,
    #[serde(default)]
    pub order_source: OrderSourceConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Order API access (artwork downloads and the bearer token it hands us).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderSourceConfig {
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// How long a submitted bearer token stays usable (default: 3600)
    #[serde(default = "default_token_max_age")]
    pub token_max_age_secs: u64,
}

impl Default for OrderSourceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            token_max_age_secs: default_token_max_age(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

fn default_token_max_age() -> u64 {
    3600
}

/// Normalizer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizerConfig {
    /// Supplier tag written on every record
    #[serde(default = "default_supplier_id")]
    pub supplier_id: String,
    /// Winding code (1-8) used for unknown output directions
    #[serde(default = "default_fallback_winding")]
    pub fallback_winding: u8,
    /// Allowed difference between trim box and ordered size, in mm
    #[serde(default = "default_tolerance")]
    pub dimension_tolerance_mm: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            supplier_id: default_supplier_id(),
            fallback_winding: default_fallback_winding(),
            dimension_tolerance_mm: default_tolerance(),
        }
    }
}

fn default_supplier_id() -> String {
    "Print.com".to_string()
}

fn default_fallback_winding() -> u8 {
    2
}

fn default_tolerance() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
