//! Daemon configuration from environment variables
//!
//! | Variable          | Required | Meaning                               |
//! |-------------------|----------|---------------------------------------|
//! | `NSONE_ZONE`      | yes      | Zone holding the record               |
//! | `NSONE_DOMAIN`    | no       | Record name, defaults to the zone     |
//! | `NSONE_API_KEY`   | yes      | NS1 API key                           |
//! | `NSONE_LOG_LEVEL` | no       | trace/debug/info/warn/error (info)    |

use anyhow::{Context, Result};
use nsone_core::DdnsConfig;
use tracing::Level;

pub const ZONE_VAR: &str = "NSONE_ZONE";
pub const DOMAIN_VAR: &str = "NSONE_DOMAIN";
pub const API_KEY_VAR: &str = "NSONE_API_KEY";
pub const LOG_LEVEL_VAR: &str = "NSONE_LOG_LEVEL";

/// Everything the daemon needs to start
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Updater configuration handed to `setup`
    pub ddns: DdnsConfig,

    /// Max level for the log subscriber
    pub log_level: Level,
}

impl DaemonConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let zone = lookup(ZONE_VAR)
            .filter(|v| !v.trim().is_empty())
            .with_context(|| {
                format!(
                    "{} is required. Set it via: export {}=example.com",
                    ZONE_VAR, ZONE_VAR
                )
            })?;

        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("{} is required", API_KEY_VAR))?;

        let mut ddns = DdnsConfig::new(zone.trim(), api_key.trim());
        if let Some(domain) = lookup(DOMAIN_VAR).filter(|v| !v.trim().is_empty()) {
            ddns = ddns.with_domain(domain.trim());
        }

        ddns.validate().context("Configuration validation error")?;

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(level) => level.trim().parse::<Level>().map_err(|_| {
                anyhow::anyhow!(
                    "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                    LOG_LEVEL_VAR,
                    level
                )
            })?,
            None => Level::INFO,
        };

        Ok(Self { ddns, log_level })
    }
}
