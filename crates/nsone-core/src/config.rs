//! Configuration types for the NS1 updater
//!
//! [`DdnsConfig`] is what the host hands over at startup. It is validated and
//! resolved exactly once into a [`RecordConfig`], which is immutable for the
//! rest of the process lifetime.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default period between scheduled update cycles (5 minutes)
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Documentation placeholders rejected as API keys (compared case-insensitively)
const PLACEHOLDER_KEYS: &[&str] = &[
    "your_key_here",
    "your_api_key",
    "replace_me",
    "api_key",
];

/// Main updater configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DdnsConfig {
    /// NS1 zone holding the record (e.g., "example.com")
    pub zone: String,

    /// Record name inside the zone; defaults to `zone` when absent or empty
    #[serde(default)]
    pub domain: Option<String>,

    /// NS1 API key
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Optional engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl DdnsConfig {
    /// Create a configuration for `zone` whose record name defaults to the zone
    pub fn new(zone: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            domain: None,
            api_key: api_key.into(),
            engine: EngineConfig::default(),
        }
    }

    /// Set an explicit record name
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Replace the engine settings
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Validate the configuration
    ///
    /// `zone` and `domain` are opaque to the updater: they go into the NS1
    /// URL path as given and NS1 decides whether they name a record.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.zone.is_empty() {
            return Err(crate::Error::config("zone is required"));
        }

        if self.api_key.is_empty() {
            return Err(crate::Error::config("api_key is required"));
        }

        if PLACEHOLDER_KEYS
            .iter()
            .any(|placeholder| self.api_key.eq_ignore_ascii_case(placeholder))
        {
            return Err(crate::Error::config(
                "api_key appears to be a placeholder, use an actual NS1 API key",
            ));
        }

        self.engine.validate()
    }

    /// Validate and resolve into the immutable record configuration
    ///
    /// This is where `domain` falls back to `zone`.
    pub fn record(&self) -> Result<RecordConfig, crate::Error> {
        self.validate()?;

        let domain = match self.domain.as_deref() {
            Some(domain) if !domain.is_empty() => domain.to_string(),
            _ => self.zone.clone(),
        };

        Ok(RecordConfig {
            zone: self.zone.clone(),
            domain,
            api_key: self.api_key.clone(),
        })
    }
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for DdnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdnsConfig")
            .field("zone", &self.zone)
            .field("domain", &self.domain)
            .field("api_key", &"<REDACTED>")
            .field("engine", &self.engine)
            .finish()
    }
}

/// The resolved zone/domain/key triple every push is made with
#[derive(Clone, PartialEq, Eq)]
pub struct RecordConfig {
    /// NS1 zone
    pub zone: String,

    /// Record name, never empty
    pub domain: String,

    /// NS1 API key
    /// ⚠️ NEVER log this value
    pub api_key: String,
}

impl std::fmt::Debug for RecordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordConfig")
            .field("zone", &self.zone)
            .field("domain", &self.domain)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Period between scheduled update cycles (in seconds)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Capacity of the engine event channel
    ///
    /// When full, new events are dropped (with a warning log).
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl EngineConfig {
    /// Scheduling period as a [`Duration`]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validate the engine configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.interval_secs == 0 {
            return Err(crate::Error::config("update interval must be > 0"));
        }
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("event channel capacity must be > 0"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_event_channel_capacity() -> usize {
    100
}
