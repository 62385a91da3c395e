//! Host configuration.

use chalkak_guidance::GuidanceConfig;

use crate::error::{HostError, HostResult};

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Bounded capacity of the session command channel
    pub channel_capacity: usize,
    /// Consecutive aligned updates before recording is enabled
    pub min_stable_updates: u32,
    /// Engine parameters
    pub guidance: GuidanceConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256, // several seconds of samples at 60 Hz
            min_stable_updates: 3,
            guidance: GuidanceConfig::default(),
        }
    }
}

impl HostConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            channel_capacity: std::env::var("CHALKAK_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(256),
            min_stable_updates: std::env::var("CHALKAK_MIN_STABLE_UPDATES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            guidance: GuidanceConfig::from_env(),
        }
    }

    pub fn validate(&self) -> HostResult<()> {
        if self.channel_capacity == 0 {
            return Err(HostError::config_error("channel_capacity must be positive"));
        }
        if self.min_stable_updates == 0 {
            return Err(HostError::config_error("min_stable_updates must be at least 1"));
        }
        self.guidance.validate()?;
        Ok(())
    }
}
