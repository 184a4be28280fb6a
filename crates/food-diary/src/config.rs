//! Configuration for the Food Diary

use serde::{Deserialize, Serialize};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{Address, AddressParseError};
use thiserror::Error;

/// Environment variable holding the admin address (hex, optional `0x`).
pub const ENV_ADMIN_ADDRESS: &str = "FD_ADMIN_ADDRESS";

/// Environment variable holding the event bus capacity.
pub const ENV_EVENT_CAPACITY: &str = "FD_EVENT_CAPACITY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required variable {0}")]
    MissingVar(&'static str),

    /// The admin address does not parse.
    #[error("Invalid admin address: {0}")]
    InvalidAdmin(#[from] AddressParseError),

    /// The zero address cannot be the admin.
    #[error("Admin address must not be the zero address")]
    ZeroAdmin,

    /// A numeric variable does not parse.
    #[error("Invalid number in {var}: {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Diary configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiaryConfig {
    /// The single privileged identity. Fixed for the service's lifetime.
    pub admin: Address,
    /// Buffered events per subscriber before a slow subscriber lags.
    pub event_channel_capacity: usize,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            admin: Address::ZERO,
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl DiaryConfig {
    /// Create a config with the given admin and default capacity.
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            ..Self::default()
        }
    }

    /// Config for unit tests: a recognisable admin and a small bus.
    pub fn for_testing() -> Self {
        Self {
            admin: Address::repeat_byte(0xad),
            event_channel_capacity: 64,
        }
    }

    /// Load from `FD_ADMIN_ADDRESS` and `FD_EVENT_CAPACITY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_admin = lookup(ENV_ADMIN_ADDRESS).ok_or(ConfigError::MissingVar(ENV_ADMIN_ADDRESS))?;
        let admin: Address = raw_admin.trim().parse()?;

        let event_channel_capacity = match lookup(ENV_EVENT_CAPACITY) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: ENV_EVENT_CAPACITY,
                    value,
                })?,
            None => DEFAULT_CHANNEL_CAPACITY,
        };

        let config = Self {
            admin,
            event_channel_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot serve requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_zero() {
            return Err(ConfigError::ZeroAdmin);
        }
        Ok(())
    }
}
