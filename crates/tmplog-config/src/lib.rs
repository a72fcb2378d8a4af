//! Shared configuration for the tmplog toolchain.
//!
//! The configuration is a plain value: every field starts from the built-in
//! defaults in [`defaults`] and nothing is loaded from disk or the
//! environment. Tests substitute smaller limits by constructing a [`Config`]
//! directly.

pub mod defaults;
mod logging;

use thiserror::Error;

pub use defaults::{
    DEFAULT_INPUT_CAPACITY, DEFAULT_LOG_FILTER, DEFAULT_PATH_CAPACITY, DEFAULT_PATH_PREFIX,
    DEFAULT_RESPONSE_CAPACITY,
};
pub use logging::LogFormat;

/// Smallest identifier buffer that still holds one byte plus a terminator.
pub const MIN_INPUT_CAPACITY: usize = 2;

/// Fixed capacities for every bounded buffer used while handling a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Capacity of the raw identifier buffer. At most `input_capacity - 1`
    /// bytes are ever read.
    pub input_capacity: usize,
    /// Maximum length of a generated log path.
    pub path_capacity: usize,
    /// Maximum length of the response message.
    pub response_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            input_capacity: DEFAULT_INPUT_CAPACITY,
            path_capacity: DEFAULT_PATH_CAPACITY,
            response_capacity: DEFAULT_RESPONSE_CAPACITY,
        }
    }
}

impl Limits {
    /// Number of identifier bytes that may be read into the input buffer.
    #[must_use]
    pub const fn identifier_limit(&self) -> usize {
        self.input_capacity.saturating_sub(1)
    }

    /// Confirms a message of `required` bytes always fits the response buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ResponseCapacityTooSmall`] when the response
    /// capacity is smaller than `required`.
    pub const fn ensure_response_fits(&self, required: usize) -> Result<(), ConfigError> {
        if self.response_capacity < required {
            return Err(ConfigError::ResponseCapacityTooSmall {
                capacity: self.response_capacity,
                required,
            });
        }
        Ok(())
    }
}

/// Runtime configuration shared by the CLI library and binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Buffer capacities.
    pub limits: Limits,
    /// Directory prefix for generated log paths.
    pub path_prefix: String,
    /// `tracing` filter directive applied to diagnostics.
    pub log_filter: String,
    /// Format used for diagnostics on standard error.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            path_prefix: defaults::default_path_prefix_string(),
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
        }
    }
}

impl Config {
    /// Buffer capacities in effect.
    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    /// Directory prefix for generated log paths.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// `tracing` filter directive applied to diagnostics.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Format used for diagnostics.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Rejects limits that would make every request fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the input buffer cannot hold a single
    /// identifier byte or the path buffer has no room at all.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.input_capacity < MIN_INPUT_CAPACITY {
            return Err(ConfigError::InputCapacityTooSmall {
                capacity: self.limits.input_capacity,
            });
        }
        if self.limits.path_capacity == 0 {
            return Err(ConfigError::ZeroPathCapacity);
        }
        Ok(())
    }
}

/// Errors raised when a [`Config`] cannot serve requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The identifier buffer has no room for data plus a terminator.
    #[error("input capacity {capacity} is below the minimum of {min}", min = MIN_INPUT_CAPACITY)]
    InputCapacityTooSmall {
        /// Configured capacity.
        capacity: usize,
    },
    /// The path buffer cannot hold any byte.
    #[error("path capacity must be greater than zero")]
    ZeroPathCapacity,
    /// The response buffer cannot hold a fixed response literal.
    #[error("response capacity {capacity} cannot hold a {required}-byte response")]
    ResponseCapacityTooSmall {
        /// Configured capacity.
        capacity: usize,
        /// Length of the literal that must fit.
        required: usize,
    },
}
