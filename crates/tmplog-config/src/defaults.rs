//! Built-in defaults for every configurable value.
//!
//! The tool reads no configuration files or environment variables, so these
//! values are the effective configuration of every production run.

use crate::logging::LogFormat;

/// Capacity of the identifier buffer, including room for a terminator.
pub const DEFAULT_INPUT_CAPACITY: usize = 256;

/// Maximum length of a generated log path.
pub const DEFAULT_PATH_CAPACITY: usize = 100;

/// Maximum length of the response written to standard output.
pub const DEFAULT_RESPONSE_CAPACITY: usize = 128;

/// Directory prefix prepended to every generated log path.
pub const DEFAULT_PATH_PREFIX: &str = "/tmp/";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Owned log filter value used where allocation is required.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned path prefix used where allocation is required.
#[must_use]
pub fn default_path_prefix_string() -> String {
    DEFAULT_PATH_PREFIX.to_owned()
}
