//! Error types for the CLI runtime.

use std::io;

use thiserror::Error;
use tmplog_config::ConfigError;

use crate::buffer::OverflowError;
use crate::input::InputError;

/// Any failure that ends a request before a response is emitted.
#[derive(Debug, Error)]
pub enum AppError {
    /// The configuration cannot serve requests.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Standard input did not supply a usable selector or identifier.
    #[error(transparent)]
    Input(#[from] InputError),
    /// A composed value exceeded its fixed capacity.
    #[error("composition overflow: {0}")]
    Overflow(#[from] OverflowError),
    /// Writing the response to standard output failed.
    #[error("failed to emit response: {0}")]
    Emit(#[source] io::Error),
}

impl AppError {
    /// Short machine-readable name of the failure, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Input(error) => error.kind(),
            Self::Overflow(_) => "overflow",
            Self::Emit(_) => "emit",
        }
    }
}
