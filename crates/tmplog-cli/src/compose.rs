//! Path and response composition under fixed capacities.

use std::fmt;
use std::io::{self, Write};

use tmplog_config::{Config, ConfigError};
use tracing::debug;

use crate::buffer::{BoundedBuffer, OverflowError};
use crate::input::RawIdentifier;

/// Response written when a log path was derived.
pub const SUCCESS_MESSAGE: &str = "SUCCESS: Log file created.\n";

const PATH_SEPARATOR: &[u8] = b"_";
const REJECTION_HEAD: &[u8] = b"Sorry, choice ";
const REJECTION_TAIL: &[u8] = b" is not accepted\n";

/// A log path derived from an identifier and its length.
///
/// The path is only computed; nothing is created on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPath(BoundedBuffer);

impl GeneratedPath {
    /// Path bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length of the path in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the path has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GeneratedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

/// The single message written to standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage(BoundedBuffer);

impl ResponseMessage {
    /// Message bytes, limited to the used length.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Used length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the message has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message text.
    #[must_use]
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

/// Builds generated paths and responses within the configured capacities.
#[derive(Debug, Clone)]
pub struct Composer {
    path_prefix: String,
    path_capacity: usize,
    response_capacity: usize,
}

impl Composer {
    /// Captures the prefix and capacities from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid or the
    /// response capacity cannot hold [`SUCCESS_MESSAGE`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let limits = config.limits();
        limits.ensure_response_fits(SUCCESS_MESSAGE.len())?;
        Ok(Self {
            path_prefix: config.path_prefix().to_owned(),
            path_capacity: limits.path_capacity,
            response_capacity: limits.response_capacity,
        })
    }

    /// Builds `prefix + identifier + "_" + decimal(len(identifier))`.
    ///
    /// # Errors
    ///
    /// Returns [`OverflowError`] when the path would exceed the path
    /// capacity. No partial path is produced.
    pub fn compose_path(&self, identifier: &RawIdentifier) -> Result<GeneratedPath, OverflowError> {
        let length = identifier.len().to_string();
        let buffer = BoundedBuffer::compose(
            "generated path",
            self.path_capacity,
            &[
                self.path_prefix.as_bytes(),
                identifier.as_bytes(),
                PATH_SEPARATOR,
                length.as_bytes(),
            ],
        )?;
        let path = GeneratedPath(buffer);
        debug!(%path, "composed log path");
        Ok(path)
    }

    /// The fixed success response.
    #[must_use]
    pub fn compose_success(&self) -> ResponseMessage {
        ResponseMessage(BoundedBuffer::prechecked(
            SUCCESS_MESSAGE.as_bytes(),
            self.response_capacity,
        ))
    }

    /// Formats `"Sorry, choice {selector} is not accepted\n"`.
    ///
    /// # Errors
    ///
    /// Returns [`OverflowError`] when the formatted message would exceed the
    /// response capacity.
    pub fn compose_rejection(&self, selector: i64) -> Result<ResponseMessage, OverflowError> {
        let selector = selector.to_string();
        BoundedBuffer::compose(
            "response message",
            self.response_capacity,
            &[REJECTION_HEAD, selector.as_bytes(), REJECTION_TAIL],
        )
        .map(ResponseMessage)
    }
}

/// Writes exactly the used bytes of `message` and flushes.
///
/// # Errors
///
/// Returns the underlying IO error when the write or flush fails.
pub fn emit<W>(message: &ResponseMessage, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    out.write_all(message.as_bytes())?;
    out.flush()?;
    debug!(
        bytes = message.len(),
        capacity = message.0.capacity(),
        "emitted response"
    );
    Ok(())
}
