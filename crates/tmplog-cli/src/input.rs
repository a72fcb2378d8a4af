//! Standard input handling for the command selector and log identifier.
//!
//! Both reads are bounded at the point of reading: the selector line is
//! capped at [`SELECTOR_LINE_LIMIT`] bytes and the identifier at one less
//! than the configured input capacity. Only the bytes actually consumed are
//! ever treated as data. A selector line that runs past its cap is rejected
//! whole; its prefix is never parsed.

use std::io::{self, BufRead, Read, Write};
use std::num::ParseIntError;

use thiserror::Error;
use tracing::debug;

use crate::command::Command;

/// Longest selector line accepted, terminator included.
pub const SELECTOR_LINE_LIMIT: usize = 64;

const SELECTOR_PROMPT: &str = "Choose a command:";
const IDENTIFIER_PROMPT: &str = "Enter log file";

/// Bytes that may never appear in an identifier.
const FORBIDDEN_BYTES: &[u8] = b"\0/\\";

/// Errors raised while reading from standard input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The selector was not a valid integer.
    #[error("malformed command selector {token:?}: {source}")]
    Malformed {
        /// Trimmed text that failed to parse.
        token: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The selector line did not end within [`SELECTOR_LINE_LIMIT`] bytes.
    #[error("command selector line exceeds {limit} bytes")]
    SelectorTooLong {
        /// Longest accepted line, terminator included.
        limit: usize,
    },
    /// No data was available where data was required.
    #[error("unexpected end of input while reading the {expected}")]
    EndOfInput {
        /// What the reader was waiting for.
        expected: &'static str,
    },
    /// The identifier is unusable as a path component.
    #[error("invalid log identifier: {0}")]
    InvalidIdentifier(IdentifierViolation),
    /// Reading standard input failed.
    #[error("failed to read standard input: {0}")]
    Read(#[source] io::Error),
}

impl InputError {
    /// Short machine-readable name of the failure, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed_selector",
            Self::SelectorTooLong { .. } => "selector_too_long",
            Self::EndOfInput { .. } => "end_of_input",
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::Read(_) => "read_failed",
        }
    }
}

/// Why an identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierViolation {
    /// A null byte or path separator was found.
    #[error("byte {byte:#04x} at offset {offset} is not allowed")]
    ForbiddenByte {
        /// Rejected byte value.
        byte: u8,
        /// Position of the byte within the identifier.
        offset: usize,
    },
    /// The identifier does not leave room for a terminator.
    #[error("length {len} exceeds the limit of {limit} bytes")]
    TooLong {
        /// Identifier length.
        len: usize,
        /// Largest accepted length.
        limit: usize,
    },
}

/// Identifier bytes exactly as read, already validated for path use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIdentifier {
    bytes: Vec<u8>,
}

impl RawIdentifier {
    /// Validates `bytes` against an identifier limit of `limit` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidIdentifier`] when the identifier is
    /// longer than `limit` bytes or contains a null byte, `/` or `\`.
    pub fn new(bytes: impl Into<Vec<u8>>, limit: usize) -> Result<Self, InputError> {
        let bytes = bytes.into();
        if bytes.len() > limit {
            return Err(InputError::InvalidIdentifier(IdentifierViolation::TooLong {
                len: bytes.len(),
                limit,
            }));
        }
        if let Some((offset, &byte)) = bytes
            .iter()
            .enumerate()
            .find(|&(_, byte)| FORBIDDEN_BYTES.contains(byte))
        {
            return Err(InputError::InvalidIdentifier(
                IdentifierViolation::ForbiddenByte { byte, offset },
            ));
        }
        Ok(Self { bytes })
    }

    /// Number of identifier bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for the zero-length identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Identifier bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Reads the selector and identifier from a buffered source.
///
/// When a prompt sink is supplied, the interactive prompts are written to it
/// before each read. The binary passes standard error here only when
/// standard input is a terminal.
pub struct InputReader<R, P> {
    source: R,
    prompt: Option<P>,
}

impl<R, P> InputReader<R, P>
where
    R: BufRead,
    P: Write,
{
    /// Wraps `source`, optionally prompting on `prompt`.
    pub const fn new(source: R, prompt: Option<P>) -> Self {
        Self { source, prompt }
    }

    /// Reads the first non-blank line and parses it as a command selector.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EndOfInput`] when the source is exhausted first,
    /// [`InputError::SelectorTooLong`] when a line runs past
    /// [`SELECTOR_LINE_LIMIT`], and [`InputError::Malformed`] when the line is
    /// not a single integer.
    pub fn read_selector(&mut self) -> Result<Command, InputError> {
        self.prompt(SELECTOR_PROMPT);
        let mut line = Vec::with_capacity(SELECTOR_LINE_LIMIT);
        loop {
            line.clear();
            let read = self.read_bounded_line(SELECTOR_LINE_LIMIT, &mut line)?;
            if read == 0 {
                return Err(InputError::EndOfInput {
                    expected: "command selector",
                });
            }
            if read == SELECTOR_LINE_LIMIT && line.last() != Some(&b'\n') && !self.at_end()? {
                return Err(InputError::SelectorTooLong {
                    limit: SELECTOR_LINE_LIMIT,
                });
            }

            let text = String::from_utf8_lossy(&line);
            let token = text.trim();
            if token.is_empty() {
                continue;
            }
            let selector = token
                .parse::<i64>()
                .map_err(|source| InputError::Malformed {
                    token: token.to_owned(),
                    source,
                })?;
            debug!(selector, "parsed command selector");
            return Ok(Command::from_selector(selector));
        }
    }

    /// Reads one identifier line of at most `limit` bytes.
    ///
    /// A single trailing `\n` or `\r\n` ends the line and is not part of the
    /// identifier. A lone terminator therefore yields an empty identifier,
    /// while a source with no bytes left is an error.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EndOfInput`] when no byte could be read and
    /// [`InputError::InvalidIdentifier`] when validation fails.
    pub fn read_identifier(&mut self, limit: usize) -> Result<RawIdentifier, InputError> {
        self.prompt(IDENTIFIER_PROMPT);
        let mut bytes = Vec::with_capacity(limit);
        let read = self.read_bounded_line(limit, &mut bytes)?;
        if read == 0 {
            return Err(InputError::EndOfInput {
                expected: "log identifier",
            });
        }

        strip_line_terminator(&mut bytes);
        debug!(read, identifier_len = bytes.len(), "read log identifier");
        RawIdentifier::new(bytes, limit)
    }

    fn read_bounded_line(&mut self, limit: usize, buf: &mut Vec<u8>) -> Result<usize, InputError> {
        let limit = u64::try_from(limit).unwrap_or(u64::MAX);
        (&mut self.source)
            .take(limit)
            .read_until(b'\n', buf)
            .map_err(InputError::Read)
    }

    fn at_end(&mut self) -> Result<bool, InputError> {
        self.source
            .fill_buf()
            .map(<[u8]>::is_empty)
            .map_err(InputError::Read)
    }

    fn prompt(&mut self, text: &str) {
        if let Some(sink) = self.prompt.as_mut() {
            // Prompts are advisory; a closed stderr must not abort the request.
            if writeln!(sink, "{text}").and_then(|()| sink.flush()).is_err() {
                debug!("failed to write prompt");
            }
        }
    }
}

fn strip_line_terminator(bytes: &mut Vec<u8>) {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
}
