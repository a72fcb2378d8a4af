//! Command selection and single-shot dispatch.
//!
//! A [`Dispatcher`] is the awaiting-command state. [`Dispatcher::dispatch`]
//! consumes it and yields an [`Outcome`], the dispatched state, so a second
//! dispatch cannot be expressed.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::AppError;
use crate::compose::{Composer, GeneratedPath, ResponseMessage};
use crate::input::InputReader;

/// Selector value for [`Command::CreateLogFile`].
pub const CREATE_LOG_FILE_SELECTOR: i64 = 1;

/// The closed set of commands accepted on standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Derive a log path from an identifier read next.
    CreateLogFile,
    /// Any other selector, kept verbatim for the rejection message.
    Unrecognized(i64),
}

impl Command {
    /// Maps a parsed selector onto a command. Every integer is accepted.
    #[must_use]
    pub const fn from_selector(selector: i64) -> Self {
        match selector {
            CREATE_LOG_FILE_SELECTOR => Self::CreateLogFile,
            other => Self::Unrecognized(other),
        }
    }
}

/// Result of the one dispatch a process performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    command: Command,
    path: Option<GeneratedPath>,
    response: ResponseMessage,
}

impl Outcome {
    /// Command that was dispatched.
    #[must_use]
    pub const fn command(&self) -> Command {
        self.command
    }

    /// Path derived for [`Command::CreateLogFile`].
    #[must_use]
    pub const fn path(&self) -> Option<&GeneratedPath> {
        self.path.as_ref()
    }

    /// Response to emit on standard output.
    #[must_use]
    pub const fn response(&self) -> &ResponseMessage {
        &self.response
    }
}

/// Routes one command to its composer.
#[derive(Debug)]
pub struct Dispatcher<'a> {
    composer: &'a Composer,
    identifier_limit: usize,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher awaiting its single command.
    ///
    /// `identifier_limit` is the most identifier bytes read for
    /// [`Command::CreateLogFile`], normally [`Limits::identifier_limit`].
    ///
    /// [`Limits::identifier_limit`]: tmplog_config::Limits::identifier_limit
    #[must_use]
    pub const fn new(composer: &'a Composer, identifier_limit: usize) -> Self {
        Self {
            composer,
            identifier_limit,
        }
    }

    /// Handles `command`, reading the identifier from `input` when needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Input`] when the identifier cannot be read and
    /// [`AppError::Overflow`] when a composed value exceeds its capacity.
    pub fn dispatch<R, P>(
        self,
        command: Command,
        input: &mut InputReader<R, P>,
    ) -> Result<Outcome, AppError>
    where
        R: BufRead,
        P: Write,
    {
        debug!(?command, "dispatching command");
        match command {
            Command::CreateLogFile => {
                let identifier = input.read_identifier(self.identifier_limit)?;
                let path = self.composer.compose_path(&identifier)?;
                info!(%path, "derived log path");
                Ok(Outcome {
                    command,
                    path: Some(path),
                    response: self.composer.compose_success(),
                })
            }
            Command::Unrecognized(selector) => {
                info!(selector, "rejecting unrecognised selector");
                Ok(Outcome {
                    command,
                    path: None,
                    response: self.composer.compose_rejection(selector)?,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Sink};

    use rstest::rstest;
    use tmplog_config::{Config, Limits};

    use super::*;
    use crate::InputError;

    fn dispatch_with(config: &Config, command: Command, rest: &[u8]) -> Result<Outcome, AppError> {
        let composer = Composer::new(config).expect("valid config");
        let mut input: InputReader<_, Sink> = InputReader::new(Cursor::new(rest.to_vec()), None);
        Dispatcher::new(&composer, config.limits().identifier_limit())
            .dispatch(command, &mut input)
    }

    #[rstest]
    #[case(1, Command::CreateLogFile)]
    #[case(0, Command::Unrecognized(0))]
    #[case(2, Command::Unrecognized(2))]
    #[case(-1, Command::Unrecognized(-1))]
    #[case(i64::MAX, Command::Unrecognized(i64::MAX))]
    fn maps_selectors(#[case] selector: i64, #[case] expected: Command) {
        assert_eq!(Command::from_selector(selector), expected);
    }

    #[test]
    fn create_log_file_derives_path() {
        let outcome = dispatch_with(&Config::default(), Command::CreateLogFile, b"mylog")
            .expect("dispatch succeeds");
        assert_eq!(outcome.command(), Command::CreateLogFile);
        assert_eq!(
            outcome.path().map(ToString::to_string).as_deref(),
            Some("/tmp/mylog_5")
        );
        assert_eq!(outcome.response().as_text(), "SUCCESS: Log file created.\n");
    }

    #[test]
    fn unrecognised_selector_reads_nothing_more() {
        let outcome = dispatch_with(&Config::default(), Command::Unrecognized(-7), b"")
            .expect("dispatch succeeds");
        assert!(outcome.path().is_none());
        assert_eq!(
            outcome.response().as_text(),
            "Sorry, choice -7 is not accepted\n"
        );
    }

    #[test]
    fn create_log_file_requires_identifier() {
        let error = dispatch_with(&Config::default(), Command::CreateLogFile, b"")
            .expect_err("identifier missing");
        assert!(matches!(
            error,
            AppError::Input(InputError::EndOfInput { .. })
        ));
    }

    #[test]
    fn path_overflow_surfaces_as_overflow() {
        let config = Config {
            limits: Limits {
                path_capacity: 10,
                ..Limits::default()
            },
            ..Config::default()
        };
        let error = dispatch_with(&config, Command::CreateLogFile, b"abcd")
            .expect_err("path overflows");
        assert!(matches!(error, AppError::Overflow(ref overflow) if overflow.required == 11));
    }
}
