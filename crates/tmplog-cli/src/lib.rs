//! Single-shot log path command processor.
//!
//! The runtime reads a command selector from standard input, optionally reads
//! a log identifier, derives a bounded log path from it, and writes exactly
//! one bounded response to standard output. Every failure is reported on
//! standard error before anything reaches standard output. The IO streams
//! are injected so tests can drive the whole pipeline in memory.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use tmplog_config::Config;
use tracing::{debug, warn};

mod buffer;
mod command;
mod compose;
mod errors;
mod input;
pub mod telemetry;

pub use buffer::{BoundedBuffer, OverflowError};
pub use command::{CREATE_LOG_FILE_SELECTOR, Command, Dispatcher, Outcome};
pub use compose::{Composer, GeneratedPath, ResponseMessage, SUCCESS_MESSAGE, emit};
pub use errors::AppError;
pub use input::{
    IdentifierViolation, InputError, InputReader, RawIdentifier, SELECTOR_LINE_LIMIT,
};

/// Bundles the IO streams provided to the runtime.
pub struct IoStreams<'a, R: BufRead, W: Write, E: Write> {
    stdin: &'a mut R,
    stdout: &'a mut W,
    stderr: &'a mut E,
    prompts: bool,
}

impl<'a, R, W, E> IoStreams<'a, R, W, E>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    /// Bundles the streams with prompting disabled.
    pub const fn new(stdin: &'a mut R, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
            prompts: false,
        }
    }

    /// Enables the interactive prompts on standard error.
    #[must_use]
    pub const fn with_prompts(mut self, prompts: bool) -> Self {
        self.prompts = prompts;
        self
    }
}

/// Handles one request and returns the process exit code.
#[must_use]
pub fn run<R, W, E>(config: &Config, io: &mut IoStreams<'_, R, W, E>) -> ExitCode
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let result = execute(config, io);
    report(&result, io.stderr)
}

/// Reads, dispatches and emits one request.
pub(crate) fn execute<R, W, E>(
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<Outcome, AppError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let composer = Composer::new(config)?;
    let outcome = {
        let prompt = io.prompts.then_some(&mut *io.stderr);
        let mut input = InputReader::new(&mut *io.stdin, prompt);
        let command = input.read_selector()?;
        Dispatcher::new(&composer, config.limits().identifier_limit())
            .dispatch(command, &mut input)?
    };
    emit(outcome.response(), io.stdout).map_err(AppError::Emit)?;
    Ok(outcome)
}

/// Maps a request result onto an exit code, describing failures on `stderr`.
pub(crate) fn report<E>(result: &Result<Outcome, AppError>, stderr: &mut E) -> ExitCode
where
    E: Write,
{
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            warn!(kind = error.kind(), %error, "request failed");
            if writeln!(stderr, "error: {error}").is_err() {
                debug!("failed to write error to stderr");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests;
