//! Test support utilities for tmplog behavioural coverage.
//!
//! Supplies a harness that feeds escaped stdin text through the runtime and
//! captures its output, exit code and dispatch outcome so step definitions
//! and unit tests remain focused on their assertions.

use std::cell::RefCell;
use std::io::Cursor;
use std::process::ExitCode;

use anyhow::{Context, Result, bail, ensure};
use rstest::fixture;
use tmplog_config::Config;

use crate::{IoStreams, Outcome, execute, report};

#[derive(Default)]
pub(super) struct TestWorld {
    pub config: Config,
    pub prompts: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
    pub outcome: Option<Outcome>,
}

impl TestWorld {
    pub fn run(&mut self, input: &str) -> Result<()> {
        self.stdout.clear();
        self.stderr.clear();
        let mut stdin = Cursor::new(unescape(input.trim_matches('"'))?);
        let mut io = IoStreams::new(&mut stdin, &mut self.stdout, &mut self.stderr)
            .with_prompts(self.prompts);
        let result = execute(&self.config, &mut io);
        let exit = report(&result, io.stderr);
        self.exit_code = Some(exit);
        self.outcome = result.ok();
        Ok(())
    }

    pub fn stdout_text(&self) -> Result<String> {
        decode_utf8(self.stdout.clone(), "stdout")
    }

    pub fn stderr_text(&self) -> Result<String> {
        decode_utf8(self.stderr.clone(), "stderr")
    }

    pub fn generated_path(&self) -> Option<String> {
        self.outcome
            .as_ref()
            .and_then(Outcome::path)
            .map(ToString::to_string)
    }

    pub fn assert_exit_code(&self, expected: u8) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::from(expected),
            "expected exit code {expected}, got {:?}",
            exit
        );
        Ok(())
    }

    pub fn assert_failure(&self) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::FAILURE,
            "expected failure exit code, got {:?}",
            exit
        );
        Ok(())
    }
}

/// Expands `\n`, `\r`, `\t`, `\0` and `\\` so feature files can spell out
/// raw stdin bytes.
pub(super) fn unescape(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut encoded = [0_u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut encoded).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => bytes.push(b'\n'),
            Some('r') => bytes.push(b'\r'),
            Some('t') => bytes.push(b'\t'),
            Some('0') => bytes.push(0),
            Some('\\') => bytes.push(b'\\'),
            other => bail!("unsupported escape sequence {other:?} in {text:?}"),
        }
    }
    Ok(bytes)
}

pub(super) fn decode_utf8(buffer: Vec<u8>, label: &str) -> Result<String> {
    String::from_utf8(buffer).with_context(|| format!("{label} utf8"))
}

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}
