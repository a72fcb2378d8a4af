//! CLI entrypoint for the tmplog command processor.
//!
//! The binary takes no arguments. It installs diagnostics on standard error,
//! then delegates to [`tmplog_cli::run`] with the process's standard streams.
//! Prompts are shown only when standard input is a terminal.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use tmplog_cli::{IoStreams, telemetry};
use tmplog_config::Config;

fn main() -> ExitCode {
    let config = Config::default();
    let mut stderr = io::stderr().lock();
    if let Err(error) = telemetry::initialise(&config) {
        // Diagnostics are optional; the request still runs without them.
        let _ = writeln!(stderr, "warning: {error}");
    }

    let interactive = io::stdin().is_terminal();
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut streams =
        IoStreams::new(&mut stdin, &mut stdout, &mut stderr).with_prompts(interactive);
    tmplog_cli::run(&config, &mut streams)
}
