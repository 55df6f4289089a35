//! CLI entrypoint for the callmap prompt and diagram tool.
//!
//! The binary delegates to [`callmap_cli::run`], which loads configuration,
//! parses the command, and renders prompts or diagrams from a serialised
//! call tree.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    callmap_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
