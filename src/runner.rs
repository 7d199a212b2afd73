use crate::error::{HarnessError, Result};
use log::trace;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Times a single invocation of a program.
pub trait Runner {
    /// Run `program` with `args` to completion and return the elapsed
    /// wall-clock time in seconds.
    fn run_once(&mut self, program: &Path, args: &[String]) -> Result<f64>;
}

/// Runs the target as a child process and blocks until it exits.
///
/// There is no timeout: a target that never exits hangs the harness. The
/// child's exit status and output are not inspected - a crashing target is
/// timed like any other.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Runner for ProcessRunner {
    fn run_once(&mut self, program: &Path, args: &[String]) -> Result<f64> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let start = Instant::now();
        let status = command.status().map_err(|source| HarnessError::Launch {
            program: program.to_path_buf(),
            source,
        })?;
        let elapsed = start.elapsed().as_secs_f64();

        trace!("{} {:?} exited with {status} after {elapsed:e}s", program.display(), args);
        Ok(elapsed)
    }
}
