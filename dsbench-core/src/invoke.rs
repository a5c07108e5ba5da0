//! Synchronous invocation of external benchmark executables
//!
//! Benchmarks write their own result files; nothing is captured here beyond
//! how the process ended.

use crate::error::{InvokeError, InvokeResult};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, absent when the process was killed
    pub code: Option<i32>,
    /// Terminating signal (Unix only)
    pub signal: Option<i32>,
}

impl ExitOutcome {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Whether the process crashed or was killed instead of exiting
    #[must_use]
    pub const fn crashed(&self) -> bool {
        self.signal.is_some()
    }

    fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(0), _) => write!(f, "exited successfully"),
            (Some(code), _) => write!(f, "exit code {code}"),
            (None, Some(signal)) => write!(f, "terminated by signal {signal}"),
            (None, None) => write!(f, "terminated abnormally"),
        }
    }
}

/// Runs benchmark executables, optionally from a fixed working directory
#[derive(Debug, Clone, Default)]
pub struct BenchmarkInvoker {
    working_dir: Option<PathBuf>,
}

impl BenchmarkInvoker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every executable from `dir`
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Run `executable` with `args` and wait for it to exit
    ///
    /// A non-zero exit or a crash is returned as
    /// [`InvokeError::ExternalProcessFailure`]; callers decide whether that
    /// stops anything.
    pub fn run<S: AsRef<OsStr>>(&self, executable: &Path, args: &[S]) -> InvokeResult<ExitOutcome> {
        let program = self.resolve(executable);
        let mut command = Command::new(&program);
        command.args(args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        info!(executable = %program.display(), args = args.len(), "Running benchmark");
        let status = command.status().map_err(|source| InvokeError::Spawn {
            executable: program.clone(),
            source,
        })?;

        let outcome = ExitOutcome::from_status(status);
        debug!(executable = %program.display(), %outcome, "Benchmark finished");
        if outcome.success() {
            Ok(outcome)
        } else {
            Err(InvokeError::ExternalProcessFailure {
                executable: program,
                outcome,
            })
        }
    }

    // Relative paths with a directory part are taken relative to the working
    // directory; bare names are left for PATH lookup.
    fn resolve(&self, executable: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) if executable.is_relative() && executable.components().count() > 1 => {
                dir.join(executable)
            }
            _ => executable.to_path_buf(),
        }
    }
}
