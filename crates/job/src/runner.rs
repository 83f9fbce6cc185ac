//! External process execution

use std::ffi::OsStr;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

use crate::invocation::DownloaderInvocation;

/// Exit status of a finished child process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Process launching seam. `run` blocks until the downloader exits;
/// `launch` starts a helper (file browser) without waiting for it.
pub trait ProcessRunner {
    fn run(&self, invocation: &DownloaderInvocation) -> std::io::Result<RunStatus>;

    fn launch(&self, program: &str, args: &[&OsStr]) -> std::io::Result<()>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &DownloaderInvocation) -> std::io::Result<RunStatus> {
        (**self).run(invocation)
    }

    fn launch(&self, program: &str, args: &[&OsStr]) -> std::io::Result<()> {
        (**self).launch(program, args)
    }
}

/// Runs processes with `std::process::Command`, inheriting stdio so the
/// downloader's own progress output reaches the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &DownloaderInvocation) -> std::io::Result<RunStatus> {
        let status = Command::new(invocation.program())
            .args(invocation.args())
            .status()?;
        debug!("{} exited with {:?}", invocation.program(), status.code());
        Ok(status.into())
    }

    fn launch(&self, program: &str, args: &[&OsStr]) -> std::io::Result<()> {
        // Detached: the child handle is dropped without waiting
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// `<executable> --version`, first line of stdout. `None` if the binary
/// cannot be started or reports failure.
pub fn probe_version(executable: &str) -> Option<String> {
    let output = Command::new(executable).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.lines().next().unwrap_or("").trim();
    Some(if version.is_empty() {
        "unknown".to_string()
    } else {
        version.to_string()
    })
}
