/*!
 * Process Types
 * Common types for job control: commands, records, status and errors
 */

use crate::core::types::Pid;
use miette::Diagnostic;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use std::path::PathBuf;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Diagnostic)]
pub enum ProcessError {
    #[error("empty command")]
    #[diagnostic(code(process::empty_command))]
    EmptyCommand,

    #[error("fork failed for '{command}': {source}")]
    #[diagnostic(
        code(process::spawn_failed),
        help("The shell could not create a child; arguments may not contain NUL bytes.")
    )]
    SpawnFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("can't mix pipe and I/O redirect: {0}")]
    #[diagnostic(
        code(process::redirect_conflict),
        help("Only the left stage may redirect input and only the right stage may redirect output.")
    )]
    RedirectConflict(&'static str),

    #[error("pipe failed: {0}")]
    #[diagnostic(code(process::pipe_failed))]
    PipeFailed(#[source] Errno),

    #[error("waitpid failed for PID {pid}: {source}")]
    #[diagnostic(code(process::wait_failed))]
    WaitFailed {
        pid: Pid,
        #[source]
        source: Errno,
    },

    #[error("status probe failed for PID {pid}: {source}")]
    #[diagnostic(code(process::probe_failed))]
    ProbeFailed {
        pid: Pid,
        #[source]
        source: Errno,
    },
}

/// Last known status of a tracked child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Running,
    Suspended,
    Terminated,
}

impl ProcessStatus {
    /// Apply an observed status to the recorded one.
    ///
    /// `Terminated` is absorbing: once recorded, neither a probe nor a
    /// later signal may bring the record back.
    pub fn reconcile(self, observed: ProcessStatus) -> ProcessStatus {
        match self {
            ProcessStatus::Terminated => ProcessStatus::Terminated,
            _ => observed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Running => "Running",
            ProcessStatus::Suspended => "Suspended",
            ProcessStatus::Terminated => "Terminated",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed command stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub input_redirect: Option<PathBuf>,
    pub output_redirect: Option<PathBuf>,
    /// Foreground commands block the caller until they terminate
    pub blocking: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            input_redirect: None,
            output_redirect: None,
            blocking: true,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_redirect = Some(path.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_redirect = Some(path.into());
        self
    }

    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    /// Command name as shown in listings
    pub fn name(&self) -> &str {
        &self.program
    }
}

/// A tracked child process. Owns the command it was launched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub command: CommandSpec,
    pub pid: Pid,
    pub status: ProcessStatus,
}

impl ProcessRecord {
    pub fn new(command: CommandSpec, pid: Pid) -> Self {
        Self {
            command,
            pid,
            status: ProcessStatus::Running,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status != ProcessStatus::Terminated
    }
}

/// One row of a process listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessEntry {
    pub pid: Pid,
    pub command: String,
    pub status: ProcessStatus,
}

impl From<&ProcessRecord> for ProcessEntry {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid,
            command: record.command.name().to_string(),
            status: record.status,
        }
    }
}

/// Where a child's standard stream is connected
#[derive(Debug)]
pub enum Endpoint {
    /// Inherit the shell's own stream
    Inherit,
    /// A redirect target opened by the launcher
    File(File),
    /// One end of a pipeline channel
    Pipe(OwnedFd),
}

impl Endpoint {
    pub fn is_pipe(&self) -> bool {
        matches!(self, Endpoint::Pipe(_))
    }

    pub fn is_inherit(&self) -> bool {
        matches!(self, Endpoint::Inherit)
    }

    /// Descriptor to install in the child, `None` to keep the shell's own
    pub fn raw_fd(&self) -> Option<RawFd> {
        match self {
            Endpoint::Inherit => None,
            Endpoint::File(file) => Some(file.as_raw_fd()),
            Endpoint::Pipe(fd) => Some(fd.as_raw_fd()),
        }
    }
}

/// Everything needed to start one child
#[derive(Debug)]
pub struct SpawnRequest {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Endpoint,
    pub stdout: Endpoint,
}

impl SpawnRequest {
    pub fn new(command: &CommandSpec, stdin: Endpoint, stdout: Endpoint) -> Self {
        Self {
            program: command.program.clone(),
            args: command.args.clone(),
            stdin,
            stdout,
        }
    }
}

/// Result of a non-blocking status probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Exited or killed by a signal
    Exited,
    Stopped,
    Continued,
    /// Alive, nothing new to report
    NoChange,
    /// Already reaped by an earlier blocking wait
    Reaped,
}

impl ProbeOutcome {
    /// Status implied by this outcome, if any
    pub fn status(self) -> Option<ProcessStatus> {
        match self {
            ProbeOutcome::Exited | ProbeOutcome::Reaped => Some(ProcessStatus::Terminated),
            ProbeOutcome::Stopped => Some(ProcessStatus::Suspended),
            ProbeOutcome::Continued => Some(ProcessStatus::Running),
            ProbeOutcome::NoChange => None,
        }
    }
}
