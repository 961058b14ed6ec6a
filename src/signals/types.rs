/*!
 * Signal Types
 * Shell-level control intents and their POSIX signal mapping
 */

use crate::core::types::Pid;
use crate::process::types::ProcessStatus;
use miette::Diagnostic;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use std::fmt;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Signal errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SignalError {
    #[error("PID not provided")]
    #[diagnostic(code(signal::missing_pid), help("Usage: halt|wakeup|ice <pid>"))]
    MissingPid,

    #[error("invalid PID: {0:?}")]
    #[diagnostic(code(signal::invalid_pid))]
    InvalidPid(String),

    #[error("signal {signal} to PID {pid} failed: {source}")]
    #[diagnostic(code(signal::delivery_failed))]
    DeliveryFailed {
        pid: Pid,
        signal: Signal,
        #[source]
        source: Errno,
    },
}

/// What the user asked a process to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalIntent {
    /// Stop (`halt`)
    Halt,
    /// Continue (`wakeup`)
    Wakeup,
    /// Interrupt (`ice`)
    Interrupt,
}

impl SignalIntent {
    pub fn signal(self) -> Signal {
        match self {
            SignalIntent::Halt => Signal::SIGSTOP,
            SignalIntent::Wakeup => Signal::SIGCONT,
            SignalIntent::Interrupt => Signal::SIGINT,
        }
    }

    /// Status recorded optimistically once delivery succeeds
    pub fn status(self) -> ProcessStatus {
        match self {
            SignalIntent::Halt => ProcessStatus::Suspended,
            SignalIntent::Wakeup => ProcessStatus::Running,
            SignalIntent::Interrupt => ProcessStatus::Terminated,
        }
    }
}

impl fmt::Display for SignalIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalIntent::Halt => "halt",
            SignalIntent::Wakeup => "wakeup",
            SignalIntent::Interrupt => "ice",
        };
        f.write_str(name)
    }
}

/// Parse a user-supplied pid. Zero and negative values are rejected since
/// `kill(2)` would treat them as process-group targets.
pub fn parse_pid(text: &str) -> SignalResult<Pid> {
    match text.trim().parse::<Pid>() {
        Ok(pid) if pid > 0 && pid <= i32::MAX as Pid => Ok(pid),
        _ => Err(SignalError::InvalidPid(text.to_string())),
    }
}
