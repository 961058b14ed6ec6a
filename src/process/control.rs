/*!
 * Process Control
 * OS-level capability for spawning, waiting on, probing and signaling children
 */

use super::types::{ProbeOutcome, ProcessError, ProcessResult, SpawnRequest};
use crate::core::types::{to_nix_pid, Pid};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{dup2, execvp, fork, ForkResult};
use std::ffi::CString;
use std::io;
use std::os::fd::{OwnedFd, RawFd};
use tracing::{trace, Level};

/// Exit status of a child whose program could not be executed
pub const EXEC_FAILURE_STATUS: i32 = 1;

/// Everything the job-control core needs from the operating system.
///
/// Every wait and probe targets one specific pid. There is no "any child"
/// wait, so an unrelated background child is never reaped by a foreground
/// wait.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessControl {
    /// Start a child with the given stream wiring. The endpoints are
    /// consumed: once this returns, the caller holds no copy of them.
    fn spawn(&self, request: SpawnRequest) -> ProcessResult<Pid>;

    /// Block until `pid` has exited or been killed by a signal
    fn wait(&self, pid: Pid) -> ProcessResult<()>;

    /// Non-blocking status check that also reports stop/continue
    fn probe(&self, pid: Pid) -> ProcessResult<ProbeOutcome>;

    /// Deliver a signal to `pid`
    fn signal(&self, pid: Pid, signal: Signal) -> Result<(), Errno>;

    /// Create an anonymous channel, returned as (read end, write end)
    fn open_channel(&self) -> ProcessResult<(OwnedFd, OwnedFd)>;
}

/// `ProcessControl` backed by `fork(2)`/`execvp(3)`, `waitpid(2)` and `kill(2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixProcessControl;

impl UnixProcessControl {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessControl for UnixProcessControl {
    fn spawn(&self, request: SpawnRequest) -> ProcessResult<Pid> {
        let SpawnRequest {
            program,
            args,
            stdin,
            stdout,
        } = request;

        // Everything the child touches is built before the fork
        let argv = std::iter::once(&program)
            .chain(args.iter())
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ProcessError::SpawnFailed {
                command: program.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, e),
            })?;
        let failure_note = tracing::enabled!(Level::WARN)
            .then(|| format!("jobshell: exec failed for '{}': ", program));
        let wiring = (stdin.raw_fd(), stdout.raw_fd());

        // SAFETY: the child only calls dup2, execvp, write and _exit.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => exec_child(&argv, wiring, failure_note.as_deref()),
            Ok(ForkResult::Parent { child }) => {
                // Close the shell's copies of the child's streams
                drop(stdin);
                drop(stdout);
                Ok(child.as_raw() as Pid)
            }
            Err(errno) => Err(ProcessError::SpawnFailed {
                command: program,
                source: io::Error::from(errno),
            }),
        }
    }

    fn wait(&self, pid: Pid) -> ProcessResult<()> {
        loop {
            match waitpid(to_nix_pid(pid), None) {
                Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => return Ok(()),
                Ok(status) => trace!(pid, ?status, "ignoring non-terminal wait status"),
                Err(Errno::EINTR) => continue,
                // Someone already collected it
                Err(Errno::ECHILD) => return Ok(()),
                Err(source) => return Err(ProcessError::WaitFailed { pid, source }),
            }
        }
    }

    fn probe(&self, pid: Pid) -> ProcessResult<ProbeOutcome> {
        let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
        match waitpid(to_nix_pid(pid), Some(flags)) {
            Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => Ok(ProbeOutcome::Exited),
            Ok(WaitStatus::Stopped(..)) => Ok(ProbeOutcome::Stopped),
            Ok(WaitStatus::StillAlive) => Ok(ProbeOutcome::NoChange),
            Ok(_) => Ok(ProbeOutcome::Continued),
            Err(Errno::ECHILD) => Ok(ProbeOutcome::Reaped),
            Err(source) => Err(ProcessError::ProbeFailed { pid, source }),
        }
    }

    fn signal(&self, pid: Pid, signal: Signal) -> Result<(), Errno> {
        kill(to_nix_pid(pid), signal)
    }

    fn open_channel(&self) -> ProcessResult<(OwnedFd, OwnedFd)> {
        // Close-on-exec so neither stage inherits the end meant for the other
        #[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
        let ends = nix::unistd::pipe2(nix::fcntl::OFlag::O_CLOEXEC);
        #[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
        let ends = nix::unistd::pipe();

        ends.map_err(ProcessError::PipeFailed)
    }
}

/// Child side of `spawn`: install the streams and replace the image.
///
/// Never returns. If the program can't be executed the failure goes to
/// stderr (only when the debug channel is on) and the child exits with
/// `EXEC_FAILURE_STATUS`, so the shell reaps it like any other child.
fn exec_child(
    argv: &[CString],
    (stdin, stdout): (Option<RawFd>, Option<RawFd>),
    note: Option<&str>,
) -> ! {
    // Best effort, same as opening the redirect targets
    if let Some(fd) = stdin {
        let _ = dup2(fd, 0);
    }
    if let Some(fd) = stdout {
        let _ = dup2(fd, 1);
    }

    if let Err(errno) = execvp(&argv[0], argv) {
        if let Some(note) = note {
            let _ = nix::unistd::write(io::stderr(), note.as_bytes());
            let _ = nix::unistd::write(io::stderr(), errno.desc().as_bytes());
            let _ = nix::unistd::write(io::stderr(), b"\n");
        }
    }
    // SAFETY: _exit(2) is async-signal-safe and never returns.
    unsafe { nix::libc::_exit(EXEC_FAILURE_STATUS) }
}
