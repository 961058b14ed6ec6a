/*!
 * Process Launcher
 * Starts a single external command with optional redirections
 */

use super::control::ProcessControl;
use super::manager::JobManager;
use super::types::{CommandSpec, Endpoint, ProcessError, ProcessResult, SpawnRequest};
use crate::core::types::Pid;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, warn};

/// Open an input redirect target read-only.
///
/// Redirection is best effort: if the file can't be opened the failure is
/// reported and the child keeps the shell's stdin.
pub(crate) fn open_input(path: Option<&Path>) -> Endpoint {
    let Some(path) = path else {
        return Endpoint::Inherit;
    };
    match File::open(path) {
        Ok(file) => Endpoint::File(file),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "input redirection open failed");
            Endpoint::Inherit
        }
    }
}

/// Create or truncate an output redirect target. Best effort, like `open_input`.
pub(crate) fn open_output(path: Option<&Path>) -> Endpoint {
    let Some(path) = path else {
        return Endpoint::Inherit;
    };
    let opened = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path);
    match opened {
        Ok(file) => Endpoint::File(file),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "output redirection open failed");
            Endpoint::Inherit
        }
    }
}

impl<C: ProcessControl> JobManager<C> {
    /// Spawn `command`, track it, and wait for it if it is a foreground command.
    ///
    /// Nothing is registered if no child could be created. A program that
    /// fails to execute still leaves a child behind, which is tracked and
    /// later shows up as terminated.
    pub fn launch(&mut self, command: CommandSpec) -> ProcessResult<Pid> {
        if command.program.is_empty() {
            let err = ProcessError::EmptyCommand;
            warn!(error = %err, "launch rejected");
            return Err(err);
        }

        let stdin = open_input(command.input_redirect.as_deref());
        let stdout = open_output(command.output_redirect.as_deref());

        let pid = match self.control.spawn(SpawnRequest::new(&command, stdin, stdout)) {
            Ok(pid) => pid,
            Err(e) => {
                warn!(error = %e, "launch failed");
                return Err(e);
            }
        };

        let blocking = command.blocking;
        let record = self.table.register(command, pid);
        debug!(pid, command = record.command.name(), blocking, "launched child");

        if blocking {
            self.wait_for(pid)?;
        }
        Ok(pid)
    }
}
