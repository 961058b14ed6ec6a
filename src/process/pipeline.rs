/*!
 * Pipeline Coordinator
 * Runs two commands connected by an anonymous channel
 */

use super::control::ProcessControl;
use super::executor::{open_input, open_output};
use super::manager::JobManager;
use super::types::{CommandSpec, Endpoint, ProcessError, ProcessResult, SpawnRequest};
use crate::core::types::Pid;
use tracing::{debug, warn};

/// `left | right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub left: CommandSpec,
    pub right: CommandSpec,
}

impl PipelineRequest {
    pub fn new(left: CommandSpec, right: CommandSpec) -> Self {
        Self { left, right }
    }

    /// The connected ends may not also be redirected
    pub fn validate(&self) -> ProcessResult<()> {
        if self.left.output_redirect.is_some() {
            return Err(ProcessError::RedirectConflict(
                "left side of a pipe redirects its output",
            ));
        }
        if self.right.input_redirect.is_some() {
            return Err(ProcessError::RedirectConflict(
                "right side of a pipe redirects its input",
            ));
        }
        if self.left.program.is_empty() || self.right.program.is_empty() {
            return Err(ProcessError::EmptyCommand);
        }
        Ok(())
    }
}

impl<C: ProcessControl> JobManager<C> {
    /// Run `left | right` and block until both stages have terminated.
    ///
    /// Each endpoint is consumed by the spawn that hands it to a child, so
    /// the shell's copy of the write end is already closed when the right
    /// stage starts. The right stage therefore sees end-of-stream as soon as
    /// the left one exits.
    pub fn run_pipeline(&mut self, request: PipelineRequest) -> ProcessResult<(Pid, Pid)> {
        if let Err(e) = request.validate() {
            warn!(error = %e, "pipeline rejected");
            return Err(e);
        }
        let PipelineRequest { left, right } = request;

        let (read_end, write_end) = match self.control.open_channel() {
            Ok(ends) => ends,
            Err(e) => {
                warn!(error = %e, "pipeline aborted");
                return Err(e);
            }
        };

        let left_stdin = open_input(left.input_redirect.as_deref());
        let left_pid = match self.control.spawn(SpawnRequest::new(
            &left,
            left_stdin,
            Endpoint::Pipe(write_end),
        )) {
            Ok(pid) => pid,
            Err(e) => {
                // read_end drops here
                warn!(error = %e, "pipeline left stage failed");
                return Err(e);
            }
        };
        let record = self.table.register(left, left_pid);
        debug!(pid = left_pid, command = record.command.name(), "launched pipeline stage");

        let right_stdout = open_output(right.output_redirect.as_deref());
        let right_pid = match self.control.spawn(SpawnRequest::new(
            &right,
            Endpoint::Pipe(read_end),
            right_stdout,
        )) {
            Ok(pid) => pid,
            Err(e) => {
                warn!(error = %e, "pipeline right stage failed");
                // The left stage is already running; don't leave it unreaped
                let _ = self.wait_for(left_pid);
                return Err(e);
            }
        };
        let record = self.table.register(right, right_pid);
        debug!(pid = right_pid, command = record.command.name(), "launched pipeline stage");

        // Wait on each known pid, never on "any child"
        let left_done = self.wait_for(left_pid);
        let right_done = self.wait_for(right_pid);
        left_done.and(right_done)?;

        Ok((left_pid, right_pid))
    }
}
