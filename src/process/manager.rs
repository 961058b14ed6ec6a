/*!
 * Job Manager
 * Owns the process table and the OS control capability, and exposes the
 * job-control entry points to the interactive loop
 */

use super::control::{ProcessControl, UnixProcessControl};
use super::table::ProcessTable;
use super::types::{ProcessEntry, ProcessResult, ProcessStatus};
use crate::core::types::Pid;
use std::fmt::Write as _;
use tracing::{debug, info, warn};

/// Job-control state for one shell session.
///
/// Launching lives in `executor`, pipelines in `pipeline` and signal
/// dispatch in `signals::dispatcher`; they all extend this type.
pub struct JobManager<C: ProcessControl = UnixProcessControl> {
    pub(crate) table: ProcessTable,
    pub(crate) control: C,
}

impl JobManager<UnixProcessControl> {
    pub fn new() -> Self {
        Self::with_control(UnixProcessControl::new())
    }
}

impl Default for JobManager<UnixProcessControl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ProcessControl> JobManager<C> {
    /// Create a manager on top of a specific control backend
    pub fn with_control(control: C) -> Self {
        info!("Job manager initialized");
        Self {
            table: ProcessTable::new(),
            control,
        }
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Reconcile every record, then return the listing snapshot
    pub fn list(&mut self) -> Vec<ProcessEntry> {
        self.table.list(&self.control)
    }

    /// Evict terminated records. Call after a listing has been shown.
    pub fn remove_terminated(&mut self) -> usize {
        self.table.remove_terminated()
    }

    /// Drop all table state. Children are not reaped.
    pub fn shutdown(&mut self) {
        let tracked = self.table.len();
        self.table.clear_all();
        info!(tracked, "Job manager shut down");
    }

    /// Block until `pid` terminates, then record it as such
    pub(crate) fn wait_for(&mut self, pid: Pid) -> ProcessResult<()> {
        match self.control.wait(pid) {
            Ok(()) => {
                debug!(pid, "child terminated");
                self.table.set_status(pid, ProcessStatus::Terminated);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "wait failed");
                Err(e)
            }
        }
    }
}

/// Format a listing: a header row, then one `pid command status` line per
/// entry with pid and command left-aligned in 12 columns
pub fn render_table(entries: &[ProcessEntry]) -> String {
    let mut out = String::from("PID          Command      STATUS\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<12}{:<12}{}",
            entry.pid, entry.command, entry.status
        );
    }
    out
}
