/*!
 * Process Table
 * Authoritative registry of launched children and their last known status
 */

use super::types::{CommandSpec, ProcessEntry, ProcessRecord, ProcessStatus};
use crate::core::types::Pid;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Insertion-ordered process table, newest record first.
///
/// Mutated only from the shell's single control thread: signal dispatch
/// writes optimistic statuses and reconciliation writes observed ones, and
/// nothing else synchronizes the two. Introducing a second thread that
/// touches the table requires adding a lock here.
#[derive(Debug, Default)]
pub struct ProcessTable {
    records: VecDeque<ProcessRecord>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly launched child with status `Running`.
    ///
    /// The table takes ownership of `command`.
    pub fn register(&mut self, command: CommandSpec, pid: Pid) -> &ProcessRecord {
        // A live record with the same pid means the kernel recycled it,
        // so the old child must be gone.
        for stale in self.records.iter_mut().filter(|r| r.pid == pid && r.is_live()) {
            debug!(pid, command = stale.command.name(), "pid reused, retiring old record");
            stale.status = ProcessStatus::Terminated;
        }

        self.records.push_front(ProcessRecord::new(command, pid));
        &self.records[0]
    }

    /// Newest record for `pid`
    pub fn find(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.pid == pid)
    }

    /// Overwrite the status of the newest record for `pid`.
    /// Untracked pids are ignored.
    pub fn set_status(&mut self, pid: Pid, status: ProcessStatus) {
        match self.records.iter_mut().find(|r| r.pid == pid) {
            Some(record) => record.status = status,
            None => trace!(pid, %status, "status update for untracked pid ignored"),
        }
    }

    /// Move the newest record for `pid` to `status` unless it is already
    /// terminated. Untracked pids are ignored.
    pub fn update_status(&mut self, pid: Pid, status: ProcessStatus) {
        if let Some(record) = self.records.iter_mut().find(|r| r.pid == pid) {
            record.status = record.status.reconcile(status);
        }
    }

    /// Listing rows in table order, without reconciling first
    pub fn snapshot(&self) -> Vec<ProcessEntry> {
        self.records.iter().map(ProcessEntry::from).collect()
    }

    /// Evict every terminated record, returning how many were dropped
    pub fn remove_terminated(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(ProcessRecord::is_live);
        let removed = before - self.records.len();
        if removed > 0 {
            debug!(removed, "evicted terminated processes");
        }
        removed
    }

    /// Drop every record without reaping. Used on shutdown.
    pub fn clear_all(&mut self) {
        self.records.clear();
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.records.iter().map(|r| r.pid).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.iter()
    }
}
