/*!
 * Status Reconciler
 * Syncs the process table with kernel-reported child state
 */

use super::control::ProcessControl;
use super::table::ProcessTable;
use super::types::ProcessEntry;
use tracing::{trace, warn};

impl ProcessTable {
    /// Probe every tracked pid without blocking and fold the result in.
    ///
    /// Terminated records are probed too so their zombies get collected,
    /// but their status never moves. Records are never removed here.
    pub fn reconcile_all<C: ProcessControl + ?Sized>(&mut self, control: &C) {
        for pid in self.pids() {
            match control.probe(pid) {
                Ok(outcome) => {
                    trace!(pid, ?outcome, "probed");
                    if let Some(observed) = outcome.status() {
                        self.update_status(pid, observed);
                    }
                }
                Err(e) => warn!(error = %e, "status probe failed"),
            }
        }
    }

    /// Reconcile, then snapshot for display
    pub fn list<C: ProcessControl + ?Sized>(&mut self, control: &C) -> Vec<ProcessEntry> {
        self.reconcile_all(control);
        self.snapshot()
    }
}
