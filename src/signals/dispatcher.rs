/*!
 * Signal Dispatcher
 * Delivers halt/wakeup/ice to a pid and records the expected status
 */

use super::types::{parse_pid, SignalError, SignalIntent, SignalResult};
use crate::core::types::Pid;
use crate::process::control::ProcessControl;
use crate::process::manager::JobManager;
use tracing::{debug, warn};

impl<C: ProcessControl> JobManager<C> {
    /// Send the signal for `intent` to the pid named by `pid_text`.
    ///
    /// On success the tracked record is moved to the intent's status right
    /// away; the next reconciliation may correct it but never revives a
    /// terminated record. On failure the table is untouched.
    pub fn signal(&mut self, pid_text: Option<&str>, intent: SignalIntent) -> SignalResult<Pid> {
        let result = self.deliver(pid_text, intent);
        if let Err(ref e) = result {
            warn!(error = %e, %intent, "signal failed");
        }
        result
    }

    fn deliver(&mut self, pid_text: Option<&str>, intent: SignalIntent) -> SignalResult<Pid> {
        let pid = parse_pid(pid_text.ok_or(SignalError::MissingPid)?)?;
        let signal = intent.signal();

        self.control
            .signal(pid, signal)
            .map_err(|source| SignalError::DeliveryFailed { pid, signal, source })?;

        debug!(pid, %intent, ?signal, "signal delivered");
        self.table.update_status(pid, intent.status());
        Ok(pid)
    }
}
