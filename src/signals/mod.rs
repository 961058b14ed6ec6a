/*!
 * Signals Module
 * Maps shell control commands onto POSIX signals
 */

pub mod dispatcher;
pub mod types;

pub use types::{parse_pid, SignalError, SignalIntent, SignalResult};
