/*!
 * Shell Configuration
 */

use std::time::Duration;

/// Default number of remembered command lines
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Default pause after each dispatched line
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Settings for one interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Enables the debug channel
    pub debug: bool,
    pub trace_json: bool,
    pub history_capacity: usize,
    /// Gives a just-started background child a moment to write before the
    /// next prompt is printed
    pub settle_delay: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            debug: false,
            trace_json: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl ShellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_trace_json(mut self, json: bool) -> Self {
        self.trace_json = json;
        self
    }

    /// Capacity is clamped to at least one entry
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}
