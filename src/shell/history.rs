/*!
 * Command History
 * Bounded ring of recent lines with `!!` / `!n` recall
 */

use ringbuf::traits::{Consumer, Observer, RingBuffer};
use ringbuf::HeapRb;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no commands in history")]
    Empty,

    #[error("!{0}: event not found")]
    NotFound(String),
}

/// Most recent lines, oldest first. Full buffers drop their oldest line.
pub struct History {
    entries: HeapRb<String>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HeapRb::new(capacity.max(1)),
        }
    }

    pub fn push(&mut self, line: String) {
        self.entries.push_overwrite(line);
    }

    pub fn len(&self) -> usize {
        self.entries.occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based, oldest first
    pub fn get(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.entries.iter().nth(i))
            .map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.iter().last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Resolve a `!!` or `!n` reference; other lines come back unchanged
    pub fn expand(&self, line: &str) -> Result<String, HistoryError> {
        let Some(reference) = line.strip_prefix('!') else {
            return Ok(line.to_string());
        };

        if reference == "!" {
            return self
                .latest()
                .map(str::to_string)
                .ok_or(HistoryError::Empty);
        }

        reference
            .parse::<usize>()
            .ok()
            .and_then(|n| self.get(n))
            .map(str::to_string)
            .ok_or_else(|| HistoryError::NotFound(reference.to_string()))
    }
}
