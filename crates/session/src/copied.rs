//! Transient "copied" feedback per file id

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// How long a file shows as copied.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Copied markers with their expiry deadlines.
///
/// Re-marking a file replaces its deadline, so repeated copies never stack.
#[derive(Clone, Debug, Default)]
pub struct CopiedFiles {
    deadlines: HashMap<String, Instant>,
}

impl CopiedFiles {
    pub fn mark(&mut self, file_id: &str, now: Instant) {
        self.deadlines.insert(file_id.to_string(), now + COPY_FEEDBACK);
    }

    pub fn is_copied(&self, file_id: &str, now: Instant) -> bool {
        self.deadlines.get(file_id).is_some_and(|deadline| now < *deadline)
    }

    /// Drop expired markers and return their ids.
    pub fn expire(&mut self, now: Instant) -> Vec<String> {
        let mut expired: Vec<String> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(id, _)| id.clone())
            .collect();
        expired.sort();

        for id in &expired {
            self.deadlines.remove(id);
            debug!(file_id = %id, "copied marker cleared");
        }
        expired
    }

    /// Earliest pending deadline, for scheduling the next `expire`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
