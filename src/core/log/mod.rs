use crate::core::event::QueueEvent;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// In-memory record of queue operations.
///
/// Has its own lock so recording never widens the queue's critical section
/// beyond a push onto this buffer.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<VecDeque<QueueEvent>>,
    limit: Option<usize>,
}

impl Journal {
    /// `limit` caps retained entries; zero is rejected
    pub fn new(limit: Option<usize>) -> Self {
        assert!(limit != Some(0), "journal limit must be greater than zero");
        Self {
            entries: Mutex::new(VecDeque::new()),
            limit,
        }
    }

    /// Record an event, evicting the oldest one when the limit is reached
    pub fn record(&self, event: QueueEvent) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(limit) = self.limit {
            while entries.len() >= limit {
                entries.pop_front();
            }
        }
        let before = entries.len();
        entries.push_back(event);

        // --- Negative-space assertion: journal grew by exactly one entry ---
        assert_eq!(entries.len(), before + 1, "Journal must grow by exactly one entry");
    }

    /// Snapshot of every retained entry, oldest first
    pub fn entries(&self) -> Vec<QueueEvent> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Append entries to `path` as NDJSON, one event per line
pub fn append_logs(log: &[QueueEvent], path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    for entry in log {
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{}", json)?; // one JSON object per line
    }
    file.flush()
}

/// Read back an NDJSON journal written by [`append_logs`]. Blank lines are skipped.
pub fn read_logs(path: impl AsRef<Path>) -> std::io::Result<Vec<QueueEvent>> {
    let reader = BufReader::new(File::open(path)?);
    let mut events = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(serde_json::from_str(&line)?);
    }
    Ok(events)
}
