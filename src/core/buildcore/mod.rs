pub use crate::core::{
    blocking::{BlockingQueue, SharedQueue},
    config::QueueConfig,
    event::{EventOp, QueueEvent},
    log::Journal,
};
use crate::core::error::ConfigError;
use std::sync::Arc;

/// Unified Queue Builder
#[derive(Debug, Clone)]
pub struct QueueBuilder {
    name: String,
    capacity: Option<usize>,
    journal: bool,
    journal_limit: Option<usize>,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueBuilder {
    /// Unbounded, unjournaled queue named "queue"
    pub fn new() -> Self {
        Self {
            name: "queue".to_string(),
            capacity: None,
            journal: false,
            journal_limit: None,
        }
    }

    /// Start from a config, rejecting zero capacities
    pub fn from_config(config: &QueueConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            name: config.name.clone(),
            capacity: config.capacity,
            journal: config.journal,
            journal_limit: config.journal_limit,
        })
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make `push` block once `capacity` items are queued
    pub fn capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        self.capacity = Some(capacity);
        self
    }

    pub fn journal(mut self, enabled: bool) -> Self {
        self.journal = enabled;
        self
    }

    /// Keep at most `limit` journal entries; implies `journal(true)`
    pub fn journal_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "journal limit must be greater than zero");
        self.journal = true;
        self.journal_limit = Some(limit);
        self
    }

    pub fn build<T>(self) -> BlockingQueue<T> {
        let journal = self.journal.then(|| Journal::new(self.journal_limit));
        BlockingQueue::from_parts(self.name, self.capacity, journal)
    }

    pub fn build_shared<T>(self) -> SharedQueue<T> {
        Arc::new(self.build())
    }
}
