//! Narrative log sink.
//!
//! Resolvers report what happened through a [`LogSink`] so embedders can show
//! a game transcript. The sink is observational only; nothing reads it back
//! to make rule decisions. Developer diagnostics go through `tracing`
//! independently.
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Combat,
    Event,
    System,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogCategory::Combat => "combat",
            LogCategory::Event => "event",
            LogCategory::System => "system",
        };
        f.write_str(label)
    }
}

pub trait LogSink: Send + Sync {
    fn log(&self, category: LogCategory, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(LogCategory, &str) + Send + Sync,
{
    fn log(&self, category: LogCategory, message: &str) {
        self(category, message)
    }
}

/// Forwards every entry to `tracing` at info level, one target per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, category: LogCategory, message: &str) {
        match category {
            LogCategory::Combat => tracing::info!(target: "doomspire::combat", "{message}"),
            LogCategory::Event => tracing::info!(target: "doomspire::events", "{message}"),
            LogCategory::System => tracing::info!(target: "doomspire::system", "{message}"),
        }
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(LogCategory, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogCategory, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self, category: LogCategory) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, message)| message)
            .collect()
    }

    /// True if any entry of `category` contains `needle`.
    pub fn contains(&self, category: LogCategory, needle: &str) -> bool {
        self.messages(category)
            .iter()
            .any(|message| message.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, category: LogCategory, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((category, message.to_owned()));
        }
    }
}
