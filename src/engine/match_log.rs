//! Match transcript
//!
//! Records match events in chronological order for display and post-match
//! export. In-memory only; nothing survives the process.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Kinds of transcript events, for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogKind {
    /// Initial roll of a turn
    Roll,
    /// Final rolled set after negotiation
    Reroll,
    /// A resolved face effect
    Effect,
    /// A resolved spell cast
    Cast,
    /// Match-level event (start, end, abort)
    Match,
}

/// A single transcript entry
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Turn cycle the event happened in (0 for pre-match events)
    pub turn: u32,
    pub kind: LogKind,
    pub message: String,
}

/// The match transcript
#[derive(Debug, Default)]
pub struct MatchLog {
    entries: Vec<LogEntry>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn record(&mut self, turn: u32, kind: LogKind, message: impl Into<String>) {
        self.entries.push(LogEntry {
            turn,
            kind,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries of one kind, in order
    pub fn of_kind(&self, kind: LogKind) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// Write the transcript as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)
            .with_context(|| format!("writing match log to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_filter() {
        let mut log = MatchLog::new();
        log.record(0, LogKind::Match, "start");
        log.record(1, LogKind::Roll, "rolled");
        log.record(1, LogKind::Effect, "hit");
        log.record(1, LogKind::Effect, "heal");

        assert_eq!(log.entries().len(), 4);
        assert_eq!(log.of_kind(LogKind::Effect).len(), 2);
        assert_eq!(log.of_kind(LogKind::Cast).len(), 0);
        assert_eq!(log.of_kind(LogKind::Roll)[0].message, "rolled");
    }

    #[test]
    fn test_save_writes_json() {
        let mut log = MatchLog::new();
        log.record(1, LogKind::Match, "start");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        log.save(&path).unwrap();

        let data = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["message"], "start");
    }
}
