//! Session-keyed result store.
//!
//! Holds each session's latest extraction results in memory. The store is
//! injected into handlers through application state rather than living in a
//! global, and a session's sequence is only ever replaced wholesale.
//! Concurrent uploads within one session race with last-writer-wins
//! semantics; no size bound is enforced.

use lading_domain::Record;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store mapping session id → that session's ResultSet.
pub struct ResultStore {
    sessions: RwLock<HashMap<String, Vec<Record>>>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Atomically replace a session's record sequence.
    pub fn replace(&self, session_id: &str, records: Vec<Record>) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(session_id.to_string(), records);
    }

    /// Read a session's current records; empty if the session is unknown.
    pub fn read(&self, session_id: &str) -> Vec<Record> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).cloned().unwrap_or_default()
    }

    /// Number of sessions currently holding results.
    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(vessel: &str) -> Record {
        Record::from_raw(
            json!({ "vessel": vessel }).as_object().unwrap(),
            "test.pdf",
        )
    }

    #[test]
    fn test_unknown_session_reads_empty() {
        let store = ResultStore::new();
        assert!(store.read("nobody").is_empty());
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn test_replace_and_read() {
        let store = ResultStore::new();
        store.replace("s1", vec![record("Ever Given")]);

        let records = store.read("s1");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("vessel"), Some("Ever Given"));
    }

    #[test]
    fn test_replace_overwrites_wholesale() {
        let store = ResultStore::new();
        store.replace("s1", vec![record("a"), record("b")]);
        store.replace("s1", vec![record("c")]);

        let records = store.read("s1");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("vessel"), Some("c"));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = ResultStore::new();
        store.replace("s1", vec![record("a")]);
        store.replace("s2", vec![record("b")]);

        assert_eq!(store.read("s1")[0].get("vessel"), Some("a"));
        assert_eq!(store.read("s2")[0].get("vessel"), Some("b"));
        assert_eq!(store.session_count(), 2);
    }
}
