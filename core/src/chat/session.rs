//! Per-sender conversation state, keyed by sender identity.

use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use std::sync::Arc;

/// History entries kept per sender. Older entries are dropped.
const MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub destination: Option<String>,
    pub days: Option<u32>,
    /// "role: text" lines, oldest first, bounded at MAX_HISTORY
    pub history: Vec<String>,
}

impl SessionState {
    pub fn push_history(&mut self, role: &str, text: &str) {
        self.history.push(format!("{role}: {text}"));
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }
}

/// Process-lifetime store of conversation state. The DashMap shard
/// locks serialize concurrent access per sender.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a sender's state, created on first use. The
    /// returned guard holds the shard lock until dropped.
    pub fn entry(&self, sender: &str) -> RefMut<'_, String, SessionState> {
        self.sessions.entry(sender.to_string()).or_default()
    }

    /// The last `n` history lines for a sender, oldest first
    pub fn recent_history(&self, sender: &str, n: usize) -> Vec<String> {
        self.sessions
            .get(sender)
            .map(|state| {
                let history = &state.history;
                let start = history.len().saturating_sub(n);
                history[start..].to_vec()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
