use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::game_state::GameState;

/// Everything the controller needs to resume a session: the game state
/// itself plus the currently offered menu and whether the player still
/// owes us a reward pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub state: GameState,
    pub options: Vec<String>,
    pub awaiting_reward: bool,
}

#[derive(Debug, Error)]
#[error("no active game for session '{0}' - start a new game first")]
pub struct NoSession(pub String);

/// Per-client storage of session records. No cross-session visibility;
/// the implementation is expected to serialize access per key.
pub trait SessionStore {
    fn load(&self, key: &str) -> Option<SessionRecord>;
    fn save(&mut self, key: &str, record: SessionRecord);
    fn clear(&mut self, key: &str);
}

/// In-process store backed by a plain map. Good enough for the terminal
/// front-end and for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: HashMap<String, SessionRecord>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Option<SessionRecord> {
        self.sessions.get(key).cloned()
    }

    fn save(&mut self, key: &str, record: SessionRecord) {
        self.sessions.insert(key.to_string(), record);
    }

    fn clear(&mut self, key: &str) {
        self.sessions.remove(key);
    }
}
