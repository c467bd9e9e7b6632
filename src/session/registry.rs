// Registry of running game sessions, shared between the HTTP API and the
// session tasks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::metrics;

use super::GameKind;

/// A running session, as listed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub game_id: String,
    /// Game type requested by the caller, passed through to the server.
    pub game_type: String,
    pub kind: GameKind,
    pub started_at: DateTime<Utc>,
}

impl SessionInfo {
    pub fn new(kind: GameKind, game_type: &str, game_id: &str) -> Self {
        SessionInfo {
            session_id: Uuid::new_v4(),
            game_id: game_id.to_string(),
            game_type: game_type.to_string(),
            kind,
            started_at: Utc::now(),
        }
    }
}

/// Thread-safe map of running sessions.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<Uuid, SessionInfo>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionInfo>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, info: SessionInfo) {
        let mut sessions = self.lock();
        sessions.insert(info.session_id, info);
        metrics::ACTIVE_SESSIONS.set(sessions.len() as i64);
    }

    pub fn remove(&self, session_id: Uuid) -> Option<SessionInfo> {
        let mut sessions = self.lock();
        let removed = sessions.remove(&session_id);
        metrics::ACTIVE_SESSIONS.set(sessions.len() as i64);
        removed
    }

    /// All sessions, oldest first.
    pub fn list(&self) -> Vec<SessionInfo> {
        let mut list: Vec<SessionInfo> = self.lock().values().cloned().collect();
        list.sort_by_key(|s| s.started_at);
        list
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
