//! Sessions — one candidate conversation each, held in a process-local store.
//!
//! A session owns its engine, transcript and export slot exclusively. Each
//! session sits behind its own mutex, so turns and resets never interleave.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::intake::engine::ConversationEngine;
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
    engine: ConversationEngine,
    messages: Vec<ChatMessage>,
    /// Serialized record published on completion for one-time download.
    download_json: Option<String>,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            last_active: now,
            engine: ConversationEngine::new(),
            messages: Vec::new(),
            download_json: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn engine(&self) -> &ConversationEngine {
        &self.engine
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn download_json(&self) -> Option<&str> {
        self.download_json.as_deref()
    }

    /// Runs one chat turn. The first message of a session only triggers the
    /// greeting; every later message goes through the engine.
    pub async fn handle_user_message(&mut self, content: &str, llm: &dyn TextGenerator) -> String {
        self.last_active = Utc::now();
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.to_string(),
        });

        let reply = if self.messages.len() == 1 {
            self.engine.greet(llm).await
        } else {
            self.engine.process_message(content, llm).await
        };

        if self.download_json.is_none() {
            if let Some(json) = self.engine.export_json() {
                info!(session_id = %self.id, "Candidate record ready for export");
                self.download_json = Some(json);
            }
        }

        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: reply.clone(),
        });
        reply
    }

    /// Discards everything and starts a fresh interview under the same id.
    pub fn reset(&mut self) {
        let discarded_record = !self.engine.candidate_info().is_empty();
        *self = Session::new(self.id);
        info!(session_id = %self.id, discarded_record, "Session reset");
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

/// Process-local map of live sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(id)));
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session);
        info!(session_id = %id, active_sessions = sessions.len(), "Session created");
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops a session. Returns false when the id is unknown.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    /// Drops every session idle for at least `max_idle` as of `now`.
    /// Sessions locked by an in-flight turn are kept.
    pub async fn prune_idle(&self, max_idle: Duration, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => now - session.last_active() < max_idle,
            Err(_) => true,
        });
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!(pruned, active_sessions = sessions.len(), "Pruned idle sessions");
        }
        pruned
    }
}
