// In-memory session store
//
// A session owns the walkthrough rooms, the chat transcript, and the
// selected-agent id for one user. This is the explicit replacement for the
// ambient browser-local storage in the original product: handlers receive
// the store, nothing reads global state. Sessions live for the process
// lifetime; there is no persistence.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::config::CostSchedule;
use crate::models::{
    ChatMessage, ItemStatus, MessageRole, WalkthroughItem, WalkthroughRoom,
};
use crate::walkthrough::assess_status;

/// Errors from session lookups and mutations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("room not found: {0}")]
    RoomNotFound(String),
    #[error("item not found: {0}")]
    ItemNotFound(String),
}

/// One user's walkthrough session
#[derive(Debug, Clone)]
pub struct WalkthroughSession {
    pub id: String,
    pub rooms: Vec<WalkthroughRoom>,
    pub transcript: Vec<ChatMessage>,
    pub selected_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Store of active sessions, keyed by generated session id
pub struct SessionStore {
    sessions: Mutex<HashMap<String, WalkthroughSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a session around a generated checklist; returns the new id
    pub fn create(&self, rooms: Vec<WalkthroughRoom>) -> String {
        let id = Uuid::new_v4().to_string();
        let session = WalkthroughSession {
            id: id.clone(),
            rooms,
            transcript: Vec::new(),
            selected_agent: None,
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions.insert(id.clone(), session);
        log::info!("[session] Created walkthrough session {}", id);
        id
    }

    /// Snapshot the rooms of a session
    pub fn rooms(&self, session_id: &str) -> Result<Vec<WalkthroughRoom>, SessionError> {
        let sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions
            .get(session_id)
            .map(|s| s.rooms.clone())
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }

    /// Apply a status change to an item, running the cost classifier.
    ///
    /// Items are never deleted within a session; re-applying the same status
    /// is a no-op beyond overwriting identical fields.
    pub fn update_item_status(
        &self,
        session_id: &str,
        room_id: &str,
        item_id: &str,
        status: ItemStatus,
        notes: Option<String>,
        costs: &CostSchedule,
    ) -> Result<WalkthroughItem, SessionError> {
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;

        let room = session
            .rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or_else(|| SessionError::RoomNotFound(room_id.to_string()))?;

        let item = room
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| SessionError::ItemNotFound(item_id.to_string()))?;

        let assessment = assess_status(&item.id, status, costs);
        item.status = status;
        item.estimated_repair_cost = assessment.estimated_repair_cost;
        item.negotiation_leverage = assessment.negotiation_leverage;
        if let Some(notes) = notes {
            item.notes = Some(notes);
        }

        log::debug!(
            "[session] {}/{}/{} -> {}",
            session_id,
            room_id,
            item_id,
            status
        );

        Ok(item.clone())
    }

    /// Mark a room as completed (the user advanced past it)
    pub fn complete_room(
        &self,
        session_id: &str,
        room_id: &str,
    ) -> Result<WalkthroughRoom, SessionError> {
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;

        let room = session
            .rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or_else(|| SessionError::RoomNotFound(room_id.to_string()))?;

        room.completed = true;
        Ok(room.clone())
    }

    /// Append a message to the session transcript (append-only)
    pub fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Result<ChatMessage, SessionError> {
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;

        let message = ChatMessage::new(role, content);
        session.transcript.push(message.clone());
        Ok(message)
    }

    /// Snapshot the transcript of a session
    pub fn transcript(&self, session_id: &str) -> Result<Vec<ChatMessage>, SessionError> {
        let sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions
            .get(session_id)
            .map(|s| s.transcript.clone())
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }

    /// Set the selected agent for a session
    pub fn set_selected_agent(
        &self,
        session_id: &str,
        agent_id: Option<String>,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;
        session.selected_agent = agent_id;
        Ok(())
    }

    /// Get the selected agent for a session
    pub fn selected_agent(&self, session_id: &str) -> Result<Option<String>, SessionError> {
        let sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions
            .get(session_id)
            .map(|s| s.selected_agent.clone())
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostRange;
    use crate::walkthrough::generate_checklist_for_year;

    fn store_with_session() -> (SessionStore, String) {
        let store = SessionStore::new();
        let rooms = generate_checklist_for_year("House", 1985, "Columbus, Ohio", 2026);
        let id = store.create(rooms);
        (store, id)
    }

    #[test]
    fn test_create_and_fetch_rooms() {
        let (store, id) = store_with_session();
        let rooms = store.rooms(&id).unwrap();
        assert!(!rooms.is_empty());
        assert!(rooms.iter().all(|r| !r.completed));
    }

    #[test]
    fn test_unknown_session_errors() {
        let store = SessionStore::new();
        assert!(matches!(
            store.rooms("nope"),
            Err(SessionError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_update_item_status_runs_classifier() {
        let (store, id) = store_with_session();
        let item = store
            .update_item_status(
                &id,
                "exterior",
                "roof-condition",
                ItemStatus::Critical,
                Some("visible sagging".to_string()),
                &CostSchedule::default(),
            )
            .unwrap();

        assert_eq!(item.status, ItemStatus::Critical);
        assert_eq!(item.estimated_repair_cost, Some(CostRange::new(8000, 15000)));
        assert!(item.negotiation_leverage.is_some());
        assert_eq!(item.notes.as_deref(), Some("visible sagging"));
    }

    #[test]
    fn test_status_revert_clears_estimate() {
        let (store, id) = store_with_session();
        let costs = CostSchedule::default();
        store
            .update_item_status(&id, "exterior", "roof-condition", ItemStatus::Critical, None, &costs)
            .unwrap();
        let item = store
            .update_item_status(&id, "exterior", "roof-condition", ItemStatus::Normal, None, &costs)
            .unwrap();
        assert!(item.estimated_repair_cost.is_none());
        assert!(item.negotiation_leverage.is_none());
    }

    #[test]
    fn test_unknown_room_and_item_errors() {
        let (store, id) = store_with_session();
        let costs = CostSchedule::default();
        assert!(matches!(
            store.update_item_status(&id, "garage", "door", ItemStatus::Warning, None, &costs),
            Err(SessionError::RoomNotFound(_))
        ));
        assert!(matches!(
            store.update_item_status(&id, "exterior", "nope", ItemStatus::Warning, None, &costs),
            Err(SessionError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_complete_room() {
        let (store, id) = store_with_session();
        let room = store.complete_room(&id, "kitchen").unwrap();
        assert!(room.completed);
        // Completion persists in the stored session
        let rooms = store.rooms(&id).unwrap();
        let kitchen = rooms.iter().find(|r| r.id == "kitchen").unwrap();
        assert!(kitchen.completed);
    }

    #[test]
    fn test_transcript_is_append_only_in_order() {
        let (store, id) = store_with_session();
        store.append_message(&id, MessageRole::User, "hello").unwrap();
        store
            .append_message(&id, MessageRole::Assistant, "hi there")
            .unwrap();

        let transcript = store.transcript(&id).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, MessageRole::User);
        assert_eq!(transcript[1].content, "hi there");
    }

    #[test]
    fn test_selected_agent_round_trip() {
        let (store, id) = store_with_session();
        assert_eq!(store.selected_agent(&id).unwrap(), None);
        store
            .set_selected_agent(&id, Some("agent-7".to_string()))
            .unwrap();
        assert_eq!(
            store.selected_agent(&id).unwrap(),
            Some("agent-7".to_string())
        );
    }
}
