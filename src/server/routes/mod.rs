//! HTTP route handlers
//!
//! Handlers return `Result<_, (StatusCode, String)>`; domain errors from the
//! session store map onto 404, everything else onto 500. The chat and
//! analysis routes never return an error status for provider failures —
//! those are disguised as fallback content by design.

mod chat_routes;
mod walkthrough_routes;

pub use chat_routes::{analyze_handler, chat_handler};
pub use walkthrough_routes::{
    complete_room_handler, create_walkthrough_handler, get_selected_agent_handler,
    report_handler, set_selected_agent_handler, update_item_status_handler,
};

use axum::http::StatusCode;

use crate::session::SessionError;

/// Map a session error onto an HTTP status + message
pub(crate) fn session_error_response(err: SessionError) -> (StatusCode, String) {
    match err {
        SessionError::SessionNotFound(_)
        | SessionError::RoomNotFound(_)
        | SessionError::ItemNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
    }
}
