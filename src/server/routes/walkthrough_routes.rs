//! Walkthrough session routes
//!
//! create_walkthrough, update_item_status, complete_room, report, and the
//! selected-agent getters/setters that replace the original's browser-local
//! storage keys.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::session_error_response;
use crate::models::{ItemStatus, WalkthroughItem, WalkthroughReport, WalkthroughRoom};
use crate::server::state::ServerAppState;
use crate::walkthrough::{build_report, generate_checklist};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalkthroughRequest {
    pub property_type: String,
    pub year_built: i32,
    pub location: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalkthroughResponse {
    pub session_id: String,
    pub rooms: Vec<WalkthroughRoom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: ItemStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAgentBody {
    pub agent_id: Option<String>,
}

/// POST /api/walkthrough — generate a checklist and open a session
pub async fn create_walkthrough_handler(
    State(state): State<ServerAppState>,
    Json(req): Json<CreateWalkthroughRequest>,
) -> Json<CreateWalkthroughResponse> {
    let rooms = generate_checklist(&req.property_type, req.year_built, &req.location);
    let session_id = state.sessions.create(rooms.clone());

    log::info!(
        "[walkthrough] New session {} ({} rooms) for '{}' in '{}'",
        session_id,
        rooms.len(),
        req.property_type,
        req.location
    );

    Json(CreateWalkthroughResponse { session_id, rooms })
}

/// PUT /api/walkthrough/:session/rooms/:room/items/:item/status
pub async fn update_item_status_handler(
    State(state): State<ServerAppState>,
    Path((session_id, room_id, item_id)): Path<(String, String, String)>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<WalkthroughItem>, (StatusCode, String)> {
    let item = state
        .sessions
        .update_item_status(
            &session_id,
            &room_id,
            &item_id,
            req.status,
            req.notes,
            &state.config.costs,
        )
        .map_err(session_error_response)?;

    Ok(Json(item))
}

/// POST /api/walkthrough/:session/rooms/:room/complete
pub async fn complete_room_handler(
    State(state): State<ServerAppState>,
    Path((session_id, room_id)): Path<(String, String)>,
) -> Result<Json<WalkthroughRoom>, (StatusCode, String)> {
    let room = state
        .sessions
        .complete_room(&session_id, &room_id)
        .map_err(session_error_response)?;

    Ok(Json(room))
}

/// GET /api/walkthrough/:session/report — derived, never stored
pub async fn report_handler(
    State(state): State<ServerAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<WalkthroughReport>, (StatusCode, String)> {
    let rooms = state
        .sessions
        .rooms(&session_id)
        .map_err(session_error_response)?;

    Ok(Json(build_report(&rooms, &state.config.risk)))
}

/// PUT /api/walkthrough/:session/agent
pub async fn set_selected_agent_handler(
    State(state): State<ServerAppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SelectedAgentBody>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .sessions
        .set_selected_agent(&session_id, body.agent_id)
        .map_err(session_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/walkthrough/:session/agent
pub async fn get_selected_agent_handler(
    State(state): State<ServerAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SelectedAgentBody>, (StatusCode, String)> {
    let agent_id = state
        .sessions
        .selected_agent(&session_id)
        .map_err(session_error_response)?;
    Ok(Json(SelectedAgentBody { agent_id }))
}
