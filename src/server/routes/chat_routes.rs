//! Chat and analysis routes
//!
//! Both routes answer 200 whether the provider responded or the local
//! fallback did; a transport or provider error is logged and absorbed, never
//! surfaced to the caller.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::chat::{
    fallback_response, last_user_message, synthesize_analysis, ChatTurn, ANALYSIS_SYSTEM_PROMPT,
    CHAT_SYSTEM_PROMPT,
};
use crate::models::{MessageRole, PropertyDetails};
use crate::server::state::ServerAppState;

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Channel capacity for relaying deltas into the response body
const BODY_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub property_context: Option<String>,
    /// Optional walkthrough session to record the exchange into
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// POST /api/chat — streamed plain-text chat completion
pub async fn chat_handler(
    State(state): State<ServerAppState>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let last_message = last_user_message(&req.messages).unwrap_or("").to_string();

    // Record the user's turn before anything can fail; a request with no
    // user turn records nothing, same as an empty assistant reply
    if !last_message.is_empty() {
        if let Some(session_id) = &req.session_id {
            if let Err(e) = state
                .sessions
                .append_message(session_id, MessageRole::User, last_message.clone())
            {
                log::warn!("[chat] Could not record user turn: {}", e);
            }
        }
    }

    let system = build_chat_system_prompt(req.property_context.as_deref());

    match state.provider.stream_chat(&req.messages, &system).await {
        Ok(deltas) => {
            log::debug!("[chat] Relaying provider stream");
            streamed_response(state, req.session_id, deltas)
        }
        Err(e) => {
            log::warn!("[chat] Provider unavailable ({}); serving fallback", e);
            let text = fallback_response(&last_message);
            record_assistant_turn(&state, req.session_id.as_deref(), text);
            plain_text(text.to_string())
        }
    }
}

/// POST /api/analyze — property analysis, synthesized locally on any failure
pub async fn analyze_handler(
    State(state): State<ServerAppState>,
    Json(property): Json<PropertyDetails>,
) -> Json<AnalyzeResponse> {
    let turns = [ChatTurn::user(property_summary(&property))];

    let analysis = match state.provider.complete(&turns, ANALYSIS_SYSTEM_PROMPT).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("[analyze] Provider unavailable ({}); synthesizing locally", e);
            synthesize_analysis(&property)
        }
    };

    Json(AnalyzeResponse { analysis })
}

/// Wrap the delta channel into a chunked plain-text body, accumulating the
/// full reply so it can be appended to the session transcript on completion.
fn streamed_response(
    state: ServerAppState,
    session_id: Option<String>,
    mut deltas: mpsc::Receiver<String>,
) -> Response {
    let (body_tx, body_rx) = mpsc::channel::<String>(BODY_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut full_reply = String::new();
        while let Some(delta) = deltas.recv().await {
            full_reply.push_str(&delta);
            if body_tx.send(delta).await.is_err() {
                // Client disconnected; stop relaying but still record
                break;
            }
        }
        record_assistant_turn(&state, session_id.as_deref(), &full_reply);
    });

    let stream =
        ReceiverStream::new(body_rx).map(|chunk| Ok::<_, Infallible>(Bytes::from(chunk)));

    (
        [(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)],
        Body::from_stream(stream),
    )
        .into_response()
}

fn plain_text(text: String) -> Response {
    ([(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], text).into_response()
}

fn record_assistant_turn(state: &ServerAppState, session_id: Option<&str>, content: &str) {
    let Some(session_id) = session_id else {
        return;
    };
    if content.is_empty() {
        return;
    }
    if let Err(e) = state
        .sessions
        .append_message(session_id, MessageRole::Assistant, content)
    {
        log::warn!("[chat] Could not record assistant turn: {}", e);
    }
}

fn build_chat_system_prompt(property_context: Option<&str>) -> String {
    match property_context {
        Some(context) if !context.trim().is_empty() => format!(
            "{}\n\nThe buyer is currently looking at this property:\n{}",
            CHAT_SYSTEM_PROMPT, context
        ),
        _ => CHAT_SYSTEM_PROMPT.to_string(),
    }
}

/// Render the property record as prompt text for the provider
fn property_summary(property: &PropertyDetails) -> String {
    let mut summary = format!(
        "Analyze this listing for a prospective buyer:\n\
         Type: {}\nPrice: ${}\nSquare feet: {}\nYear built: {}\nDays on market: {}",
        property.property_type,
        property.price,
        property.sqft,
        property.year_built,
        property.days_on_market,
    );

    if let Some(address) = &property.address {
        summary.push_str(&format!("\nAddress: {}", address));
    }
    if let Some(hoa) = property.hoa_fee {
        summary.push_str(&format!("\nHOA fee: ${}/month", hoa));
    }
    if !property.features.is_empty() {
        summary.push_str(&format!("\nFeatures: {}", property.features.join(", ")));
    }

    summary
}
