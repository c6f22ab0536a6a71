// Route-layer tests against the assembled router, without a bound socket.
//
// A state built from the default configuration has no provider credential,
// so the chat and analysis routes must answer 200 with the deterministic
// fallback content rather than an error status.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use propertyscope_lib::chat::{FIRST_TIME_BUYER_TIPS, GENERAL_CAPABILITIES};
use propertyscope_lib::config::AppConfig;
use propertyscope_lib::models::MessageRole;
use propertyscope_lib::server::{build_router, ServerAppState};
use propertyscope_lib::shutdown::ShutdownState;
use tower::ServiceExt;

/// State with no credential configured: every provider call fails locally
fn fallback_state() -> ServerAppState {
    ServerAppState::new(AppConfig::default(), ShutdownState::new())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_chat_without_credential_serves_fallback_as_200_plain_text() {
    let app = build_router(fallback_state(), None);

    let request = post_json(
        "/api/chat",
        r#"{"messages":[{"role":"user","content":"Any advice for first-time buyers?"}]}"#,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(body_string(response).await, FIRST_TIME_BUYER_TIPS);
}

#[tokio::test]
async fn test_chat_with_no_user_turn_serves_generic_fallback() {
    let app = build_router(fallback_state(), None);

    let response = app
        .oneshot(post_json("/api/chat", r#"{"messages":[]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, GENERAL_CAPABILITIES);
}

#[tokio::test]
async fn test_chat_records_user_and_assistant_turns_in_session() {
    let state = fallback_state();
    let session_id = state.sessions.create(Vec::new());
    let app = build_router(state.clone(), None);

    let request = post_json(
        "/api/chat",
        &format!(
            r#"{{"messages":[{{"role":"user","content":"is this overpriced?"}}],"sessionId":"{}"}}"#,
            session_id
        ),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let transcript = state.sessions.transcript(&session_id).unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, MessageRole::User);
    assert_eq!(transcript[0].content, "is this overpriced?");
    assert_eq!(transcript[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn test_chat_without_user_turn_records_no_user_message() {
    let state = fallback_state();
    let session_id = state.sessions.create(Vec::new());
    let app = build_router(state.clone(), None);

    let request = post_json(
        "/api/chat",
        &format!(r#"{{"messages":[],"sessionId":"{}"}}"#, session_id),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Only the assistant's fallback reply lands in the transcript
    let transcript = state.sessions.transcript(&session_id).unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role, MessageRole::Assistant);
    assert_eq!(transcript[0].content, GENERAL_CAPABILITIES);
}

#[tokio::test]
async fn test_analyze_without_credential_synthesizes_locally() {
    let app = build_router(fallback_state(), None);

    let request = post_json(
        "/api/analyze",
        r#"{"propertyType":"Single Family","price":485000,"sqft":1700,"yearBuilt":1985,"daysOnMarket":50,"hoaFee":600}"#,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let analysis = body["analysis"].as_str().unwrap();
    assert!(analysis.contains("$285/sqft"));
    assert!(analysis.contains("days on market"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(fallback_state(), None);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}
