//! HTTP handlers for all web routes.

pub mod dashboard;
pub mod home;
pub mod not_found;
pub mod paper;
pub mod references;
pub mod search;

use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use researchai_assistant::Conversation;
use researchai_common::{ChatMessage, Effect};

use crate::state::{AppEvent, SharedState};

/// Only the mobile-menu flag; used by pages without other parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub menu: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

/// Transcript as rendered by `chat.html` and returned by the chat APIs.
#[derive(Debug, Serialize)]
pub struct ChatView {
    pub messages: Vec<ChatMessage>,
    pub pending: usize,
    /// Show the typing indicator.
    pub typing: bool,
}

impl ChatView {
    pub async fn of(conversation: &Conversation) -> Self {
        let messages = conversation.messages().await;
        let pending = conversation.pending_replies().await;
        Self { messages, pending, typing: pending > 0 }
    }
}

/// Announce the effect over SSE, then hand it to the browser.
pub fn acknowledge(state: &SharedState, effect: Effect) -> Response {
    state.publish(AppEvent::acknowledge(&effect));
    effect_response(effect)
}

/// Turn a page action's effect into the response the browser acts on.
pub fn effect_response(effect: Effect) -> Response {
    info!(action = %effect.acknowledgment(), "Page action");
    match effect {
        Effect::Download { filename, content_type, body } => (
            [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
            ],
            body,
        )
            .into_response(),
        Effect::Clipboard { text } => {
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
        }
        Effect::OpenExternal { url } => Redirect::to(&url).into_response(),
        share @ Effect::Share { .. } => {
            let acknowledgment = share.acknowledgment();
            Json(json!({ "effect": share, "acknowledgment": acknowledgment })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_download_sets_attachment() {
        let res = effect_response(Effect::download("a_b.txt", "text/plain", "body"));
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"a_b.txt\""
        );
    }

    #[test]
    fn test_open_external_redirects() {
        let res = effect_response(Effect::open_external("https://doi.org/10.1/x"));
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "https://doi.org/10.1/x");
    }

    #[test]
    fn test_clipboard_is_plain_text() {
        let res = effect_response(Effect::clipboard("Smith (2024)."));
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_acknowledge_publishes_notification() {
        use crate::config::Config;
        use crate::state::AppState;
        use std::sync::Arc;
        use tokio_util::sync::CancellationToken;

        let state = Arc::new(AppState::new(Config::default(), CancellationToken::new()).unwrap());
        let mut rx = state.subscribe();
        let res = acknowledge(&state, Effect::download("refs.json", "application/json", "[]"));
        assert_eq!(res.status(), StatusCode::OK);
        match rx.recv().await.unwrap() {
            AppEvent::Notification { message, .. } => assert!(message.contains("refs.json")),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
