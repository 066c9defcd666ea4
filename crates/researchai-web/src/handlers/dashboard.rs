//! Dashboard handler: stats, recent papers and the research assistant chat.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use minijinja::context;
use serde::Deserialize;

use researchai_assistant::ConversationError;
use researchai_common::{fixtures, ChatMessage};

use crate::error::ApiError;
use crate::handlers::{ChatForm, ChatView};
use crate::nav::{menu_flag, NavView, Route};
use crate::pages::dashboard::{quick_actions, DashboardTab};
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub menu: Option<String>,
}

pub async fn dashboard_page(
    State(state): State<SharedState>,
    Query(q): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let route = Route::Dashboard;
    let tab = DashboardTab::from_query(q.tab.as_deref());
    let chat = ChatView::of(&state.dashboard_chat).await;

    state.views.render("dashboard.html", context! {
        title => route.title(),
        nav => NavView::for_route(&route, menu_flag(q.menu.as_deref())),
        tab => tab.as_str(),
        tabs => DashboardTab::strip(tab),
        stats => fixtures::dashboard_stats(),
        recent_papers => fixtures::recent_papers(),
        quick_actions => quick_actions(),
        chat => chat,
        chat_action => "/dashboard/chat",
    })
}

/// Form post from the chat panel. Blank messages are ignored.
pub async fn chat_submit(
    State(state): State<SharedState>,
    Form(form): Form<ChatForm>,
) -> Result<Redirect, ApiError> {
    match state.dashboard_chat.submit(&form.message).await {
        Ok(_) | Err(ConversationError::EmptyMessage) => Ok(Redirect::to("/dashboard#chat")),
        Err(e) => Err(e.into()),
    }
}

pub async fn chat_reset(State(state): State<SharedState>) -> Redirect {
    state.dashboard_chat.reset().await;
    Redirect::to("/dashboard#chat")
}

pub async fn api_chat(State(state): State<SharedState>) -> Json<ChatView> {
    Json(ChatView::of(&state.dashboard_chat).await)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// JSON variant: returns the user's message; the reply arrives over SSE.
pub async fn api_chat_submit(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let message = state.dashboard_chat.submit(&payload.message).await?;
    Ok((StatusCode::ACCEPTED, Json(message)))
}
