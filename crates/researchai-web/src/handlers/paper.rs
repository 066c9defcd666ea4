//! Paper viewer: tabs, bookmark, "chat with PDF" and the file/link actions.
//! Every handler takes the route id but shows the featured paper.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect, Response};
use axum::{Form, Json};
use minijinja::context;
use serde::Deserialize;

use researchai_assistant::ConversationError;

use crate::error::ApiError;
use crate::handlers::{acknowledge, ChatForm, ChatView};
use crate::nav::{menu_flag, NavView, Route};
use crate::pages::paper::PaperTab;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct PaperQuery {
    pub tab: Option<String>,
    pub menu: Option<String>,
    /// `open` shows the chat modal on arrival (dashboard quick action).
    pub chat: Option<String>,
}

fn paper_path(id: &str) -> String {
    Route::PaperViewer { id: id.to_string() }.path()
}

pub async fn paper_page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(q): Query<PaperQuery>,
) -> Result<Html<String>, ApiError> {
    let route = Route::PaperViewer { id: id.clone() };
    let path = route.path();
    let tab = PaperTab::from_query(q.tab.as_deref());
    let chat = ChatView::of(&state.paper_chat).await;

    let mut page = state.paper.lock().await;
    let chat_open = page.is_chat_open() || q.chat.as_deref() == Some("open");
    let paper = page.paper().clone();

    state.views.render("paper.html", context! {
        title => paper.title.clone(),
        nav => NavView::for_route(&route, menu_flag(q.menu.as_deref())),
        paper_id => id,
        paper_path => path.clone(),
        tab => tab.as_str(),
        tabs => PaperTab::strip(tab, &path),
        citation => paper.citation(),
        doi_url => paper.doi_url(),
        paper => paper,
        bookmarked => page.is_bookmarked(),
        findings => page.findings(),
        metrics => page.metrics(),
        chat_open => chat_open,
        chat => chat,
        chat_action => format!("{}/chat", path),
        notices => page.notices.drain(),
    })
}

pub async fn toggle_bookmark(State(state): State<SharedState>, Path(id): Path<String>) -> Redirect {
    state.paper.lock().await.toggle_bookmark();
    Redirect::to(&paper_path(&id))
}

pub async fn open_chat(State(state): State<SharedState>, Path(id): Path<String>) -> Redirect {
    state.paper.lock().await.open_chat();
    Redirect::to(&paper_path(&id))
}

/// Closing the modal drops replies still in flight.
pub async fn close_chat(State(state): State<SharedState>, Path(id): Path<String>) -> Redirect {
    state.paper.lock().await.close_chat();
    let cancelled = state.paper_chat.cancel_pending().await;
    if cancelled > 0 {
        tracing::debug!(cancelled, "Paper chat closed with pending replies");
    }
    Redirect::to(&paper_path(&id))
}

pub async fn chat_submit(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<ChatForm>,
) -> Result<Redirect, ApiError> {
    state.paper.lock().await.open_chat();
    match state.paper_chat.submit(&form.message).await {
        Ok(_) | Err(ConversationError::EmptyMessage) => Ok(Redirect::to(&paper_path(&id))),
        Err(e) => Err(e.into()),
    }
}

pub async fn api_chat(State(state): State<SharedState>, Path(_id): Path<String>) -> Json<ChatView> {
    Json(ChatView::of(&state.paper_chat).await)
}

pub async fn download(State(state): State<SharedState>, Path(_id): Path<String>) -> Response {
    let effect = state.paper.lock().await.download();
    acknowledge(&state, effect)
}

pub async fn share(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let url = format!("{}{}", state.config.server.base_url(), paper_path(&id));
    let effect = state.paper.lock().await.share(&url);
    acknowledge(&state, effect)
}

pub async fn citation(State(state): State<SharedState>, Path(_id): Path<String>) -> Response {
    let effect = state.paper.lock().await.copy_citation();
    acknowledge(&state, effect)
}

pub async fn doi(State(state): State<SharedState>, Path(_id): Path<String>) -> Response {
    let effect = state.paper.lock().await.open_doi();
    acknowledge(&state, effect)
}
