//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{dashboard, home, not_found::not_found, paper, references, search};
use crate::sse::sse_handler;

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);
    let static_dir = shared.config.server.static_dir.clone();

    Router::new()
        // Landing
        .route("/",            get(home::home_page))
        .route("/hero/search", post(home::hero_search))

        // Dashboard
        .route("/dashboard",            get(dashboard::dashboard_page))
        .route("/dashboard/chat",       post(dashboard::chat_submit))
        .route("/dashboard/chat/reset", post(dashboard::chat_reset))

        // Search
        .route("/search",                get(search::search_page).post(search::search_submit))
        .route("/search/bookmarks/{id}", post(search::toggle_bookmark))
        .route("/search/filters/clear",  post(search::clear_filters))
        .route("/search/more",           post(search::load_more))

        // Paper viewer
        .route("/paper/{id}",            get(paper::paper_page))
        .route("/paper/{id}/bookmark",   post(paper::toggle_bookmark))
        .route("/paper/{id}/chat",       post(paper::chat_submit))
        .route("/paper/{id}/chat/open",  post(paper::open_chat))
        .route("/paper/{id}/chat/close", post(paper::close_chat))
        .route("/paper/{id}/download",   get(paper::download))
        .route("/paper/{id}/share",      post(paper::share))
        .route("/paper/{id}/citation",   get(paper::citation))
        .route("/paper/{id}/doi",        get(paper::doi))

        // References
        .route("/references",                  get(references::references_page).post(references::add_reference))
        .route("/references/{id}/delete",      get(references::confirm_delete_page).post(references::delete_reference))
        .route("/references/export",           get(references::export_references))
        .route("/references/import/{source}",  post(references::import_references))
        .route("/references/share",            post(references::share_library))

        // SSE streaming
        .route("/api/events", get(sse_handler))

        // API endpoints
        .route("/api/dashboard/chat",  get(dashboard::api_chat).post(dashboard::api_chat_submit))
        .route("/api/paper/{id}/chat", get(paper::api_chat))
        .route("/api/search",          get(search::api_search))
        .route("/api/references",      get(references::api_list).post(references::api_add))
        .route("/api/references/{id}", axum::routing::delete(references::api_delete))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        .fallback(not_found)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
