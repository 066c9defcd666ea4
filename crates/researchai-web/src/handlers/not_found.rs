//! Fallback for paths outside the route table.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use minijinja::context;

use crate::nav::{NavView, Route};
use crate::state::{AppState, SharedState};

/// Non-canonical spellings of a known route (trailing slash) redirect;
/// everything else gets the 404 page with no nav item highlighted.
pub async fn not_found(State(state): State<SharedState>, uri: Uri) -> Response {
    if let Some(route) = Route::resolve(uri.path()) {
        let canonical = route.path();
        if canonical != uri.path() {
            let target = match uri.query() {
                Some(query) => format!("{}?{}", canonical, query),
                None => canonical,
            };
            return Redirect::permanent(&target).into_response();
        }
    }

    tracing::debug!(path = %uri.path(), "No route");
    not_found_page(&state, uri.path(), false)
}

/// The 404 page, also used by page routes whose record is missing.
pub fn not_found_page(state: &AppState, path: &str, menu_open: bool) -> Response {
    let page = state.views.render("not_found.html", context! {
        title => "Page not found",
        nav => NavView::unmatched(path, menu_open),
        path => path,
    });
    match page {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(err) => err.into_response(),
    }
}
