//! Search results: submit, inert filters, bookmarks.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use researchai_common::SearchFilters;

use crate::error::ApiError;
use crate::nav::{menu_flag, NavView, Route};
use crate::pages::hero;
use crate::pages::search::ResultCard;
use crate::state::{AppEvent, SharedState};

const YEAR_OPTIONS: &[&str] = &["2024", "2023", "2022", "2021", "2020"];
const CITATION_OPTIONS: &[&str] = &["100+", "50+", "10+"];

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub menu: Option<String>,
}

pub async fn search_page(
    State(state): State<SharedState>,
    Query(q): Query<SearchQuery>,
) -> Result<Html<String>, ApiError> {
    let route = Route::Search;
    let (query, filters, cards, saved, searching, notices) = {
        let mut page = state.search.lock().await;
        page.seed_query(q.q.as_deref());
        (
            page.query().to_string(),
            page.filters().clone(),
            page.cards(),
            page.bookmarks().len(),
            page.is_searching(),
            page.notices.drain(),
        )
    };

    state.views.render("search.html", context! {
        title => route.title(),
        nav => NavView::for_route(&route, menu_flag(q.menu.as_deref())),
        query => query,
        filters => filters,
        results => cards,
        saved_count => saved,
        searching => searching,
        notices => notices,
        year_options => YEAR_OPTIONS,
        citation_options => CITATION_OPTIONS,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub citations: String,
}

/// Start a search and flip the indicator back off after the simulated delay.
/// A blank query only stores the filters.
pub async fn search_submit(
    State(state): State<SharedState>,
    Form(form): Form<SearchForm>,
) -> Redirect {
    let filters = SearchFilters {
        year: form.year,
        journal: form.journal,
        author: form.author,
        citations: form.citations,
    };
    let timer = state.shutdown.child_token();
    let generation = state.search.lock().await.begin(&form.q, filters, timer.clone());

    match (generation, hero::search_target(&form.q)) {
        (Some(generation), Some(target)) => {
            spawn_search_timer(state, generation, timer, form.q);
            Redirect::to(&target)
        }
        _ => Redirect::to("/search"),
    }
}

fn spawn_search_timer(state: SharedState, generation: u64, timer: CancellationToken, query: String) {
    let delay = state.config.search.delay();
    tokio::spawn(async move {
        tokio::select! {
            _ = timer.cancelled() => {
                debug!(generation, "Search superseded");
            }
            _ = tokio::time::sleep(delay) => {
                if state.search.lock().await.finish(generation) {
                    state.publish(AppEvent::SearchFinished { query });
                }
            }
        }
    });
}

pub async fn toggle_bookmark(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Redirect, ApiError> {
    let saved = state.search.lock().await.toggle_bookmark(id)?;
    debug!(id, saved, "Bookmark toggled");
    Ok(Redirect::to("/search"))
}

pub async fn clear_filters(State(state): State<SharedState>) -> Redirect {
    state.search.lock().await.clear_filters();
    Redirect::to("/search")
}

pub async fn load_more(State(state): State<SharedState>) -> Redirect {
    state.search.lock().await.load_more();
    Redirect::to("/search")
}

#[derive(Debug, Serialize)]
pub struct SearchSnapshot {
    pub query: String,
    pub filters: SearchFilters,
    pub searching: bool,
    pub bookmarks: Vec<u32>,
    pub results: Vec<ResultCard>,
}

/// JSON view of the search page. Queued notices stay for the HTML page.
pub async fn api_search(
    State(state): State<SharedState>,
    Query(q): Query<SearchQuery>,
) -> Json<SearchSnapshot> {
    let mut page = state.search.lock().await;
    page.seed_query(q.q.as_deref());
    Json(SearchSnapshot {
        query: page.query().to_string(),
        filters: page.filters().clone(),
        searching: page.is_searching(),
        bookmarks: page.bookmarks().iter().collect(),
        results: page.cards(),
    })
}
