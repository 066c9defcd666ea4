//! Landing page and the hero search form.

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use minijinja::context;
use serde::Deserialize;

use researchai_common::fixtures;

use crate::error::ApiError;
use crate::handlers::MenuQuery;
use crate::nav::{menu_flag, NavView, Route};
use crate::pages::hero;
use crate::state::SharedState;

pub async fn home_page(
    State(state): State<SharedState>,
    Query(q): Query<MenuQuery>,
) -> Result<Html<String>, ApiError> {
    let route = Route::Home;
    state.views.render("home.html", context! {
        title => route.title(),
        nav => NavView::for_route(&route, menu_flag(q.menu.as_deref())),
        stats => fixtures::landing_stats(),
        features => fixtures::features(),
    })
}

#[derive(Debug, Deserialize)]
pub struct HeroForm {
    #[serde(default)]
    pub q: String,
}

/// Blank input stays on the landing page.
pub async fn hero_search(Form(form): Form<HeroForm>) -> Redirect {
    match hero::search_target(&form.q) {
        Some(target) => Redirect::to(&target),
        None => Redirect::to("/"),
    }
}
