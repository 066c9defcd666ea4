//! Reference manager: list/filter, add, delete with confirmation, export,
//! and the "coming soon" import/share actions.

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use minijinja::context;
use serde::{Deserialize, Serialize};

use researchai_common::{Reference, ReferenceKind};
use researchai_library::{current_year, Confirmation, NewReference, ReferenceTab};

use crate::error::ApiError;
use crate::handlers::not_found::not_found_page;
use crate::handlers::{acknowledge, MenuQuery};
use crate::nav::{menu_flag, NavView, Route};
use crate::pages::references::{add_form_href, list_href, ImportSource};
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct ReferencesQuery {
    #[serde(default)]
    pub q: String,
    pub tab: Option<String>,
    pub modal: Option<String>,
    pub menu: Option<String>,
}

impl ReferencesQuery {
    fn tab(&self) -> ReferenceTab {
        self.tab.as_deref().and_then(|t| t.parse().ok()).unwrap_or_default()
    }
}

pub async fn references_page(
    State(state): State<SharedState>,
    Query(q): Query<ReferencesQuery>,
) -> Result<Html<String>, ApiError> {
    let route = Route::References;
    let tab = q.tab();
    let modal_open = q.modal.as_deref() == Some("add");
    let mut page = state.references.lock().await;
    if !modal_open {
        page.discard_draft();
    }
    let kinds: Vec<&str> = ReferenceKind::ALL.iter().map(|k| k.as_str()).collect();

    state.views.render("references.html", context! {
        title => route.title(),
        nav => NavView::for_route(&route, menu_flag(q.menu.as_deref())),
        query => q.q.clone(),
        tab => tab.as_str(),
        tabs => page.tab_strip(&q.q, tab),
        references => page.visible(&q.q, tab),
        total => page.library().len(),
        folders => page.library().folders(),
        modal_open => modal_open,
        draft => page.draft().cloned().unwrap_or_default(),
        kinds => kinds,
        list_href => list_href(&q.q, tab),
        add_href => add_form_href(&q.q, tab),
        current_year => current_year(),
        notices => page.notices.drain(),
    })
}

#[derive(Debug, Deserialize)]
pub struct AddReferenceForm {
    #[serde(flatten)]
    pub reference: NewReference,
    /// Filter of the list the form was opened from.
    #[serde(default)]
    pub return_q: String,
    #[serde(default)]
    pub return_tab: String,
}

/// Success returns to the list; a rejected form reopens the modal with the
/// entered values and a warning.
pub async fn add_reference(
    State(state): State<SharedState>,
    Form(form): Form<AddReferenceForm>,
) -> Redirect {
    let tab = form.return_tab.parse().unwrap_or_default();
    let mut page = state.references.lock().await;
    match page.add(form.reference, current_year()) {
        Ok(_) => Redirect::to(&list_href(&form.return_q, tab)),
        Err(_) => Redirect::to(&add_form_href(&form.return_q, tab)),
    }
}

/// Unknown ids get the HTML 404 page, not a JSON error.
pub async fn confirm_delete_page(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Query(q): Query<MenuQuery>,
    uri: Uri,
) -> Response {
    let route = Route::References;
    let menu_open = menu_flag(q.menu.as_deref());
    let page = state.references.lock().await;
    let Ok(reference) = page.get(id) else {
        return not_found_page(&state, uri.path(), menu_open);
    };
    state
        .views
        .render("reference_delete.html", context! {
            title => "Delete reference",
            nav => NavView::for_route(&route, menu_open),
            reference => reference,
        })
        .into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

/// Removes the reference only on `confirm=yes`; anything else keeps it.
pub async fn delete_reference(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, ApiError> {
    let confirmation = Confirmation::from_answer(form.confirm.as_deref());
    state.references.lock().await.delete(id, confirmation)?;
    Ok(Redirect::to("/references"))
}

pub async fn export_references(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let effect = state.references.lock().await.export(Utc::now())?;
    Ok(acknowledge(&state, effect))
}

pub async fn import_references(
    State(state): State<SharedState>,
    Path(source): Path<String>,
) -> Result<Redirect, ApiError> {
    let source: ImportSource = source.parse().map_err(ApiError::NotFound)?;
    state.references.lock().await.import(source);
    Ok(Redirect::to("/references"))
}

pub async fn share_library(State(state): State<SharedState>) -> Redirect {
    state.references.lock().await.share();
    Redirect::to("/references")
}

// ── JSON API ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ReferenceList {
    pub references: Vec<Reference>,
    pub total: usize,
}

pub async fn api_list(
    State(state): State<SharedState>,
    Query(q): Query<ReferencesQuery>,
) -> Json<ReferenceList> {
    let page = state.references.lock().await;
    Json(ReferenceList {
        references: page.visible(&q.q, q.tab()),
        total: page.library().len(),
    })
}

pub async fn api_add(
    State(state): State<SharedState>,
    Json(form): Json<NewReference>,
) -> Result<(StatusCode, Json<Reference>), ApiError> {
    let added = state.references.lock().await.insert(form, current_year())?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// `DELETE /api/references/{id}?confirm=yes`. Without the confirmation the
/// reference stays and the request is answered with 409.
pub async fn api_delete(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Query(q): Query<DeleteForm>,
) -> Result<StatusCode, ApiError> {
    let confirmation = Confirmation::from_answer(q.confirm.as_deref());
    match state.references.lock().await.remove(id, confirmation)? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::Conflict(format!(
            "deleting reference {} requires confirm=yes",
            id
        ))),
    }
}
