//! Per-page view state. Handlers lock one of these, apply an action, and
//! render; nothing here touches HTTP.

pub mod dashboard;
pub mod hero;
pub mod paper;
pub mod references;
pub mod search;

use serde::Serialize;

/// One entry of a tab strip as the templates see it.
#[derive(Debug, Clone, Serialize)]
pub struct TabView {
    pub id: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
    pub count: Option<usize>,
}
