//! Dashboard tabs and quick actions.

use serde::Serialize;

use super::TabView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Overview,
    Papers,
    Writing,
    Collaboration,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [Self::Overview, Self::Papers, Self::Writing, Self::Collaboration];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Papers => "papers",
            Self::Writing => "writing",
            Self::Collaboration => "collaboration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Papers => "My Papers",
            Self::Writing => "Writing",
            Self::Collaboration => "Collaboration",
        }
    }

    /// Unknown or missing values show the overview.
    pub fn from_query(value: Option<&str>) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| Some(t.as_str()) == value)
            .unwrap_or_default()
    }

    pub fn strip(active: Self) -> Vec<TabView> {
        Self::ALL
            .iter()
            .map(|t| TabView {
                id: t.as_str(),
                label: t.label(),
                href: format!("/dashboard?tab={}", t.as_str()),
                active: *t == active,
                count: None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub description: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub fn quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction {
            label: "Search Papers",
            description: "Find research across 220M+ papers",
            href: "/search",
            icon: "search",
        },
        QuickAction {
            label: "Manage References",
            description: "Organize your citations",
            href: "/references",
            icon: "folder",
        },
        QuickAction {
            label: "Chat with PDF",
            description: "Ask questions about a paper",
            href: "/paper/1?chat=open",
            icon: "message-circle",
        },
    ]
}
