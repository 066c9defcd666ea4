//! Route table and the navigation bar shared by every page.
//!
//! The mobile menu flag travels in the URL (`?menu=open`); every nav link
//! points at a bare path, so following one always closes the menu.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    Search,
    /// The id is accepted but the viewer always shows the featured paper.
    PaperViewer { id: String },
    References,
}

impl Route {
    /// Map a request path to a route. Query string, fragment and a trailing
    /// slash are ignored. Unknown paths resolve to `None`. The paper id is
    /// stored decoded and re-encoded by `path`.
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        if !path.starts_with('/') {
            return None;
        }
        let mut segments = path.trim_end_matches('/').split('/').skip(1);
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Some(Self::Home),
            (Some("dashboard"), None, _) => Some(Self::Dashboard),
            (Some("search"), None, _) => Some(Self::Search),
            (Some("paper"), Some(id), None) if !id.is_empty() => {
                let id = urlencoding::decode(id).map(|id| id.into_owned()).unwrap_or_else(|_| id.to_string());
                Some(Self::PaperViewer { id })
            }
            (Some("references"), None, _) => Some(Self::References),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Search => "/search".to_string(),
            Self::PaperViewer { id } => format!("/paper/{}", urlencoding::encode(id)),
            Self::References => "/references".to_string(),
        }
    }

    /// The nav entry highlighted while this route is shown.
    pub fn nav_item(&self) -> NavItem {
        match self {
            Self::Home => NavItem::Home,
            Self::Dashboard => NavItem::Dashboard,
            Self::Search | Self::PaperViewer { .. } => NavItem::Search,
            Self::References => NavItem::References,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Research AI",
            Self::Dashboard => "Dashboard",
            Self::Search => "Search",
            Self::PaperViewer { .. } => "Paper",
            Self::References => "References",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Dashboard,
    Search,
    References,
}

impl NavItem {
    pub const ALL: [NavItem; 4] = [Self::Home, Self::Dashboard, Self::Search, Self::References];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Dashboard => "Dashboard",
            Self::Search => "Search",
            Self::References => "References",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Dashboard => "/dashboard",
            Self::Search => "/search",
            Self::References => "/references",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Dashboard => "grid",
            Self::Search => "search",
            Self::References => "book-open",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavView {
    pub links: Vec<NavLink>,
    pub menu_open: bool,
    /// Where the hamburger button leads: the same page with the flag flipped.
    pub menu_href: String,
}

impl NavView {
    pub fn new(active: Option<NavItem>, current_path: &str, menu_open: bool) -> Self {
        let links = NavItem::ALL
            .iter()
            .map(|item| NavLink {
                label: item.label(),
                href: item.href(),
                icon: item.icon(),
                active: Some(*item) == active,
            })
            .collect();
        let menu_href = if menu_open {
            current_path.to_string()
        } else {
            format!("{}?menu=open", current_path)
        };
        Self { links, menu_open, menu_href }
    }

    pub fn for_route(route: &Route, menu_open: bool) -> Self {
        Self::new(Some(route.nav_item()), &route.path(), menu_open)
    }

    /// Unknown paths: nothing highlighted.
    pub fn unmatched(current_path: &str, menu_open: bool) -> Self {
        Self::new(None, current_path, menu_open)
    }

    pub fn active_count(&self) -> usize {
        self.links.iter().filter(|l| l.active).count()
    }
}

pub fn menu_flag(value: Option<&str>) -> bool {
    value == Some("open")
}
