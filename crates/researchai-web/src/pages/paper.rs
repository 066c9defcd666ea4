//! Paper viewer state: bookmark flag, chat modal and the side-effect actions.
//! The route id is accepted but ignored; the viewer always shows the
//! featured paper.

use serde::Serialize;

use researchai_common::{fixtures, Effect, Notices, Paper};

use super::TabView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaperTab {
    #[default]
    Overview,
    Content,
    Citations,
    Metrics,
}

impl PaperTab {
    pub const ALL: [PaperTab; 4] = [Self::Overview, Self::Content, Self::Citations, Self::Metrics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Content => "content",
            Self::Citations => "citations",
            Self::Metrics => "metrics",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Content => "Full Text",
            Self::Citations => "Citations",
            Self::Metrics => "Metrics",
        }
    }

    pub fn from_query(value: Option<&str>) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| Some(t.as_str()) == value)
            .unwrap_or_default()
    }

    pub fn strip(active: Self, paper_path: &str) -> Vec<TabView> {
        Self::ALL
            .iter()
            .map(|t| TabView {
                id: t.as_str(),
                label: t.label(),
                href: format!("{}?tab={}", paper_path, t.as_str()),
                active: *t == active,
                count: None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

pub struct PaperPage {
    paper: Paper,
    bookmarked: bool,
    chat_open: bool,
    pub notices: Notices,
}

impl Default for PaperPage {
    fn default() -> Self {
        Self::new(fixtures::featured_paper())
    }
}

impl PaperPage {
    pub fn new(paper: Paper) -> Self {
        Self { paper, bookmarked: false, chat_open: false, notices: Notices::default() }
    }

    pub fn paper(&self) -> &Paper {
        &self.paper
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn toggle_bookmark(&mut self) -> bool {
        self.bookmarked = !self.bookmarked;
        if self.bookmarked {
            self.notices.success("Paper bookmarked");
        } else {
            self.notices.info("Bookmark removed");
        }
        self.bookmarked
    }

    pub fn open_chat(&mut self) {
        self.chat_open = true;
    }

    /// Hide the modal. The caller cancels replies still in flight.
    pub fn close_chat(&mut self) {
        self.chat_open = false;
    }

    pub fn download(&self) -> Effect {
        Effect::download(
            self.paper.download_filename(),
            "text/plain; charset=utf-8",
            self.paper.to_plain_text(),
        )
    }

    pub fn share(&self, page_url: &str) -> Effect {
        Effect::Share {
            title: self.paper.title.clone(),
            text: format!("{} ({})", self.paper.title, self.paper.journal),
            url: page_url.to_string(),
        }
    }

    pub fn copy_citation(&self) -> Effect {
        Effect::clipboard(self.paper.citation())
    }

    pub fn open_doi(&self) -> Effect {
        Effect::open_external(self.paper.doi_url())
    }

    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric { label: "Total Citations", value: self.paper.citations.to_string() },
            Metric { label: "Published", value: self.paper.year.to_string() },
            Metric { label: "Authors", value: self.paper.authors.len().to_string() },
            Metric { label: "Sections", value: self.paper.sections.len().to_string() },
        ]
    }

    pub fn findings(&self) -> Vec<&'static str> {
        fixtures::featured_findings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_toggles_with_notice() {
        let mut page = PaperPage::default();
        assert!(page.toggle_bookmark());
        assert!(!page.toggle_bookmark());
        let notices = page.notices.drain();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, "Paper bookmarked");
    }

    #[test]
    fn test_chat_modal_flag() {
        let mut page = PaperPage::default();
        page.open_chat();
        assert!(page.is_chat_open());
        page.close_chat();
        assert!(!page.is_chat_open());
    }

    #[test]
    fn test_effects_carry_paper_data() {
        let page = PaperPage::default();
        match page.download() {
            Effect::Download { filename, body, .. } => {
                assert_eq!(filename, "10.1038_s41591-024-01234-5.txt");
                assert!(body.contains(&page.paper().title));
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert_eq!(page.copy_citation(), Effect::clipboard(page.paper().citation()));
        assert_eq!(page.open_doi(), Effect::open_external("https://doi.org/10.1038/s41591-024-01234-5"));
        match page.share("http://localhost:3001/paper/1") {
            Effect::Share { url, .. } => assert_eq!(url, "http://localhost:3001/paper/1"),
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_tab_strip() {
        let strip = PaperTab::strip(PaperTab::Metrics, "/paper/3");
        assert_eq!(strip.iter().filter(|t| t.active).count(), 1);
        assert_eq!(strip[3].href, "/paper/3?tab=metrics");
        assert_eq!(PaperTab::from_query(Some("citations")), PaperTab::Citations);
    }

    #[test]
    fn test_metrics_use_citation_count() {
        let page = PaperPage::default();
        assert_eq!(page.metrics()[0].value, page.paper().citations.to_string());
        assert_eq!(page.metrics()[2].value, page.paper().authors.len().to_string());
    }
}
