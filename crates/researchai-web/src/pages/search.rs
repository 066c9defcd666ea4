//! Search results page state.
//!
//! Results are the fixed sample set; filters are collected and echoed back
//! but never narrow the list. A submit flips `searching` on for a short,
//! simulated delay. A newer submit cancels the older timer, and `finish`
//! ignores any generation that is no longer current.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use researchai_common::error::{ResearchError, Result};
use researchai_common::{fixtures, BookmarkSet, Notices, Paper, SearchFilters};

#[derive(Debug, Clone, Serialize)]
pub struct ResultCard {
    pub paper: Paper,
    pub authors: String,
    pub relevance_percent: u32,
    pub bookmarked: bool,
}

pub struct SearchPage {
    query: String,
    filters: SearchFilters,
    bookmarks: BookmarkSet,
    results: Vec<Paper>,
    searching: bool,
    generation: u64,
    timer: Option<CancellationToken>,
    pub notices: Notices,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPage {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            filters: SearchFilters::default(),
            bookmarks: BookmarkSet::new(),
            results: fixtures::search_results(),
            searching: false,
            generation: 0,
            timer: None,
            notices: Notices::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// The `q` parameter of an incoming page view replaces the query.
    pub fn seed_query(&mut self, q: Option<&str>) {
        if let Some(q) = q {
            self.query = q.to_string();
        }
    }

    /// Start a search. Returns the generation the caller must pass to
    /// `finish` once the delay elapses, or `None` for a blank query.
    /// Filters are kept either way.
    pub fn begin(&mut self, query: &str, filters: SearchFilters, timer: CancellationToken) -> Option<u64> {
        self.filters = filters;
        if query.trim().is_empty() {
            return None;
        }
        if let Some(previous) = self.timer.replace(timer) {
            previous.cancel();
        }
        self.query = query.to_string();
        self.searching = true;
        self.generation += 1;
        Some(self.generation)
    }

    /// Clear the searching flag if `generation` is still the latest search.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.searching {
            return false;
        }
        self.searching = false;
        self.timer = None;
        true
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.notices.info("Filters cleared");
    }

    pub fn toggle_bookmark(&mut self, id: u32) -> Result<bool> {
        if !self.results.iter().any(|p| p.id == id) {
            return Err(ResearchError::NotFound(format!("paper {}", id)));
        }
        let saved = self.bookmarks.toggle(id);
        if saved {
            self.notices.success("Saved to bookmarks");
        } else {
            self.notices.info("Removed from bookmarks");
        }
        Ok(saved)
    }

    /// "Load more" has no further pages to fetch.
    pub fn load_more(&mut self) {
        self.notices.info("No more results for this query yet");
    }

    /// Filters are inert: the list is always the full sample set.
    pub fn results(&self) -> &[Paper] {
        &self.results
    }

    pub fn cards(&self) -> Vec<ResultCard> {
        self.results
            .iter()
            .map(|p| ResultCard {
                authors: p.author_names().join(", "),
                relevance_percent: p.relevance_percent(),
                bookmarked: self.bookmarks.contains(p.id),
                paper: p.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(year: &str) -> SearchFilters {
        SearchFilters { year: year.into(), ..Default::default() }
    }

    #[test]
    fn test_begin_sets_searching() {
        let mut page = SearchPage::new();
        let gen = page.begin("crispr", filters("2024"), CancellationToken::new());
        assert_eq!(gen, Some(1));
        assert!(page.is_searching());
        assert_eq!(page.query(), "crispr");
        assert_eq!(page.filters().year, "2024");
    }

    #[test]
    fn test_blank_query_ignored() {
        let mut page = SearchPage::new();
        assert_eq!(page.begin("  ", SearchFilters::default(), CancellationToken::new()), None);
        assert!(!page.is_searching());
    }

    #[test]
    fn test_blank_query_keeps_filters() {
        let mut page = SearchPage::new();
        assert_eq!(page.begin("", filters("2024"), CancellationToken::new()), None);
        assert_eq!(page.filters().year, "2024");
        assert!(!page.is_searching());
    }

    #[test]
    fn test_newer_search_cancels_older_timer() {
        let mut page = SearchPage::new();
        let first = CancellationToken::new();
        let old = page.begin("a", SearchFilters::default(), first.clone()).unwrap();
        let new = page.begin("b", SearchFilters::default(), CancellationToken::new()).unwrap();
        assert!(first.is_cancelled());

        assert!(!page.finish(old));
        assert!(page.is_searching());
        assert!(page.finish(new));
        assert!(!page.is_searching());
    }

    #[test]
    fn test_filters_do_not_change_results() {
        let mut page = SearchPage::new();
        let before: Vec<u32> = page.results().iter().map(|p| p.id).collect();
        page.begin("x", filters("2020"), CancellationToken::new());
        let after: Vec<u32> = page.results().iter().map(|p| p.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_bookmark_toggle() {
        let mut page = SearchPage::new();
        assert!(page.toggle_bookmark(2).unwrap());
        assert!(page.cards().iter().find(|c| c.paper.id == 2).unwrap().bookmarked);
        assert!(!page.toggle_bookmark(2).unwrap());
        assert!(page.bookmarks().is_empty());
        assert!(page.toggle_bookmark(99).is_err());
        assert_eq!(page.notices.len(), 2);
    }

    #[test]
    fn test_clear_filters_and_load_more() {
        let mut page = SearchPage::new();
        page.begin("x", filters("2021"), CancellationToken::new());
        page.clear_filters();
        assert!(page.filters().is_empty());
        page.load_more();
        assert_eq!(page.notices.drain().len(), 2);
    }

    #[test]
    fn test_seed_query() {
        let mut page = SearchPage::new();
        page.seed_query(Some("quantum"));
        assert_eq!(page.query(), "quantum");
        page.seed_query(None);
        assert_eq!(page.query(), "quantum");
    }
}
