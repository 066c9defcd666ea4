//! Reference manager page state: the library plus the add-form draft and
//! queued notices. Tab and query live in the URL.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use researchai_common::error::{ResearchError, Result};
use researchai_common::{Effect, Notices, Reference};
use researchai_library::{
    Confirmation, NewReference, ReferenceLibrary, ReferenceTab, EXPORT_FILENAME,
};

use super::TabView;

/// Import sources offered in the sidebar. None of them is wired up yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    Zotero,
    Doi,
}

impl ImportSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Zotero => "Zotero",
            Self::Doi => "DOI",
        }
    }
}

impl FromStr for ImportSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "zotero" => Ok(Self::Zotero),
            "doi" => Ok(Self::Doi),
            other => Err(format!("unknown import source: {}", other)),
        }
    }
}

/// Query string that keeps the current filter when redirecting back.
pub fn list_href(query: &str, tab: ReferenceTab) -> String {
    let mut params = Vec::new();
    if !query.is_empty() {
        params.push(format!("q={}", urlencoding::encode(query)));
    }
    if tab != ReferenceTab::All {
        params.push(format!("tab={}", tab.as_str()));
    }
    if params.is_empty() {
        "/references".to_string()
    } else {
        format!("/references?{}", params.join("&"))
    }
}

/// Same list view with the add modal open.
pub fn add_form_href(query: &str, tab: ReferenceTab) -> String {
    let list = list_href(query, tab);
    let sep = if list.contains('?') { '&' } else { '?' };
    format!("{}{}modal=add", list, sep)
}

#[derive(Default)]
pub struct ReferencesPage {
    library: ReferenceLibrary,
    /// Buffers of a rejected submit, shown again in the reopened modal.
    draft: Option<NewReference>,
    pub notices: Notices,
}

impl ReferencesPage {
    pub fn new(library: ReferenceLibrary) -> Self {
        Self { library, draft: None, notices: Notices::default() }
    }

    pub fn library(&self) -> &ReferenceLibrary {
        &self.library
    }

    pub fn draft(&self) -> Option<&NewReference> {
        self.draft.as_ref()
    }

    /// The modal was dismissed; the next "Add Reference" starts empty.
    pub fn discard_draft(&mut self) {
        self.draft = None;
    }

    /// Add without touching the draft or notices (JSON API).
    pub fn insert(&mut self, form: NewReference, current_year: i32) -> Result<Reference> {
        self.library.add(form, current_year).cloned()
    }

    /// Returns the new reference, or the validation error with the draft
    /// kept for the reopened form.
    pub fn add(&mut self, form: NewReference, current_year: i32) -> Result<Reference> {
        match self.insert(form.clone(), current_year) {
            Ok(added) => {
                self.draft = None;
                self.notices.success(format!("Added \"{}\"", added.title));
                Ok(added)
            }
            Err(err) => {
                self.notices.warning("Please enter a title and at least one author");
                self.draft = Some(form);
                Err(err)
            }
        }
    }

    /// All references matching the query and tab, owned for rendering.
    pub fn visible(&self, query: &str, tab: ReferenceTab) -> Vec<Reference> {
        self.library.filter(query, tab).into_iter().cloned().collect()
    }

    /// Delete without notices (JSON API). `None` when not confirmed.
    pub fn remove(&mut self, id: u64, confirmation: Confirmation) -> Result<Option<Reference>> {
        self.library.delete(id, confirmation)
    }

    pub fn delete(&mut self, id: u64, confirmation: Confirmation) -> Result<Option<Reference>> {
        let removed = self.library.delete(id, confirmation)?;
        match &removed {
            Some(r) => self.notices.success(format!("Deleted \"{}\"", r.title)),
            None => self.notices.info("Deletion cancelled"),
        }
        Ok(removed)
    }

    pub fn import(&mut self, source: ImportSource) {
        self.notices.info(format!("Import from {} is coming soon", source.label()));
    }

    pub fn share(&mut self) {
        self.notices.info("Sharing your library is coming soon");
    }

    pub fn export(&self, now: DateTime<Utc>) -> Result<Effect> {
        let body = self.library.export(now).to_json_pretty()?;
        Ok(Effect::download(EXPORT_FILENAME, "application/json", body))
    }

    pub fn get(&self, id: u64) -> Result<&Reference> {
        self.library
            .get(id)
            .ok_or_else(|| ResearchError::NotFound(format!("reference {}", id)))
    }

    pub fn tab_strip(&self, query: &str, active: ReferenceTab) -> Vec<TabView> {
        self.library
            .tab_counts()
            .into_iter()
            .map(|(tab, count)| TabView {
                id: tab.as_str(),
                label: tab.label(),
                href: list_href(query, tab),
                active: tab == active,
                count: Some(count),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(title: &str, authors: &str) -> NewReference {
        NewReference { title: title.into(), authors: authors.into(), ..Default::default() }
    }

    #[test]
    fn test_rejected_add_keeps_draft() {
        let mut page = ReferencesPage::default();
        let before = page.library().len();
        assert!(page.add(form("", "A"), 2025).is_err());
        assert_eq!(page.library().len(), before);
        assert_eq!(page.draft().map(|d| d.authors.as_str()), Some("A"));

        let added = page.add(form("T", "A"), 2025).unwrap();
        assert_eq!(added.title, "T");
        assert!(page.draft().is_none());
        assert_eq!(page.notices.drain().len(), 2);
    }

    #[test]
    fn test_discard_draft() {
        let mut page = ReferencesPage::default();
        assert!(page.add(form("", "Zed Quill"), 2025).is_err());
        page.discard_draft();
        assert!(page.draft().is_none());
    }

    #[test]
    fn test_delete_declined_and_confirmed() {
        let mut page = ReferencesPage::default();
        assert!(page.delete(1, Confirmation::Declined).unwrap().is_none());
        assert!(page.get(1).is_ok());
        assert!(page.delete(1, Confirmation::Confirmed).unwrap().is_some());
        assert!(page.get(1).is_err());
        assert!(page.delete(1, Confirmation::Confirmed).is_err());
    }

    #[test]
    fn test_export_effect() {
        let page = ReferencesPage::default();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        match page.export(now).unwrap() {
            Effect::Download { filename, content_type, body } => {
                assert_eq!(filename, "research-references.json");
                assert_eq!(content_type, "application/json");
                let json: serde_json::Value = serde_json::from_str(&body).unwrap();
                assert_eq!(json["totalCount"], 3);
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_placeholders_queue_info() {
        let mut page = ReferencesPage::default();
        page.import("zotero".parse().unwrap());
        page.import(ImportSource::Doi);
        page.share();
        let messages: Vec<_> = page.notices.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages[0], "Import from Zotero is coming soon");
        assert_eq!(messages.len(), 3);
        assert!("bibtex".parse::<ImportSource>().is_err());
    }

    #[test]
    fn test_list_href_keeps_filter() {
        assert_eq!(list_href("", ReferenceTab::All), "/references");
        assert_eq!(list_href("deep nets", ReferenceTab::Books), "/references?q=deep%20nets&tab=books");
        assert_eq!(add_form_href("", ReferenceTab::All), "/references?modal=add");
        assert_eq!(add_form_href("x", ReferenceTab::All), "/references?q=x&modal=add");
    }

    #[test]
    fn test_tab_strip_counts() {
        let page = ReferencesPage::default();
        let strip = page.tab_strip("", ReferenceTab::Articles);
        assert_eq!(strip[0].count, Some(3));
        assert!(strip[1].active);
    }
}
