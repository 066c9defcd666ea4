//! Reference manager operations: add, delete with confirmation, filtered views.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use researchai_common::error::{ResearchError, Result};
use researchai_common::{fixtures, Reference, ReferenceKind};

use crate::collection::Collection;
use crate::export::ExportPayload;

/// Category tabs above the reference list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceTab {
    #[default]
    All,
    Articles,
    Books,
    Reports,
}

impl ReferenceTab {
    pub const ALL: [ReferenceTab; 4] = [Self::All, Self::Articles, Self::Books, Self::Reports];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Articles => "articles",
            Self::Books => "books",
            Self::Reports => "reports",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All References",
            Self::Articles => "Articles",
            Self::Books => "Books",
            Self::Reports => "Reports",
        }
    }

    pub fn matches(&self, kind: ReferenceKind) -> bool {
        match self {
            Self::All => true,
            Self::Articles => kind == ReferenceKind::Article,
            Self::Books => kind == ReferenceKind::Book,
            Self::Reports => kind == ReferenceKind::Report,
        }
    }
}

impl fmt::Display for ReferenceTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| format!("unknown tab: {}", s))
    }
}

/// Raw buffers of the "add reference" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewReference {
    #[serde(default)]
    pub title: String,
    /// Comma-separated.
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub year: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub folder: String,
    /// Comma-separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub doi: String,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl NewReference {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ResearchError::Validation("title is required".into()));
        }
        if split_list(&self.authors).is_empty() {
            return Err(ResearchError::Validation("at least one author is required".into()));
        }
        Ok(())
    }

    /// Build the stored record. Callers validate first.
    pub fn into_reference(self, id: u64, current_year: i32) -> Reference {
        let authors = split_list(&self.authors);
        let year = self.year.trim().parse().unwrap_or(current_year);
        let title = self.title.trim().to_string();
        let journal = self.journal.trim().to_string();
        let citation = format!("{} ({}). {}. {}.", authors.join(", "), year, title, journal);
        Reference {
            id,
            title,
            authors,
            journal,
            year,
            kind: self.kind.parse().unwrap_or_default(),
            folder: self.folder.trim().to_string(),
            tags: split_list(&self.tags),
            notes: self.notes.trim().to_string(),
            citation,
            doi: self.doi.trim().to_string(),
        }
    }
}

/// Answer to the "delete this reference?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn from_answer(answer: Option<&str>) -> Self {
        match answer.map(|a| a.trim().to_ascii_lowercase()) {
            Some(a) if a == "yes" || a == "true" => Self::Confirmed,
            _ => Self::Declined,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FolderSummary {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    references: Collection<Reference>,
}

impl Default for ReferenceLibrary {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ReferenceLibrary {
    pub fn new(references: Vec<Reference>) -> Self {
        Self { references: Collection::from_seed(references) }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Library pre-filled with the sample references.
    pub fn seeded() -> Self {
        Self::new(fixtures::references())
    }

    pub fn all(&self) -> &[Reference] {
        self.references.as_slice()
    }

    pub fn get(&self, id: u64) -> Option<&Reference> {
        self.references.get(id)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn add(&mut self, form: NewReference, current_year: i32) -> Result<&Reference> {
        form.validate()?;
        let added = self.references.insert_with(|id| form.into_reference(id, current_year));
        info!(id = added.id, title = %added.title, "Added reference");
        Ok(added)
    }

    /// Remove `id` only when confirmed. `Ok(None)` means the user declined.
    pub fn delete(&mut self, id: u64, confirmation: Confirmation) -> Result<Option<Reference>> {
        if !self.references.contains(id) {
            return Err(ResearchError::NotFound(format!("reference {}", id)));
        }
        match confirmation {
            Confirmation::Declined => {
                debug!(id, "Delete declined");
                Ok(None)
            }
            Confirmation::Confirmed => {
                let removed = self.references.remove(id);
                info!(id, "Deleted reference");
                Ok(removed)
            }
        }
    }

    /// Case-insensitive match on title or any author, combined with the tab.
    pub fn filter(&self, query: &str, tab: ReferenceTab) -> Vec<&Reference> {
        let needle = query.trim().to_lowercase();
        self.references
            .iter()
            .filter(|r| tab.matches(r.kind))
            .filter(|r| {
                needle.is_empty()
                    || r.title.to_lowercase().contains(&needle)
                    || r.authors.iter().any(|a| a.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn tab_counts(&self) -> Vec<(ReferenceTab, usize)> {
        ReferenceTab::ALL
            .into_iter()
            .map(|tab| (tab, self.references.iter().filter(|r| tab.matches(r.kind)).count()))
            .collect()
    }

    /// Folder names in first-seen order with their reference counts.
    pub fn folders(&self) -> Vec<FolderSummary> {
        let mut folders: Vec<FolderSummary> = Vec::new();
        for r in self.references.iter().filter(|r| !r.folder.is_empty()) {
            match folders.iter_mut().find(|f| f.name == r.folder) {
                Some(folder) => folder.count += 1,
                None => folders.push(FolderSummary { name: r.folder.clone(), count: 1 }),
            }
        }
        folders
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportPayload {
        ExportPayload::new(self.references.as_slice().to_vec(), now)
    }
}

/// Calendar year used when a new reference leaves the year blank.
pub fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(title: &str, authors: &str) -> NewReference {
        NewReference { title: title.into(), authors: authors.into(), ..Default::default() }
    }

    fn ids(refs: &[Reference]) -> Vec<u64> {
        refs.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_add_splits_authors_and_builds_citation() {
        let mut lib = ReferenceLibrary::seeded();
        let added = lib.add(form("T", "A, B"), 2025).unwrap().clone();

        assert_eq!(added.authors, vec!["A".to_string(), "B".to_string()]);
        assert!(added.citation.contains('T'));
        assert_eq!(added.citation, "A, B (2025). T. .");
        assert_eq!(added.kind, ReferenceKind::Article);
        assert_eq!(added.id, 4);
        assert_eq!(lib.len(), 4);
    }

    #[test]
    fn test_add_parses_optional_fields() {
        let mut lib = ReferenceLibrary::empty();
        let draft = NewReference {
            title: " Deep Learning ".into(),
            authors: "Goodfellow, I.,, ".into(),
            journal: "MIT Press".into(),
            year: "2016".into(),
            kind: "book".into(),
            tags: "ml, , textbook".into(),
            ..Default::default()
        };
        let added = lib.add(draft, 2025).unwrap();
        assert_eq!(added.title, "Deep Learning");
        assert_eq!(added.authors, vec!["Goodfellow".to_string(), "I.".to_string()]);
        assert_eq!(added.year, 2016);
        assert_eq!(added.kind, ReferenceKind::Book);
        assert_eq!(added.tags, vec!["ml".to_string(), "textbook".to_string()]);
        assert_eq!(added.citation, "Goodfellow, I. (2016). Deep Learning. MIT Press.");
    }

    #[test]
    fn test_add_requires_title_and_authors() {
        let mut lib = ReferenceLibrary::seeded();
        assert!(matches!(lib.add(form("  ", "A"), 2025), Err(ResearchError::Validation(_))));
        assert!(matches!(lib.add(form("T", " , "), 2025), Err(ResearchError::Validation(_))));
        assert_eq!(lib.len(), 3);
    }

    #[test]
    fn test_confirmed_delete_removes_exactly_one_and_keeps_order() {
        let mut lib = ReferenceLibrary::seeded();
        let removed = lib.delete(2, Confirmation::Confirmed).unwrap();
        assert_eq!(removed.map(|r| r.id), Some(2));
        assert_eq!(ids(lib.all()), vec![1, 3]);
    }

    #[test]
    fn test_declined_delete_leaves_list_untouched() {
        let mut lib = ReferenceLibrary::seeded();
        let before = lib.all().to_vec();
        assert_eq!(lib.delete(2, Confirmation::Declined).unwrap(), None);
        assert_eq!(lib.all(), before.as_slice());
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let mut lib = ReferenceLibrary::seeded();
        assert!(matches!(lib.delete(42, Confirmation::Confirmed), Err(ResearchError::NotFound(_))));
    }

    #[test]
    fn test_ids_stay_unique_after_delete_then_add() {
        let mut lib = ReferenceLibrary::seeded();
        lib.delete(3, Confirmation::Confirmed).unwrap();
        let id = lib.add(form("New", "X"), 2025).unwrap().id;
        assert_eq!(id, 4);
        assert_eq!(ids(lib.all()), vec![1, 2, 4]);
    }

    #[test]
    fn test_filter_combines_tab_and_query() {
        let mut lib = ReferenceLibrary::seeded();
        lib.add(
            NewReference { kind: "book".into(), ..form("Quantum Field Theory", "Peskin, M.") },
            2025,
        )
        .unwrap();

        let hits = lib.filter("QUANTUM", ReferenceTab::Articles);
        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|r| r.kind == ReferenceKind::Article));
        assert!(hits[0].title.to_lowercase().contains("quantum"));

        assert_eq!(lib.filter("quantum", ReferenceTab::All).len(), 2);
        assert_eq!(lib.filter("quantum", ReferenceTab::Books).len(), 1);
        assert_eq!(lib.filter("", ReferenceTab::Reports).len(), 0);
    }

    #[test]
    fn test_filter_matches_author_names() {
        let lib = ReferenceLibrary::seeded();
        let hits = lib.filter("wilson", ReferenceTab::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
        assert_eq!(lib.filter("   ", ReferenceTab::All).len(), 3);
    }

    #[test]
    fn test_tab_counts_and_folders_follow_list() {
        let mut lib = ReferenceLibrary::seeded();
        lib.add(NewReference { kind: "report".into(), folder: "Quantum Computing".into(), ..form("R", "Q") }, 2025)
            .unwrap();

        let counts = lib.tab_counts();
        assert_eq!(
            counts,
            vec![
                (ReferenceTab::All, 4),
                (ReferenceTab::Articles, 3),
                (ReferenceTab::Books, 0),
                (ReferenceTab::Reports, 1),
            ]
        );
        let quantum = lib.folders().into_iter().find(|f| f.name == "Quantum Computing").unwrap();
        assert_eq!(quantum.count, 2);
    }

    #[test]
    fn test_confirmation_answers() {
        assert_eq!(Confirmation::from_answer(Some("yes")), Confirmation::Confirmed);
        assert_eq!(Confirmation::from_answer(Some("TRUE")), Confirmation::Confirmed);
        assert_eq!(Confirmation::from_answer(Some("no")), Confirmation::Declined);
        assert_eq!(Confirmation::from_answer(None), Confirmation::Declined);
    }

    #[test]
    fn test_tab_parse_roundtrip() {
        for tab in ReferenceTab::ALL {
            assert_eq!(tab.as_str().parse::<ReferenceTab>(), Ok(tab));
        }
        assert!("papers".parse::<ReferenceTab>().is_err());
    }
}
