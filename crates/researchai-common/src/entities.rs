/// Core record types shared by every page.
/// All of them are flat: nothing here references another list by id.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Paper
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub affiliation: String,
}

impl Author {
    pub fn new(name: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self { name: name.into(), affiliation: affiliation.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paper {
    pub id: u32,
    pub title: String,
    pub authors: Vec<Author>,
    pub journal: String,
    pub year: i32,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub citations: u32,
    pub doi: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Only set on search results, in `[0, 1]`.
    pub relevance: Option<f64>,
}

impl Paper {
    pub fn author_names(&self) -> Vec<&str> {
        self.authors.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn doi_url(&self) -> String {
        format!("https://doi.org/{}", self.doi)
    }

    /// Relevance as a whole percentage, 0 when the paper is not a search hit.
    pub fn relevance_percent(&self) -> u32 {
        self.relevance.map(|r| (r.clamp(0.0, 1.0) * 100.0).round() as u32).unwrap_or(0)
    }

    /// "Volume(Issue), pages" tail of a citation, or an empty string.
    fn locator(&self) -> String {
        match (&self.volume, &self.issue, &self.pages) {
            (Some(v), Some(i), Some(p)) => format!(", {}({}), {}", v, i, p),
            (Some(v), None, Some(p)) => format!(", {}, {}", v, p),
            (Some(v), _, None) => format!(", {}", v),
            _ => String::new(),
        }
    }

    pub fn citation(&self) -> String {
        format!(
            "{} ({}). {}. {}{}.",
            self.author_names().join(", "),
            self.year,
            self.title,
            self.journal,
            self.locator(),
        )
    }

    /// File name used when the paper is downloaded.
    pub fn download_filename(&self) -> String {
        format!("{}.txt", self.doi.replace('/', "_"))
    }

    /// Plain-text rendition used for downloads.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push_str("\n\n");
        for author in &self.authors {
            if author.affiliation.is_empty() {
                out.push_str(&format!("{}\n", author.name));
            } else {
                out.push_str(&format!("{} ({})\n", author.name, author.affiliation));
            }
        }
        out.push_str(&format!("\n{}\nDOI: {}\n\nAbstract\n\n{}\n", self.citation(), self.doi, self.abstract_text));
        for section in &self.sections {
            out.push_str(&format!("\n{}\n\n{}\n", section.title, section.body));
        }
        if !self.references.is_empty() {
            out.push_str("\nReferences\n\n");
            for (i, r) in self.references.iter().enumerate() {
                out.push_str(&format!("[{}] {}\n", i + 1, r));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Reference (reference manager entry)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    #[default]
    Article,
    Book,
    Report,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [Self::Article, Self::Book, Self::Report];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "article" => Ok(Self::Article),
            "book" => Ok(Self::Book),
            "report" => Ok(Self::Report),
            other => Err(format!("unknown reference type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reference {
    pub id: u64,
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    pub folder: String,
    pub tags: Vec<String>,
    pub notes: String,
    pub citation: String,
    pub doi: String,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub role: ChatRole,
    pub content: String,
    /// Display string (`HH:MM`, local time), not a sortable instant.
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into(), timestamp: display_time() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into(), timestamp: display_time() }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

fn display_time() -> String {
    Local::now().format("%H:%M").to_string()
}

// ---------------------------------------------------------------------------
// Search filters & bookmarks
// ---------------------------------------------------------------------------

/// Filter fields on the search page. Collected and echoed, never applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub citations: String,
}

impl SearchFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_empty() && self.journal.is_empty() && self.author.is_empty() && self.citations.is_empty()
    }
}

/// Paper ids the user marked as saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkSet {
    ids: BTreeSet<u32>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership; returns whether `id` is bookmarked afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_bookmark_toggle_twice_restores_set() {
        let mut set = BookmarkSet::new();
        set.toggle(3);
        let before = set.clone();

        assert!(set.toggle(1));
        assert!(set.contains(1));
        assert!(!set.toggle(1));
        assert_eq!(set, before);
    }

    #[test]
    fn test_reference_kind_parse() {
        assert_eq!("".parse::<ReferenceKind>(), Ok(ReferenceKind::Article));
        assert_eq!(" Book ".parse::<ReferenceKind>(), Ok(ReferenceKind::Book));
        assert!("thesis".parse::<ReferenceKind>().is_err());
    }

    #[test]
    fn test_reference_serializes_kind_as_type() {
        let r = fixtures::references().remove(0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "article");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_paper_citation_and_doi() {
        let paper = fixtures::featured_paper();
        assert_eq!(paper.doi_url(), "https://doi.org/10.1038/s41591-024-01234-5");
        let citation = paper.citation();
        assert!(citation.starts_with("John Smith, Alice Johnson, Michael Brown (2024)."));
        assert!(citation.ends_with("Nature Medicine, 30(4), 456-472."));
        assert_eq!(paper.download_filename(), "10.1038_s41591-024-01234-5.txt");
    }

    #[test]
    fn test_plain_text_lists_sections() {
        let text = fixtures::featured_paper().to_plain_text();
        assert!(text.contains("Methods"));
        assert!(text.contains("[1] "));
    }

    #[test]
    fn test_search_filters_clear() {
        let mut filters = SearchFilters { year: "2024".into(), citations: "100+".into(), ..Default::default() };
        assert!(!filters.is_empty());
        filters.clear();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_chat_message_roles() {
        assert!(ChatMessage::user("hi").is_user());
        assert!(!ChatMessage::assistant("hello").is_user());
        assert_eq!(ChatMessage::user("hi").timestamp.len(), 5);
    }
}
