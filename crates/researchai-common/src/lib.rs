//! researchai-common: Shared records, fixtures and errors used across all Research AI crates.

pub mod error;
pub mod entities;
pub mod effects;
pub mod fixtures;
pub mod notice;

// Re-export commonly used types
pub use entities::{BookmarkSet, ChatMessage, ChatRole, Paper, Reference, ReferenceKind, SearchFilters};
pub use effects::Effect;
pub use notice::{Notice, NoticeLevel, Notices};
