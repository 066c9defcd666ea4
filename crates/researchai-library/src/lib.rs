//! researchai-library: In-memory reference manager.
//!   - `collection`: generic list with stable, never-reused ids
//!   - `references`: add / delete / filter over the user's references
//!   - `export`: the downloadable JSON snapshot

pub mod collection;
pub mod export;
pub mod references;

pub use collection::{Collection, Record};
pub use export::{ExportPayload, EXPORT_FILENAME};
pub use references::{current_year, Confirmation, FolderSummary, NewReference, ReferenceLibrary, ReferenceTab};
