//! researchai-web: Web client for the Research AI demo.
//! Serves five pages backed by in-memory sample data:
//!   - Landing page with hero search and feature tour
//!   - Dashboard with the research assistant chat
//!   - Search results with filters and bookmarks
//!   - Paper viewer with "chat with PDF"
//!   - Reference manager with add / delete / export

pub mod config;
pub mod error;
pub mod handlers;
pub mod icons;
pub mod nav;
pub mod pages;
pub mod router;
pub mod sse;
pub mod state;
pub mod views;
