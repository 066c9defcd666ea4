//! Landing page hero search.

use crate::nav::Route;

/// Where the hero search form sends the user. Blank input stays on the
/// landing page; otherwise the raw (untrimmed) text is percent-encoded into
/// the search route's `q` parameter.
pub fn search_target(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        return None;
    }
    Some(format!("{}?q={}", Route::Search.path(), urlencoding::encode(query)))
}
