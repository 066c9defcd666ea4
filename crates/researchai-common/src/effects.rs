//! One-shot side effects triggered by page actions.
//! Each effect always succeeds; the acknowledgment is what the user sees.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Hand a file to the browser's save dialog.
    Download { filename: String, content_type: String, body: String },
    /// Plain UTF-8 text for the system clipboard.
    Clipboard { text: String },
    /// Open a link in a new browsing context.
    OpenExternal { url: String },
    /// Native share sheet; `url` doubles as the clipboard fallback.
    Share { title: String, text: String, url: String },
}

impl Effect {
    pub fn download(filename: impl Into<String>, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Download { filename: filename.into(), content_type: content_type.into(), body: body.into() }
    }

    pub fn clipboard(text: impl Into<String>) -> Self {
        Self::Clipboard { text: text.into() }
    }

    pub fn open_external(url: impl Into<String>) -> Self {
        Self::OpenExternal { url: url.into() }
    }

    pub fn acknowledgment(&self) -> String {
        match self {
            Self::Download { filename, .. } => format!("Download started: {}", filename),
            Self::Clipboard { .. } => "Copied to clipboard".to_string(),
            Self::OpenExternal { url } => format!("Opened {}", url),
            Self::Share { .. } => "Link ready to share".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_serializes_with_kind_tag() {
        let effect = Effect::clipboard("Smith (2024).");
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["kind"], "clipboard");
        assert_eq!(json["text"], "Smith (2024).");
    }

    #[test]
    fn test_download_acknowledgment_names_file() {
        let effect = Effect::download("paper.txt", "text/plain", "body");
        assert_eq!(effect.acknowledgment(), "Download started: paper.txt");
    }
}
