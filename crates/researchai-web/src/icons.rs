//! Named glyphs used by templates through the `icon(name)` function.
//! Unknown or missing names fall back to a neutral glyph instead of failing
//! the render.

use minijinja::Value;

pub const FALLBACK_GLYPH: &str = "◆";

const GLYPHS: &[(&str, &str)] = &[
    ("arrow-left", "←"),
    ("bar-chart", "📊"),
    ("bookmark", "🔖"),
    ("book-open", "📖"),
    ("brain", "🧠"),
    ("check", "✓"),
    ("clock", "🕒"),
    ("copy", "⧉"),
    ("cpu", "🖥"),
    ("download", "⬇"),
    ("edit", "✎"),
    ("external-link", "↗"),
    ("file-text", "📄"),
    ("filter", "⛃"),
    ("folder", "📁"),
    ("grid", "▦"),
    ("home", "🏠"),
    ("layers", "☰"),
    ("menu", "≡"),
    ("message-circle", "💬"),
    ("plus", "+"),
    ("quote", "❝"),
    ("search", "🔍"),
    ("send", "➤"),
    ("share", "⤴"),
    ("sparkles", "✨"),
    ("tag", "🏷"),
    ("trash", "🗑"),
    ("trending-up", "📈"),
    ("upload", "⬆"),
    ("user", "👤"),
    ("users", "👥"),
    ("x", "✕"),
    ("zap", "⚡"),
];

pub fn glyph(name: &str) -> &'static str {
    GLYPHS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, g)| *g)
        .unwrap_or(FALLBACK_GLYPH)
}

/// Template function: `{{ icon("search") }}`.
pub fn icon(name: Option<String>) -> Value {
    let glyph = glyph(name.as_deref().unwrap_or_default());
    Value::from_safe_string(format!(r#"<span class="icon" aria-hidden="true">{}</span>"#, glyph))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_names() {
        assert_eq!(glyph("search"), "🔍");
        assert_eq!(glyph("no-such-icon"), FALLBACK_GLYPH);
        assert_eq!(glyph(""), FALLBACK_GLYPH);
    }

    #[test]
    fn test_every_fixture_icon_resolves() {
        use researchai_common::fixtures;
        let names = fixtures::features()
            .iter()
            .map(|f| f.icon)
            .chain(fixtures::dashboard_stats().iter().map(|s| s.icon))
            .chain(fixtures::landing_stats().iter().map(|s| s.icon))
            .collect::<Vec<_>>();
        for name in names {
            assert_ne!(glyph(name), FALLBACK_GLYPH, "missing glyph for {}", name);
        }
    }

    #[test]
    fn test_missing_name_renders_fallback() {
        let html = icon(None).to_string();
        assert!(html.contains(FALLBACK_GLYPH));
    }
}
