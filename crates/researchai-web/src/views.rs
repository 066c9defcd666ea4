//! Template environment. Templates are compiled into the binary; `.html`
//! templates autoescape, so user-entered text never renders as markup.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::ApiError;
use crate::icons;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("nav.html", include_str!("../templates/nav.html")),
    ("notices.html", include_str!("../templates/notices.html")),
    ("chat.html", include_str!("../templates/chat.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
    ("search.html", include_str!("../templates/search.html")),
    ("paper.html", include_str!("../templates/paper.html")),
    ("references.html", include_str!("../templates/references.html")),
    ("reference_delete.html", include_str!("../templates/reference_delete.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_function("icon", icons::icon);
        Ok(Self { env })
    }

    pub fn render_string<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, ApiError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, ApiError> {
        self.render_string(name, ctx).map(Html)
    }
}
