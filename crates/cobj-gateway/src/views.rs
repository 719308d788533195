//! Server-side page rendering.
//!
//! Templates are compiled into the binary and parsed once at start-up.

use tera::{Context, Tera};
use tracing::error;

use crate::record::Record;

pub const HOMEPAGE_TITLE: &str = "Custom Objects Table | Integrating With HubSpot I Practicum";
pub const UPDATES_TITLE: &str = "Update Custom Object Form | Integrating With HubSpot I Practicum";

const HOMEPAGE: &str = "homepage.html";
const UPDATES: &str = "updates.html";

/// Parsed page templates.
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Parse the embedded templates.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("../templates/layout.html")),
            (HOMEPAGE, include_str!("../templates/homepage.html")),
            (UPDATES, include_str!("../templates/updates.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Record table page.
    pub fn homepage(&self, records: &[Record]) -> Result<String, tera::Error> {
        self.render(HOMEPAGE, &homepage_context(records))
    }

    /// Record creation form.
    pub fn updates(&self) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("title", UPDATES_TITLE);
        self.render(UPDATES, &ctx)
    }

    fn render(&self, template: &str, ctx: &Context) -> Result<String, tera::Error> {
        self.tera.render(template, ctx).inspect_err(|e| {
            error!(template, error = ?e, "failed to render template");
        })
    }
}

fn homepage_context(records: &[Record]) -> Context {
    let mut ctx = Context::new();
    ctx.insert("title", HOMEPAGE_TITLE);
    ctx.insert("records", records);
    ctx
}
