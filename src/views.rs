//! Server-side HTML views
//!
//! Templates are compiled once at startup into a handlebars registry and
//! rendered by name afterwards. The built-in templates are embedded in the
//! binary; any `<view>.hbs` found in the configured directory replaces its
//! embedded counterpart.

use std::path::Path;

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Named views the catalog can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Books,
    Show,
    Create,
    Created,
    Update,
    Updated,
    Borrow,
    Borrowed,
    Return,
    Returned,
}

impl View {
    pub const ALL: [View; 10] = [
        View::Books,
        View::Show,
        View::Create,
        View::Created,
        View::Update,
        View::Updated,
        View::Borrow,
        View::Borrowed,
        View::Return,
        View::Returned,
    ];

    pub fn name(self) -> &'static str {
        match self {
            View::Books => "books",
            View::Show => "show",
            View::Create => "create",
            View::Created => "created",
            View::Update => "update",
            View::Updated => "updated",
            View::Borrow => "borrow",
            View::Borrowed => "borrowed",
            View::Return => "return",
            View::Returned => "returned",
        }
    }

    fn embedded(self) -> &'static str {
        match self {
            View::Books => include_str!("../templates/books.hbs"),
            View::Show => include_str!("../templates/show.hbs"),
            View::Create => include_str!("../templates/create.hbs"),
            View::Created => include_str!("../templates/created.hbs"),
            View::Update => include_str!("../templates/update.hbs"),
            View::Updated => include_str!("../templates/updated.hbs"),
            View::Borrow => include_str!("../templates/borrow.hbs"),
            View::Borrowed => include_str!("../templates/borrowed.hbs"),
            View::Return => include_str!("../templates/return.hbs"),
            View::Returned => include_str!("../templates/returned.hbs"),
        }
    }
}

const LAYOUT: &str = "layout";
const EMBEDDED_LAYOUT: &str = include_str!("../templates/layout.hbs");

/// Compiled template set
pub struct Views {
    handlebars: Handlebars<'static>,
}

impl Views {
    /// Compile the embedded templates, applying overrides from `dir` if given
    pub fn new(dir: Option<&Path>) -> AppResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_helper("availability", Box::new(availability_helper));
        handlebars.register_helper("urlencode", Box::new(urlencode_helper));

        register(&mut handlebars, LAYOUT, EMBEDDED_LAYOUT, dir)?;
        for view in View::ALL {
            register(&mut handlebars, view.name(), view.embedded(), dir)?;
        }

        Ok(Self { handlebars })
    }

    /// Render a view to HTML
    pub fn render<T: Serialize>(&self, view: View, data: &T) -> AppResult<Html<String>> {
        let body = self.handlebars.render(view.name(), data)?;
        Ok(Html(body))
    }
}

fn register(
    handlebars: &mut Handlebars<'static>,
    name: &str,
    embedded: &str,
    dir: Option<&Path>,
) -> AppResult<()> {
    let source = match dir.map(|d| d.join(format!("{}.hbs", name))) {
        Some(path) if path.is_file() => {
            tracing::debug!("Loading template override {}", path.display());
            std::fs::read_to_string(&path).map_err(|e| {
                AppError::Internal(format!("Cannot read template {}: {}", path.display(), e))
            })?
        }
        _ => embedded.to_string(),
    };

    handlebars
        .register_template_string(name, source)
        .map_err(|e| AppError::Internal(format!("Invalid template {}: {}", name, e)))
}

/// `{{availability is_available}}` -> "Available" / "Borrowed"
fn availability_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let available = h.param(0).and_then(|v| v.value().as_bool()).unwrap_or(false);
    out.write(if available { "Available" } else { "Borrowed" })?;
    Ok(())
}

/// `{{urlencode isbn}}` -> percent-encoded query value
fn urlencode_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&urlencoding::encode(param))?;
    Ok(())
}
