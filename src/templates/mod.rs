//! Built-in blog templates using the Tera template engine
//!
//! All templates are embedded in the binary.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Result;

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("error.html", include_str!("blog/error.html")),
            (
                "partials/post_cards.html",
                include_str!("blog/partials/post_cards.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub load_more_label: String,
}

/// A list entry; `date` is already formatted for display
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub href: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub datetime: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditedData {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: String,
    pub banner_url: Option<String>,
    pub author: String,
    pub date: String,
    pub datetime: Option<String>,
    pub reading_time: usize,
    pub edited: Option<EditedData>,
    pub heading: String,
    pub body_html: String,
}
