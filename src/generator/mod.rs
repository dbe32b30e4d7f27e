//! Generator module - renders blog pages to HTML using built-in Tera templates

use anyhow::Result as AnyResult;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{PostDetail, PostPagination, PostSummary};
use crate::error::Result;
use crate::helpers::{reading_time, DateFormatter, DateLocale};
use crate::prismic::public_cursor;
use crate::templates::{EditedData, PostCard, PostView, SiteData, TemplateRenderer};

/// Page generator: turns posts into view data and renders templates
pub struct Generator {
    renderer: TemplateRenderer,
    formatter: DateFormatter,
    site: SiteData,
    words_per_minute: usize,
}

impl Generator {
    /// Create a new generator
    pub fn new(config: &SiteConfig) -> AnyResult<Self> {
        let renderer = TemplateRenderer::new()?;
        let formatter = DateFormatter::new(DateLocale::from_language(&config.language), config.tz()?);

        Ok(Self {
            renderer,
            formatter,
            site: SiteData {
                title: config.title.clone(),
                language: config.language.clone(),
                load_more_label: config.load_more_label.clone(),
            },
            words_per_minute: config.words_per_minute,
        })
    }

    /// View data for a list entry
    pub fn post_card(&self, post: &PostSummary) -> PostCard {
        PostCard {
            href: post.href(),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            date: post
                .first_publication_date
                .map(|d| self.formatter.date(&d))
                .unwrap_or_default(),
            datetime: post.first_publication_date.map(|d| d.to_rfc3339()),
        }
    }

    /// View data for a detail page
    pub fn post_view(&self, post: &PostDetail) -> PostView {
        let edited = if post.was_edited() {
            post.last_publication_date.map(|d| EditedData {
                date: self.formatter.date(&d),
                time: self.formatter.time(&d),
            })
        } else {
            None
        };

        PostView {
            title: post.title.clone(),
            banner_url: post.banner_url.clone(),
            author: post.author.clone(),
            date: post
                .first_publication_date
                .map(|d| self.formatter.date(&d))
                .unwrap_or_default(),
            datetime: post.first_publication_date.map(|d| d.to_rfc3339()),
            reading_time: reading_time(post.word_count, self.words_per_minute),
            edited,
            heading: post.content.heading.clone(),
            body_html: post.content.body_html.clone(),
        }
    }

    /// Home page: the seed list and, when there is a cursor, the "load more" button
    pub fn render_home(&self, pagination: &PostPagination) -> Result<String> {
        let next_page = pagination.next_page.as_deref().map(public_cursor);

        let mut context = self.base_context();
        context.insert("posts", &self.cards(&pagination.results));
        context.insert("next_page", &next_page);
        self.renderer.render("index.html", &context)
    }

    /// Just the list entries, for appending to an already rendered home page
    pub fn render_cards(&self, posts: &[PostSummary]) -> Result<String> {
        let mut context = self.base_context();
        context.insert("posts", &self.cards(posts));
        self.renderer.render("partials/post_cards.html", &context)
    }

    pub fn render_post(&self, post: &PostDetail) -> Result<String> {
        let mut context = self.base_context();
        context.insert("post", &self.post_view(post));
        self.renderer.render("post.html", &context)
    }

    pub fn render_error(&self, status: u16, message: &str) -> Result<String> {
        let mut context = self.base_context();
        context.insert("status", &status);
        context.insert("message", message);
        self.renderer.render("error.html", &context)
    }

    fn cards(&self, posts: &[PostSummary]) -> Vec<PostCard> {
        posts.iter().map(|p| self.post_card(p)).collect()
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }
}
