//! Generator module - renders the listing and post pages from CMS content

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

use tera::Context;
use url::Url;

use crate::cms::ContentSource;
use crate::content::{project, richtext, Post};
use crate::helpers::Helpers;
use crate::listing::{self, ListingPage};
use crate::navigation::{Navigation, NavigationResolver, NavigationTarget};
use crate::templates::{
    NavData, NavPost, PostCard, PostData, SectionData, SiteData, TemplateRenderer, BLOG_JS,
};
use crate::theme::{comments, ThemeController, WidgetThemes};
use crate::Blog;

/// Static site generator using Tera templates
pub struct Generator<'a> {
    blog: Blog,
    source: &'a dyn ContentSource,
    renderer: TemplateRenderer,
    helpers: Helpers,
    theme: ThemeController,
    preview_ref: Option<String>,
}

impl<'a> Generator<'a> {
    /// Create a new generator reading from `source`
    pub fn new(blog: &Blog, source: &'a dyn ContentSource) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            source,
            renderer: TemplateRenderer::new()?,
            helpers: Helpers::new(blog.config.clone()),
            theme: blog.theme_controller(),
            preview_ref: None,
        })
    }

    /// Render against a content-preview reference instead of the master ref
    pub fn with_preview(mut self, preview_ref: Option<&str>) -> Self {
        self.preview_ref = preview_ref.map(str::to_string);
        self
    }

    /// Generate the entire site, returning the number of post pages written
    pub async fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.blog.public_dir)?;

        let cms = &self.blog.config.cms;
        let reference = self.preview_ref.as_deref();

        let first = listing::first_page(self.source, cms, reference).await?;
        self.generate_index_page(&first)?;

        let state = listing::collect_all(self.source, first).await?;
        tracing::info!("Loaded {} posts", state.posts().len());

        let resolver =
            NavigationResolver::new(self.source, &cms.document_type).with_reference(reference);

        for summary in state.posts() {
            let doc = self
                .source
                .get_by_uid(&cms.document_type, &summary.uid, reference)
                .await
                .with_context(|| format!("Failed to fetch post {}", summary.uid))?;
            let post = project(&doc)?;
            let navigation = resolver
                .resolve(&post.id, post.first_publication_date)
                .await?;
            self.generate_post_page(&post, &navigation)?;
        }

        self.write_file(Path::new("assets/blog.js"), BLOG_JS)?;

        Ok(state.posts().len())
    }

    fn site_data(&self) -> SiteData {
        let preference = self.theme.current();
        SiteData {
            title: self.blog.config.title.clone(),
            language: self.blog.config.language.clone(),
            theme: preference.to_string(),
            theme_label: self.theme.label().to_string(),
            widget_themes: WidgetThemes::from(&self.blog.config.comments),
            preview: self.preview_ref.is_some(),
        }
    }

    fn create_base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context
    }

    /// Generate the listing page from the first page of results
    fn generate_index_page(&self, page: &ListingPage) -> Result<()> {
        let posts: Vec<PostCard> = page.results.iter().map(|p| self.post_card(p)).collect();

        let mut context = self.create_base_context();
        context.insert("posts", &posts);
        context.insert("next_page", &load_more_cursor(page));

        let html = self.renderer.render("index.html", &context)?;
        self.write_file(Path::new("index.html"), &html)?;
        tracing::debug!("Generated index with {} posts", posts.len());
        Ok(())
    }

    /// Generate a single post page
    fn generate_post_page(&self, post: &Post, navigation: &Navigation) -> Result<()> {
        let data = PostData {
            uid: post.uid.clone(),
            title: post.title.clone(),
            author: post.author.clone(),
            banner_url: post.banner_url.clone(),
            date: self.helpers.post_date(post.first_publication_date.as_ref()),
            date_xml: self.helpers.date_xml(post.first_publication_date.as_ref()),
            updated: self.helpers.updated(post.last_publication_date.as_ref()),
            reading_time: post.reading_time(),
            sections: post
                .content
                .iter()
                .map(|section| SectionData {
                    heading: section.heading.clone(),
                    body_html: richtext::as_html(&section.body),
                })
                .collect(),
        };

        let nav = NavData {
            prev: navigation.prev.as_ref().map(nav_post),
            next: navigation.next.as_ref().map(nav_post),
        };

        let comments = comments::embed_script(&self.blog.config.comments, self.theme.current());

        let mut context = self.create_base_context();
        context.insert("post", &data);
        context.insert("navigation", &nav);
        context.insert("comments", &comments);

        let html = self.renderer.render("post.html", &context)?;
        let output_path = Path::new("post").join(&post.uid).join("index.html");
        self.write_file(&output_path, &html)?;
        tracing::debug!("Generated post: {:?}", output_path);
        Ok(())
    }

    fn post_card(&self, post: &Post) -> PostCard {
        PostCard {
            uid: post.uid.clone(),
            path: post.path(),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            date: self.helpers.listing_date(post.first_publication_date.as_ref()),
            date_xml: self.helpers.date_xml(post.first_publication_date.as_ref()),
        }
    }

    /// Write `content` to a path relative to the public directory
    fn write_file(&self, relative: &Path, content: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(())
    }
}

/// Cursor for the "load more" button, only when a browser can fetch it
///
/// Fixture cursors (`memory://`) are dropped, so sites built from fixtures
/// show just the first listing page.
fn load_more_cursor(page: &ListingPage) -> Option<&str> {
    let cursor = page.next_page.as_deref()?;
    match Url::parse(cursor) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(cursor),
        _ => {
            tracing::debug!("Not linking load-more to cursor {}", cursor);
            None
        }
    }
}

fn nav_post(target: &NavigationTarget) -> NavPost {
    NavPost {
        title: target.title.clone(),
        path: target.path(),
    }
}
