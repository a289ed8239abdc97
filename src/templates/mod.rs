//! Built-in site templates using the Tera template engine
//!
//! Templates and the page script are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::theme::WidgetThemes;

/// Client-side script for "load more", the theme toggle and lazy comments
pub const BLOG_JS: &str = include_str!("site/blog.js");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Values are escaped explicitly in the templates; rich-text HTML and
        // the comments embed must pass through untouched
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
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
    /// Preference the page starts with before the script reads storage
    pub theme: String,
    pub theme_label: String,
    pub widget_themes: WidgetThemes,
    /// Rendering against a preview reference
    pub preview: bool,
}

/// A listing card
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub uid: String,
    pub path: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub date_xml: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub uid: String,
    pub title: String,
    pub author: String,
    pub banner_url: String,
    pub date: String,
    pub date_xml: String,
    /// Empty for drafts
    pub updated: String,
    pub reading_time: u32,
    pub sections: Vec<SectionData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub heading: String,
    pub body_html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NavData {
    pub prev: Option<NavPost>,
    pub next: Option<NavPost>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommentsConfig;

    fn site(preview: bool) -> SiteData {
        SiteData {
            title: "SpaceTraveling".to_string(),
            language: "pt-BR".to_string(),
            theme: "light".to_string(),
            theme_label: "Activate dark mode".to_string(),
            widget_themes: WidgetThemes::from(&CommentsConfig::default()),
            preview,
        }
    }

    fn card(uid: &str) -> PostCard {
        PostCard {
            uid: uid.to_string(),
            path: format!("/post/{}/", uid),
            title: format!("Post <{}>", uid),
            subtitle: String::new(),
            author: "Joseph".to_string(),
            date: "15 mar 2021".to_string(),
            date_xml: String::new(),
        }
    }

    #[test]
    fn test_index_load_more_only_with_cursor() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = Context::new();
        context.insert("site", &site(false));
        context.insert("posts", &vec![card("a")]);
        context.insert("next_page", &Some("https://cms/page2"));
        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("Carregar mais posts"));
        // Tera's escape filter also encodes '/'
        assert!(html.contains(r#"data-next="https:&#x2F;&#x2F;cms&#x2F;page2""#));
        assert!(html.contains("Post &lt;a&gt;"));
        assert!(html.contains("15 mar 2021"));
        assert!(!html.contains("Sair do modo Preview"));

        context.insert("next_page", &None::<String>);
        let html = renderer.render("index.html", &context).unwrap();
        assert!(!html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_post_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let post = PostData {
            uid: "hello".to_string(),
            title: "Hello".to_string(),
            author: "Joseph".to_string(),
            banner_url: String::new(),
            date: "15 mar 2021".to_string(),
            date_xml: String::new(),
            updated: String::new(),
            reading_time: 4,
            sections: vec![SectionData {
                heading: "Intro".to_string(),
                body_html: "<p><strong>hi</strong></p>".to_string(),
            }],
        };

        let mut context = Context::new();
        context.insert("site", &site(true));
        context.insert("post", &post);
        context.insert(
            "navigation",
            &NavData {
                prev: None,
                next: Some(NavPost {
                    title: "Next one".to_string(),
                    path: "/post/next/".to_string(),
                }),
            },
        );
        context.insert("comments", &None::<String>);
        let html = renderer.render("post.html", &context).unwrap();

        assert!(html.contains("4 min"));
        assert!(html.contains("<p><strong>hi</strong></p>"));
        assert!(html.contains("Próximo post"));
        assert!(!html.contains("Post anterior"));
        assert!(!html.contains("editado em"));
        assert!(!html.contains(r#"id="comments""#));
        assert!(html.contains("Sair do modo Preview"));
    }
}
