//! spacetraveling: a static blog generator backed by a headless CMS
//!
//! Posts are fetched from a Prismic-style search API, merged page by page
//! through their cursors, and rendered with embedded Tera templates. Post
//! pages carry a reading-time estimate, previous/next links and an utterances
//! comments widget whose theme follows the site's light/dark preference.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod navigation;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Local state (theme preference)
    pub state_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let public_dir = base_dir.join(&config.public_dir);
        let state_dir = base_dir.join(&config.state_dir);

        Self {
            config,
            base_dir,
            public_dir,
            state_dir,
        }
    }

    /// Content source described by the `cms` section
    pub fn content_source(&self) -> Result<Box<dyn cms::ContentSource>> {
        Ok(cms::from_config(&self.config.cms, &self.base_dir)?)
    }

    /// Theme controller over the blog's state directory
    pub fn theme_controller(&self) -> theme::ThemeController {
        theme::ThemeController::new(
            theme::ThemeStore::new(&self.state_dir),
            self.config.theme.default,
            theme::WidgetThemes::from(&self.config.comments),
        )
    }

    /// Generate the static site
    pub async fn generate(&self, preview_ref: Option<&str>) -> Result<usize> {
        commands::generate::run(self, preview_ref).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
