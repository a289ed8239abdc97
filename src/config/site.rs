//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::theme::ThemePreference;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,

    // Directory
    pub public_dir: String,
    pub state_dir: String,

    // Date / Time format (date-fns style tokens)
    pub date_format: String,
    pub post_date_format: String,
    pub updated_format: String,

    // Integrations
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub comments: CommentsConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "SpaceTraveling".to_string(),
            language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),

            public_dir: "public".to_string(),
            state_dir: ".spacetraveling".to_string(),

            date_format: "dd LLL yyyy".to_string(),
            post_date_format: "dd MMM yyyy".to_string(),
            updated_format: "'* editado em' dd MMM yyyy 'às' HH':'mm".to_string(),

            cms: CmsConfig::default(),
            comments: CommentsConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configured timezone, falling back to UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                if !self.timezone.is_empty() {
                    tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                }
                chrono_tz::UTC
            }
        }
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// API entry point, e.g. `https://<repo>.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub document_type: String,
    /// Posts per listing page
    pub page_size: u32,
    pub access_token: Option<String>,
    /// Read documents from a local JSON file instead of the API
    pub fixtures: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://spacetraveling.cdn.prismic.io/api/v2".to_string(),
            document_type: "posts".to_string(),
            page_size: 1,
            access_token: None,
            fixtures: None,
        }
    }
}

/// utterances comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    /// GitHub repository backing the comments, `owner/name`
    pub repo: String,
    pub issue_term: String,
    pub label: String,
    pub script_src: String,
    /// Widget theme used when the site is light
    pub theme: String,
    /// Widget theme used when the site is dark
    pub dark_theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            repo: String::new(),
            issue_term: "pathname".to_string(),
            label: "comments".to_string(),
            script_src: "https://utteranc.es/client.js".to_string(),
            theme: "github-light".to_string(),
            dark_theme: "github-dark".to_string(),
        }
    }
}

/// Site theme defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preference used until the visitor toggles it
    pub default: ThemePreference,
}
