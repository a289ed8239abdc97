//! Helper functions for templates
//!
//! Date formatting and HTML escaping shared by the page renderer and the
//! rich-text converter.

mod date;
mod html;

use chrono::{DateTime, Utc};

pub use date::*;
pub use html::*;

use crate::config::SiteConfig;

/// Helpers bound to the site's language and timezone
pub struct Helpers {
    config: SiteConfig,
}

impl Helpers {
    /// Create a new helpers instance
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Format a publication date in the site timezone, "" for drafts
    pub fn date(&self, date: Option<&DateTime<Utc>>, format: &str) -> String {
        match date {
            Some(date) => format_date(
                &date.with_timezone(&self.config.tz()),
                format,
                &self.config.language,
            ),
            None => String::new(),
        }
    }

    /// ISO 8601 timestamp for `<time datetime>`, "" for drafts
    pub fn date_xml(&self, date: Option<&DateTime<Utc>>) -> String {
        date.map(|d| date_xml(&d.with_timezone(&self.config.tz())))
            .unwrap_or_default()
    }

    /// Listing card date
    pub fn listing_date(&self, date: Option<&DateTime<Utc>>) -> String {
        self.date(date, &self.config.date_format)
    }

    /// Post header date
    pub fn post_date(&self, date: Option<&DateTime<Utc>>) -> String {
        self.date(date, &self.config.post_date_format)
    }

    /// "* editado em ..." line
    pub fn updated(&self, date: Option<&DateTime<Utc>>) -> String {
        self.date(date, &self.config.updated_format)
    }
}
