//! Post view-model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading;
use super::richtext::RichText;

/// A blog post, projected from a CMS document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// CMS document id
    pub id: String,

    /// URL-friendly identifier, unique within a listing
    pub uid: String,

    /// `None` for unpublished drafts
    pub first_publication_date: Option<DateTime<Utc>>,

    pub last_publication_date: Option<DateTime<Utc>>,

    pub title: String,

    pub subtitle: String,

    pub author: String,

    /// Empty when the document has no banner
    pub banner_url: String,

    /// Sections in display order
    pub content: Vec<ContentSection>,
}

/// A headed section of a post body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: RichText,
}

impl Post {
    /// Site-relative path of the post page
    pub fn path(&self) -> String {
        format!("/post/{}/", self.uid)
    }

    /// Estimated minutes to read the body
    pub fn reading_time(&self) -> u32 {
        reading::estimate(&self.content)
    }
}
