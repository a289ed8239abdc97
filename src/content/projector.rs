//! Map raw CMS documents into [`Post`] view-models

use serde::Deserialize;
use thiserror::Error;

use super::post::{ContentSection, Post};
use super::richtext::{self, RichText};
use crate::cms::RawDocument;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("document {id} has no uid")]
    MissingUid { id: String },

    #[error("document {uid} has malformed data: {source}")]
    Data {
        uid: String,
        source: serde_json::Error,
    },
}

/// A text field authored either as key text or as rich text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    Rich(RichText),
}

impl TextField {
    fn into_string(field: Option<TextField>) -> String {
        match field {
            Some(TextField::Plain(s)) => s,
            Some(TextField::Rich(blocks)) => richtext::as_text(&blocks),
            None => String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PostFields {
    title: Option<TextField>,
    subtitle: Option<TextField>,
    author: Option<TextField>,
    banner: Option<Banner>,
    content: Option<Vec<SectionFields>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Banner {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SectionFields {
    heading: Option<TextField>,
    body: Option<RichText>,
}

/// Project a document into a post
///
/// Fields left out of the document (for instance by a `fetch` restriction on
/// listing queries) come back empty rather than failing.
pub fn project(doc: &RawDocument) -> Result<Post, ProjectError> {
    let uid = doc.uid.clone().ok_or_else(|| ProjectError::MissingUid {
        id: doc.id.clone(),
    })?;

    let fields: PostFields = if doc.data.is_null() {
        PostFields::default()
    } else {
        serde_json::from_value(doc.data.clone()).map_err(|source| ProjectError::Data {
            uid: uid.clone(),
            source,
        })?
    };

    let content = fields
        .content
        .unwrap_or_default()
        .into_iter()
        .map(|section| ContentSection {
            heading: TextField::into_string(section.heading),
            body: section.body.unwrap_or_default(),
        })
        .collect();

    Ok(Post {
        id: doc.id.clone(),
        uid,
        first_publication_date: doc.first_publication_date,
        last_publication_date: doc.last_publication_date,
        title: TextField::into_string(fields.title),
        subtitle: TextField::into_string(fields.subtitle),
        author: TextField::into_string(fields.author),
        banner_url: fields.banner.and_then(|b| b.url).unwrap_or_default(),
        content,
    })
}
