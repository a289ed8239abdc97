//! In-memory content source
//!
//! Serves a fixed set of documents with the same query semantics the blog
//! relies on from the live API: `at` predicates, orderings with document id
//! as the tie-break, `after` anchoring, `fetch` projection and cursor paging.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering as CmpOrdering;
use std::fs;
use std::path::Path;
use url::Url;

use super::query::{FIRST_PUBLICATION_DATE, LAST_PUBLICATION_DATE};
use super::{CmsError, ContentSource, Direction, Predicate, Query, RawDocument, SearchResponse};

/// Page size used when a query does not ask for one
const DEFAULT_PAGE_SIZE: u32 = 20;

const CURSOR_BASE: &str = "memory://documents/search";

/// A document store held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<RawDocument>,
}

impl MemorySource {
    pub fn new(documents: Vec<RawDocument>) -> Self {
        Self { documents }
    }

    /// Load a JSON array of documents
    pub fn load(path: &Path) -> Result<Self, CmsError> {
        let content = fs::read_to_string(path).map_err(|source| CmsError::Fixtures {
            path: path.display().to_string(),
            source,
        })?;
        let documents: Vec<RawDocument> = serde_json::from_str(&content)?;
        Ok(Self::new(documents))
    }

    pub fn documents(&self) -> &[RawDocument] {
        &self.documents
    }

    fn search(&self, query: &Query, page: u32) -> Result<SearchResponse, CmsError> {
        let mut matched: Vec<&RawDocument> = self
            .documents
            .iter()
            .filter(|doc| query.predicates.iter().all(|p| matches(doc, p)))
            .collect();

        // Ties fall back to document id, walked in the primary direction
        let tie_direction = query
            .orderings
            .first()
            .map(|o| o.direction)
            .unwrap_or(Direction::Asc);
        matched.sort_by(|a, b| {
            query
                .orderings
                .iter()
                .map(|o| {
                    let ord = compare_field(a, b, &o.field);
                    match o.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                })
                .find(|ord| *ord != CmpOrdering::Equal)
                .unwrap_or_else(|| match tie_direction {
                    Direction::Asc => a.id.cmp(&b.id),
                    Direction::Desc => b.id.cmp(&a.id),
                })
        });

        if let Some(after) = &query.after {
            if let Some(pos) = matched.iter().position(|doc| &doc.id == after) {
                matched.drain(..=pos);
            }
        }

        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let total = matched.len() as u32;
        let total_pages = total.div_ceil(page_size);
        let start = (page.max(1) - 1)
            .checked_mul(page_size)
            .ok_or_else(|| CmsError::InvalidCursor(format!("page {} is out of range", page)))?
            as usize;

        let results: Vec<RawDocument> = matched
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .map(|doc| project_fields(doc, &query.fetch))
            .collect();

        let next_page = if page < total_pages {
            Some(cursor(query, page + 1)?)
        } else {
            None
        };
        let prev_page = if page > 1 {
            Some(cursor(query, page - 1)?)
        } else {
            None
        };

        Ok(SearchResponse {
            page,
            results_per_page: page_size,
            total_results_size: total,
            total_pages,
            next_page,
            prev_page,
            results,
        })
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn query(&self, query: &Query) -> Result<SearchResponse, CmsError> {
        self.search(query, 1)
    }

    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse, CmsError> {
        let (query, page) = parse_cursor(cursor)?;
        self.search(&query, page)
    }
}

fn matches(doc: &RawDocument, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::At { path, value } => match path.as_str() {
            "document.type" => &doc.doc_type == value,
            "document.id" => &doc.id == value,
            other => match other.strip_prefix("my.").and_then(|p| p.split_once('.')) {
                Some((doc_type, "uid")) => {
                    doc.doc_type == doc_type && doc.uid.as_deref() == Some(value.as_str())
                }
                Some((doc_type, field)) => {
                    doc.doc_type == doc_type
                        && doc.data.get(field).and_then(|v| v.as_str()) == Some(value.as_str())
                }
                None => false,
            },
        },
    }
}

/// Missing dates sort before any present date
fn compare_field(a: &RawDocument, b: &RawDocument, field: &str) -> CmpOrdering {
    fn date_cmp(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> CmpOrdering {
        a.cmp(&b)
    }

    match field {
        FIRST_PUBLICATION_DATE => date_cmp(a.first_publication_date, b.first_publication_date),
        LAST_PUBLICATION_DATE => date_cmp(a.last_publication_date, b.last_publication_date),
        "document.id" => a.id.cmp(&b.id),
        other => {
            let key = other.rsplit('.').next().unwrap_or(other);
            let a = a.data.get(key).and_then(|v| v.as_str());
            let b = b.data.get(key).and_then(|v| v.as_str());
            a.cmp(&b)
        }
    }
}

/// Keep only the `type.field` entries named in `fetch`
fn project_fields(doc: &RawDocument, fetch: &[String]) -> RawDocument {
    let mut doc = doc.clone();
    if fetch.is_empty() {
        return doc;
    }
    if let serde_json::Value::Object(data) = &mut doc.data {
        let doc_type = doc.doc_type.clone();
        data.retain(|key, _| {
            fetch.iter().any(|f| {
                f.split_once('.')
                    .map(|(t, name)| t == doc_type && name == key)
                    .unwrap_or(false)
            })
        });
    }
    doc
}

fn cursor(query: &Query, page: u32) -> Result<String, CmsError> {
    let mut url = Url::parse(CURSOR_BASE)?;
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("query", &serde_json::to_string(query)?);
    Ok(url.to_string())
}

fn parse_cursor(cursor: &str) -> Result<(Query, u32), CmsError> {
    let invalid = || CmsError::InvalidCursor(cursor.to_string());
    let url = Url::parse(cursor).map_err(|_| invalid())?;

    let mut page = None;
    let mut query = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "page" => page = value.parse::<u32>().ok(),
            "query" => query = serde_json::from_str::<Query>(&value).ok(),
            _ => {}
        }
    }

    match (query, page) {
        (Some(query), Some(page)) => Ok((query, page)),
        _ => Err(invalid()),
    }
}
