//! Content client for the headless CMS
//!
//! [`ContentSource`] is the seam between the blog and wherever documents come
//! from: [`PrismicClient`] talks to the live REST API, [`MemorySource`] serves
//! a fixed document set (fixtures files and tests).

mod document;
mod error;
mod memory;
mod prismic;
pub mod query;

pub use document::{parse_cms_date, ApiInfo, ApiRef, RawDocument, SearchResponse};
pub use error::CmsError;
pub use memory::MemorySource;
pub use prismic::PrismicClient;
pub use query::{Direction, Ordering, Predicate, Query};

use async_trait::async_trait;
use std::path::Path;

use crate::config::CmsConfig;

/// Something that answers document searches
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run a search and return one page of raw documents
    async fn query(&self, query: &Query) -> Result<SearchResponse, CmsError>;

    /// Follow an opaque `next_page` cursor
    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse, CmsError>;

    /// Fetch a single document by its uid
    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        reference: Option<&str>,
    ) -> Result<RawDocument, CmsError> {
        let query = Query {
            predicates: vec![Predicate::uid(doc_type, uid)],
            page_size: Some(1),
            ..Query::default()
        }
        .reference(reference);

        self.query(&query)
            .await?
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }
}

/// Build the content source described by the configuration
///
/// A relative `fixtures` path is resolved against `base_dir`.
pub fn from_config(
    config: &CmsConfig,
    base_dir: &Path,
) -> Result<Box<dyn ContentSource>, CmsError> {
    match &config.fixtures {
        Some(path) => {
            let path = base_dir.join(path);
            tracing::info!("Reading documents from fixtures {:?}", path);
            Ok(Box::new(MemorySource::load(&path)?))
        }
        None => {
            tracing::debug!("Using CMS endpoint {}", config.endpoint);
            Ok(Box::new(PrismicClient::new(
                &config.endpoint,
                config.access_token.clone(),
            )?))
        }
    }
}
