//! Post listing and "load more" aggregation
//!
//! [`AggregatorState`] holds every post received so far plus the cursor of the
//! next page. Merging is pure: the state never fetches anything itself, it
//! only absorbs pages handed to it. The async helpers below do the fetching
//! and leave the state untouched when a fetch fails.
//!
//! Pages are appended as they arrive, without deduplicating by uid. The CMS
//! cursor is trusted not to hand back overlapping pages.

use serde::Serialize;

use crate::cms::query::FIRST_PUBLICATION_DATE;
use crate::cms::{ContentSource, Ordering, Query, SearchResponse};
use crate::config::CmsConfig;
use crate::content::{project, Post, ProjectError};
use crate::error::Error;

/// One page of listing results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingPage {
    /// Cursor of the following page; `None` on the last page
    pub next_page: Option<String>,
    pub results: Vec<Post>,
}

impl ListingPage {
    /// Project every document of a search response
    pub fn from_response(response: SearchResponse) -> Result<Self, ProjectError> {
        let results = response
            .results
            .iter()
            .map(project)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            next_page: response.next_page,
            results,
        })
    }
}

/// Posts accumulated so far and the cursor to continue from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatorState {
    posts: Vec<Post>,
    cursor: Option<String>,
}

impl AggregatorState {
    pub fn initialize(page: ListingPage) -> Self {
        Self {
            posts: page.results,
            cursor: page.next_page,
        }
    }

    /// Append a page's results and take over its cursor
    pub fn append_page(mut self, page: ListingPage) -> Self {
        self.posts.extend(page.results);
        self.cursor = page.next_page;
        self
    }

    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }
}

/// The listing query: newest first, only the fields a listing card shows
pub fn listing_query(config: &CmsConfig, reference: Option<&str>) -> Query {
    let doc_type = &config.document_type;
    Query::documents(doc_type)
        .fetch(
            ["title", "subtitle", "author"]
                .iter()
                .map(|field| format!("{}.{}", doc_type, field)),
        )
        .page_size(config.page_size)
        .order_by(Ordering::desc(FIRST_PUBLICATION_DATE))
        .reference(reference)
}

/// Fetch the first listing page
pub async fn first_page(
    source: &dyn ContentSource,
    config: &CmsConfig,
    reference: Option<&str>,
) -> Result<ListingPage, Error> {
    let response = source.query(&listing_query(config, reference)).await?;
    Ok(ListingPage::from_response(response)?)
}

/// Fetch the page after the state's cursor, `None` when there is no more
pub async fn fetch_next_page(
    state: &AggregatorState,
    source: &dyn ContentSource,
) -> Result<Option<ListingPage>, Error> {
    let Some(cursor) = state.cursor() else {
        return Ok(None);
    };
    let response = source.fetch_page(cursor).await?;
    Ok(Some(ListingPage::from_response(response)?))
}

/// Follow cursors from `first` until the listing is exhausted
pub async fn collect_all(
    source: &dyn ContentSource,
    first: ListingPage,
) -> Result<AggregatorState, Error> {
    let mut state = AggregatorState::initialize(first);
    while let Some(page) = fetch_next_page(&state, source).await? {
        tracing::debug!(
            "Loaded {} more posts (more: {})",
            page.results.len(),
            page.next_page.is_some()
        );
        state = state.append_page(page);
    }
    Ok(state)
}
