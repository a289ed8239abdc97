//! Previous / next post lookup
//!
//! Neighbours are found with two single-result searches anchored `after` the
//! current document: one walking publication dates backwards (the previous,
//! older post) and one walking forwards (the next, newer post). Posts sharing
//! a timestamp are ordered by whatever identity ordering the CMS applies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cms::query::FIRST_PUBLICATION_DATE;
use crate::cms::{ContentSource, Ordering, Query, RawDocument};
use crate::content::{project, ProjectError};
use crate::error::Error;

/// Minimal projection used for prev/next links
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    pub uid: String,
    pub title: String,
}

impl NavigationTarget {
    pub fn path(&self) -> String {
        format!("/post/{}/", self.uid)
    }

    fn from_document(doc: &RawDocument) -> Result<Self, ProjectError> {
        let post = project(doc)?;
        Ok(Self {
            uid: post.uid,
            title: post.title,
        })
    }
}

/// Chronological neighbours of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Older post, `None` for the first post ever published
    pub prev: Option<NavigationTarget>,
    /// Newer post, `None` for the latest post
    pub next: Option<NavigationTarget>,
}

/// Resolves neighbours of posts of one document type
pub struct NavigationResolver<'a> {
    source: &'a dyn ContentSource,
    document_type: String,
    reference: Option<String>,
}

impl<'a> NavigationResolver<'a> {
    pub fn new(source: &'a dyn ContentSource, document_type: &str) -> Self {
        Self {
            source,
            document_type: document_type.to_string(),
            reference: None,
        }
    }

    /// Run lookups against a preview reference instead of the master ref
    pub fn with_reference(mut self, reference: Option<&str>) -> Self {
        self.reference = reference.map(str::to_string);
        self
    }

    /// The single-result search for the neighbour in `ordering`'s direction
    pub fn neighbour_query(&self, current_id: &str, ordering: Ordering) -> Query {
        Query::documents(&self.document_type)
            .fetch([format!("{}.title", self.document_type)])
            .page_size(1)
            .order_by(ordering)
            .after(current_id)
            .reference(self.reference.as_deref())
    }

    /// Find the posts published just before and just after `current_id`
    ///
    /// A draft without a publication date still resolves; whatever the CMS
    /// returns for its anchor is used as-is.
    pub async fn resolve(
        &self,
        current_id: &str,
        published: Option<DateTime<Utc>>,
    ) -> Result<Navigation, Error> {
        tracing::debug!(
            "Resolving navigation for {} (published: {:?})",
            current_id,
            published
        );

        let prev_query = self.neighbour_query(current_id, Ordering::desc(FIRST_PUBLICATION_DATE));
        let next_query = self.neighbour_query(current_id, Ordering::asc(FIRST_PUBLICATION_DATE));

        let (prev, next) = tokio::try_join!(
            self.source.query(&prev_query),
            self.source.query(&next_query)
        )?;

        Ok(Navigation {
            prev: first_target(prev.results)?,
            next: first_target(next.results)?,
        })
    }
}

fn first_target(results: Vec<RawDocument>) -> Result<Option<NavigationTarget>, ProjectError> {
    results
        .first()
        .map(NavigationTarget::from_document)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::MemorySource;
    use serde_json::json;

    fn doc(id: &str, uid: &str, published: Option<&str>) -> RawDocument {
        serde_json::from_value(json!({
            "id": id,
            "uid": uid,
            "type": "posts",
            "first_publication_date": published,
            "last_publication_date": published,
            "data": {"title": format!("Title of {}", uid), "content": []}
        }))
        .unwrap()
    }

    fn source() -> MemorySource {
        MemorySource::new(vec![
            doc("id-2", "middle", Some("2021-02-01T00:00:00+0000")),
            doc("id-3", "latest", Some("2021-03-01T00:00:00+0000")),
            doc("id-1", "earliest", Some("2021-01-01T00:00:00+0000")),
        ])
    }

    fn target(uid: &str) -> Option<NavigationTarget> {
        Some(NavigationTarget {
            uid: uid.to_string(),
            title: format!("Title of {}", uid),
        })
    }

    #[tokio::test]
    async fn test_earliest_post_has_no_prev() {
        let source = source();
        let resolver = NavigationResolver::new(&source, "posts");
        let nav = resolver.resolve("id-1", None).await.unwrap();
        assert_eq!(nav.prev, None);
        assert_eq!(nav.next, target("middle"));
    }

    #[tokio::test]
    async fn test_middle_and_latest() {
        let source = source();
        let resolver = NavigationResolver::new(&source, "posts");

        let nav = resolver.resolve("id-2", None).await.unwrap();
        assert_eq!(nav.prev, target("earliest"));
        assert_eq!(nav.next, target("latest"));

        let nav = resolver.resolve("id-3", None).await.unwrap();
        assert_eq!(nav.prev, target("middle"));
        assert_eq!(nav.next, None);
    }

    #[tokio::test]
    async fn test_single_post_has_no_neighbours() {
        let source = MemorySource::new(vec![doc("only", "only", None)]);
        let nav = NavigationResolver::new(&source, "posts")
            .resolve("only", None)
            .await
            .unwrap();
        assert_eq!(nav, Navigation::default());
    }

    #[tokio::test]
    async fn test_same_timestamp_falls_back_to_id_order() {
        let stamp = Some("2021-01-01T00:00:00+0000");
        let source = MemorySource::new(vec![doc("b", "second", stamp), doc("a", "first", stamp)]);
        let resolver = NavigationResolver::new(&source, "posts");

        let nav = resolver.resolve("a", None).await.unwrap();
        assert_eq!(nav.prev, None);
        assert_eq!(nav.next, target("second"));

        let nav = resolver.resolve("b", None).await.unwrap();
        assert_eq!(nav.prev, target("first"));
        assert_eq!(nav.next, None);
    }

    #[tokio::test]
    async fn test_undated_drafts_sort_before_published_posts() {
        let source = MemorySource::new(vec![
            doc("id-2", "middle", Some("2021-02-01T00:00:00+0000")),
            doc("draft", "draft", None),
            doc("id-1", "earliest", Some("2021-01-01T00:00:00+0000")),
        ]);
        let resolver = NavigationResolver::new(&source, "posts");

        let nav = resolver.resolve("draft", None).await.unwrap();
        assert_eq!(nav.prev, None);
        assert_eq!(nav.next, target("earliest"));

        let published = source.documents()[2].first_publication_date;
        let nav = resolver.resolve("id-1", published).await.unwrap();
        assert_eq!(nav.prev, target("draft"));
        assert_eq!(nav.next, target("middle"));
    }

    #[test]
    fn test_neighbour_query_shape() {
        let source = MemorySource::default();
        let resolver = NavigationResolver::new(&source, "posts").with_reference(Some("preview"));
        let query = resolver.neighbour_query("id-9", Ordering::desc(FIRST_PUBLICATION_DATE));
        assert_eq!(query.page_size, Some(1));
        assert_eq!(query.after.as_deref(), Some("id-9"));
        assert_eq!(query.reference.as_deref(), Some("preview"));
        assert_eq!(
            query.orderings_expr().as_deref(),
            Some("[document.first_publication_date desc]")
        );
    }
}
