//! Query model for the document search API
//!
//! Predicates and orderings are rendered into the bracketed expression
//! syntax the API accepts on the `q` and `orderings` parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field holding a document's first publication timestamp
pub const FIRST_PUBLICATION_DATE: &str = "document.first_publication_date";

/// Field holding a document's most recent publication timestamp
pub const LAST_PUBLICATION_DATE: &str = "document.last_publication_date";

/// A filter on documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// Exact match of a field path against a value
    At { path: String, value: String },
}

impl Predicate {
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::At {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Match every document of a custom type
    pub fn document_type(doc_type: &str) -> Self {
        Self::at("document.type", doc_type)
    }

    /// Match the document of `doc_type` carrying `uid`
    pub fn uid(doc_type: &str, uid: &str) -> Self {
        Self::at(format!("my.{}.uid", doc_type), uid)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::At { path, value } => {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[at({}, \"{}\")]", path, escaped)
            }
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

/// A single ordering term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "{}", self.field),
            Direction::Desc => write!(f, "{} desc", self.field),
        }
    }
}

/// A document search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub predicates: Vec<Predicate>,
    /// Restrict `data` to these `type.field` names
    pub fetch: Vec<String>,
    pub page_size: Option<u32>,
    pub orderings: Vec<Ordering>,
    /// Only return documents ordered after this document id
    pub after: Option<String>,
    /// Content release or preview reference; `None` means the master ref
    pub reference: Option<String>,
}

impl Query {
    /// Search every document of a custom type
    pub fn documents(doc_type: &str) -> Self {
        Self {
            predicates: vec![Predicate::document_type(doc_type)],
            ..Self::default()
        }
    }

    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    pub fn reference(mut self, reference: Option<&str>) -> Self {
        self.reference = reference.map(str::to_string);
        self
    }

    /// The `q` parameter, e.g. `[[at(document.type, "posts")]]`
    pub fn predicate_expr(&self) -> String {
        let inner: String = self.predicates.iter().map(|p| p.to_string()).collect();
        format!("[{}]", inner)
    }

    /// The `orderings` parameter, `None` when no ordering was requested
    pub fn orderings_expr(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        let terms: Vec<String> = self.orderings.iter().map(|o| o.to_string()).collect();
        Some(format!("[{}]", terms.join(",")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_expr() {
        let query = Query::documents("posts");
        assert_eq!(query.predicate_expr(), r#"[[at(document.type, "posts")]]"#);

        let query = Query {
            predicates: vec![
                Predicate::document_type("posts"),
                Predicate::uid("posts", "say \"hi\""),
            ],
            ..Query::default()
        };
        assert_eq!(
            query.predicate_expr(),
            r#"[[at(document.type, "posts")][at(my.posts.uid, "say \"hi\"")]]"#
        );
    }

    #[test]
    fn test_orderings_expr() {
        assert_eq!(Query::documents("posts").orderings_expr(), None);

        let query = Query::documents("posts").order_by(Ordering::desc(FIRST_PUBLICATION_DATE));
        assert_eq!(
            query.orderings_expr().as_deref(),
            Some("[document.first_publication_date desc]")
        );

        let query = Query::documents("posts")
            .order_by(Ordering::asc(FIRST_PUBLICATION_DATE))
            .order_by(Ordering::desc("my.posts.title"));
        assert_eq!(
            query.orderings_expr().as_deref(),
            Some("[document.first_publication_date,my.posts.title desc]")
        );
    }

    #[test]
    fn test_builder() {
        let query = Query::documents("posts")
            .fetch(["posts.title", "posts.author"])
            .page_size(1)
            .after("XyZ")
            .reference(Some("preview-ref"));
        assert_eq!(query.fetch, vec!["posts.title", "posts.author"]);
        assert_eq!(query.page_size, Some(1));
        assert_eq!(query.after.as_deref(), Some("XyZ"));
        assert_eq!(query.reference.as_deref(), Some("preview-ref"));
    }
}
