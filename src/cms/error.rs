//! Content client errors

use thiserror::Error;

/// Failures talking to the headless CMS
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("endpoint cannot be used as a base URL: {0}")]
    InvalidEndpoint(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CMS API did not advertise a master ref")]
    MissingMasterRef,

    #[error("no {doc_type} document with uid {uid:?}")]
    NotFound { doc_type: String, uid: String },

    #[error("invalid page cursor: {0}")]
    InvalidCursor(String),

    #[error("failed to read fixtures {path}: {source}")]
    Fixtures {
        path: String,
        source: std::io::Error,
    },
}
