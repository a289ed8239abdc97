//! Errors surfaced by listing and navigation lookups

use thiserror::Error;

use crate::cms::CmsError;
use crate::content::ProjectError;

/// A fetch either failed at the CMS or returned a document we cannot show
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Cms(#[from] CmsError),

    #[error(transparent)]
    Project(#[from] ProjectError),
}
