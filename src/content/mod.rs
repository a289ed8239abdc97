//! Content module - posts, rich text, and reading time

mod post;
mod projector;
pub mod reading;
pub mod richtext;

pub use post::{ContentSection, Post};
pub use projector::{project, ProjectError};
pub use richtext::{RichText, RichTextBlock};
