//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Remove generated output; the theme preference in the state dir is kept
pub fn run(blog: &Blog) -> Result<()> {
    if blog.public_dir.exists() {
        fs::remove_dir_all(&blog.public_dir)?;
        tracing::info!("Deleted: {:?}", blog.public_dir);
    }

    Ok(())
}
