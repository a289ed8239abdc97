//! List posts

use anyhow::Result;

use crate::helpers::Helpers;
use crate::listing;
use crate::Blog;

/// Walk every listing page and print the posts, newest first
pub async fn run(blog: &Blog) -> Result<()> {
    let source = blog.content_source()?;
    let first = listing::first_page(source.as_ref(), &blog.config.cms, None).await?;
    let state = listing::collect_all(source.as_ref(), first).await?;

    let helpers = Helpers::new(blog.config.clone());
    println!("Posts ({}):", state.posts().len());
    for post in state.posts() {
        println!(
            "  {} - {} [{}]",
            helpers.listing_date(post.first_publication_date.as_ref()),
            post.title,
            post.uid
        );
    }

    Ok(())
}
