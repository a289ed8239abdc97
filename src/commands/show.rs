//! Show a single post

use anyhow::Result;

use crate::content::project;
use crate::helpers::Helpers;
use crate::navigation::NavigationResolver;
use crate::Blog;

/// Print a post's metadata, reading time and neighbours
pub async fn run(blog: &Blog, uid: &str) -> Result<()> {
    let source = blog.content_source()?;
    let doc_type = &blog.config.cms.document_type;

    let doc = source.get_by_uid(doc_type, uid, None).await?;
    let post = project(&doc)?;
    let navigation = NavigationResolver::new(source.as_ref(), doc_type)
        .resolve(&post.id, post.first_publication_date)
        .await?;

    let helpers = Helpers::new(blog.config.clone());
    println!("{}", post.title);
    if !post.subtitle.is_empty() {
        println!("  {}", post.subtitle);
    }
    println!(
        "  {} | {} | {} min",
        helpers.post_date(post.first_publication_date.as_ref()),
        post.author,
        post.reading_time()
    );
    let updated = helpers.updated(post.last_publication_date.as_ref());
    if !updated.is_empty() {
        println!("  {}", updated);
    }
    println!("  Sections: {}", post.content.len());

    match &navigation.prev {
        Some(prev) => println!("  Post anterior: {} ({})", prev.title, prev.path()),
        None => println!("  Post anterior: -"),
    }
    match &navigation.next {
        Some(next) => println!("  Próximo post: {} ({})", next.title, next.path()),
        None => println!("  Próximo post: -"),
    }

    Ok(())
}
