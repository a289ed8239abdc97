//! Generate the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Fetch every post and render the site, optionally against a preview ref
pub async fn run(blog: &Blog, preview_ref: Option<&str>) -> Result<usize> {
    let start = std::time::Instant::now();

    let source = blog.content_source()?;
    if let Some(reference) = preview_ref {
        tracing::info!("Rendering preview ref {}", reference);
    }

    let generator = Generator::new(blog, source.as_ref())?.with_preview(preview_ref);
    let count = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts in {:.2}s",
        count,
        duration.as_secs_f64()
    );

    Ok(count)
}
