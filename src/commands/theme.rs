//! Show or toggle the stored theme preference

use anyhow::Result;

use crate::Blog;

/// Print the effective preference and the toggle's label
pub fn show(blog: &Blog) -> Result<()> {
    let controller = blog.theme_controller();
    println!("Theme: {}", controller.current());
    println!("Toggle: {}", controller.label());
    Ok(())
}

/// Flip the stored preference
///
/// There is no widget frame outside a browser, so no message is posted.
pub fn toggle(blog: &Blog) -> Result<()> {
    let controller = blog.theme_controller();
    match controller.toggle(None)? {
        Some(theme) => println!("Theme switched to {}", theme),
        None => anyhow::bail!("Theme storage unavailable at {:?}", blog.state_dir),
    }
    Ok(())
}
