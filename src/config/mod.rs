//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::CommentsConfig;
pub use site::SiteConfig;
pub use site::ThemeConfig;
