//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Blog;

const DEFAULT_CONFIG: &str = r#"# SpaceTraveling Configuration

# Site
title: SpaceTraveling
language: pt-BR
timezone: America/Sao_Paulo

# Directory
public_dir: public
state_dir: .spacetraveling

# Date / Time format (date-fns tokens)
date_format: dd LLL yyyy
post_date_format: dd MMM yyyy
updated_format: "'* editado em' dd MMM yyyy 'às' HH':'mm"

# Headless CMS
cms:
  endpoint: https://spacetraveling.cdn.prismic.io/api/v2
  document_type: posts
  page_size: 1
  # access_token: set here or through PRISMIC_ACCESS_TOKEN
  # fixtures: posts.json

# utterances comments
comments:
  enable: true
  repo: ''
  issue_term: pathname
  label: comments
  script_src: https://utteranc.es/client.js
  theme: github-light
  dark_theme: github-dark

# Theme
theme:
  default: light
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;
    tracing::info!("Created {:?}", config_path);

    Ok(())
}

/// Run the init command with an existing Blog instance
pub fn run(blog: &Blog) -> Result<()> {
    init_site(&blog.base_dir)
}
