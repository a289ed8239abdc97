//! CLI entry point for spacetraveling

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(version)]
#[command(about = "A static blog generator backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// CMS access token, overrides `cms.access_token`
    #[arg(long, global = true, env = "PRISMIC_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Render against a content-preview reference
        #[arg(long)]
        preview_ref: Option<String>,
    },

    /// List every post
    List,

    /// Show a post with its reading time and neighbours
    Show {
        /// Post uid
        uid: String,
    },

    /// Show or toggle the light/dark preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current preference
    Show,
    /// Switch between light and dark
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacetraveling=debug,info"
    } else {
        "spacetraveling=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot read current directory")?,
    };

    let load = || -> Result<spacetraveling::Blog> {
        let mut blog = spacetraveling::Blog::new(&base_dir)?;
        if let Some(token) = &cli.access_token {
            blog.config.cms.access_token = Some(token.clone());
        }
        Ok(blog)
    };

    match cli.command {
        Commands::Init { ref folder } => {
            let target_dir = if folder.is_absolute() {
                folder.clone()
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            spacetraveling::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::Generate { ref preview_ref } => {
            let blog = load()?;
            tracing::info!("Generating static files...");
            blog.generate(preview_ref.as_deref()).await?;
            println!("Generated successfully!");
        }

        Commands::List => {
            let blog = load()?;
            spacetraveling::commands::list::run(&blog).await?;
        }

        Commands::Show { ref uid } => {
            let blog = load()?;
            spacetraveling::commands::show::run(&blog, uid).await?;
        }

        Commands::Theme { ref action } => {
            let blog = load()?;
            match action {
                Some(ThemeAction::Toggle) => spacetraveling::commands::theme::toggle(&blog)?,
                Some(ThemeAction::Show) | None => spacetraveling::commands::theme::show(&blog)?,
            }
        }

        Commands::Clean => {
            let blog = load()?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("spacetraveling version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
