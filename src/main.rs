//! CLI entry point for blog-index

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-index")]
#[command(version)]
#[command(about = "Index a Markdown blog by date, tag and category and render it", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files
    #[command(aliases = ["g", "generate"])]
    Build {
        /// Render posts dated in the future
        #[arg(long)]
        future: bool,
    },

    /// Report malformed posts and output path conflicts
    Check,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name (without extension) for the new post
        #[arg(short, long)]
        path: Option<String>,

        /// Mark the new post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag, category, archive)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Remove the public folder
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_index=debug,info"
    } else {
        "blog_index=info"
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
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let site = blog_index::Site::new(&base_dir)?;

    match cli.command {
        Commands::Build { future } => {
            tracing::info!("Generating static files...");
            blog_index::commands::generate::run(&site, future)?;
            println!("Generated successfully!");
        }

        Commands::Check => {
            blog_index::commands::check::run(&site)?;
        }

        Commands::New { title, path, draft } => {
            let file = blog_index::commands::new::create_post(&site, &title, draft, path.as_deref())?;
            println!("Created: {:?}", file);
        }

        Commands::List { r#type } => {
            blog_index::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            blog_index::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
