//! CLI entry point for creditor-academy

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "creditor-academy")]
#[command(version)]
#[command(about = "Markdown content loader and projects API for the Creditor Academy site", long_about = None)]
struct Cli {
    /// Set the site root (defaults to current directory)
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new content file
    New {
        /// Title of the new item
        title: String,

        /// Slug to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List content slugs
    #[command(alias = "ls")]
    List,

    /// Print one content record as JSON
    Show {
        /// Slug, with or without the file extension
        slug: String,

        /// Comma separated fields (defaults to slug,content,metadata)
        #[arg(short, long)]
        fields: Option<String>,
    },

    /// Print or write every content record as a JSON array
    Export {
        /// Comma separated fields (defaults to list_fields from _config.yml)
        #[arg(short, long)]
        fields: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the JSON API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,

        /// Do not watch the content directory for changes
        #[arg(long)]
        no_watch: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "creditor_academy=debug,tower_http=debug,info"
    } else {
        "creditor_academy=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            creditor_academy::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let academy = creditor_academy::Academy::new(&base_dir)?;
            let path =
                creditor_academy::commands::new::create_content(&academy, &title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List => {
            let academy = creditor_academy::Academy::new(&base_dir)?;
            creditor_academy::commands::list::run(&academy)?;
        }

        Commands::Show { slug, fields } => {
            let academy = creditor_academy::Academy::new(&base_dir)?;
            creditor_academy::commands::show::run(&academy, &slug, fields.as_deref())?;
        }

        Commands::Export { fields, output } => {
            let academy = creditor_academy::Academy::new(&base_dir)?;
            creditor_academy::commands::export::run(
                &academy,
                fields.as_deref(),
                output.as_deref(),
            )?;
        }

        Commands::Serve { port, ip, no_watch } => {
            let academy = creditor_academy::Academy::new(&base_dir)?;
            let server = &academy.config.server;
            let ip = ip.unwrap_or_else(|| server.ip.clone());
            let port = port.unwrap_or(server.port);
            let watch = server.watch && !no_watch;

            creditor_academy::server::start(&academy, &ip, port, watch).await?;
        }

        Commands::Version => {
            println!("creditor-academy version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
