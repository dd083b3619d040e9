//! Termbase CLI - serve and inspect the terminology graph

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use termbase::GraphStore;
use termbase::config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "termbase")]
#[command(version = "0.1.0")]
#[command(about = "Multilingual terminology graph backend")]
#[command(long_about = r#"
Termbase stores a thesaurus hierarchy (classes, subclasses, terms) with
translations and synonyms in an embedded graph, and serves it over HTTP.

Example usage:
  termbase init
  termbase serve --port 8000
  termbase stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default termbase.toml config
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Serve the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show statistics about the stored graph
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Delete all nodes and edges
    Wipe {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Skip the confirmation flag check
        #[arg(long)]
        yes: bool,
    },
}

/// Database path resolution: CLI flag, then config file, then the default
/// location under the working directory.
fn resolve_database(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(cfg) = config::load_config(None)? {
        if let Some(db) = cfg.database {
            return Ok(PathBuf::from(db));
        }
    }
    Ok(config::default_database_path_in(Path::new(".")))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { force } => {
            let path = config::default_config_path();
            let cfg = config::TermbaseConfig {
                database: Some(
                    config::default_database_path_in(Path::new("."))
                        .display()
                        .to_string(),
                ),
                port: Some(8000),
            };
            config::write_config(&path, &cfg, force)?;
            println!("📝 Wrote {}", path.display());
        }

        Commands::Serve { port, database } => {
            let database = resolve_database(database)?;
            config::ensure_db_dir(&database)?;
            tracing::info!("Serving database {:?} on port {}", database, port);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(termbase::server::start_server(port, database))?;
        }

        Commands::Stats { database } => {
            let database = resolve_database(database)?;
            let store = GraphStore::open(&database)?;
            let stats = store.stats()?;
            println!("{}", stats);
        }

        Commands::Wipe { database, yes } => {
            if !yes {
                anyhow::bail!("refusing to wipe without --yes");
            }
            let database = resolve_database(database)?;
            let store = GraphStore::open(&database)?;
            store.wipe()?;
            println!("🗑️  All data deleted from {:?}", database);
        }
    }

    Ok(())
}
