//! # Parts CLI (`parts`)
//!
//! ## Usage
//!
//! ```bash
//! parts --config ./config/parts.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `parts init` | Create the SQLite database and run schema migrations |
//! | `parts serve` | Start the HTTP API |
//! | `parts get <id>` | Print one part |
//! | `parts list` | Print parts, paginated |
//! | `parts words` | Print the most common description words |

use clap::{Parser, Subcommand};
use parts_unlimited::{commands, config, server};
use std::path::PathBuf;

/// Parts CLI: manage and serve the parts database.
#[derive(Parser)]
#[command(name = "parts", about = "Parts Unlimited: a CRUD API for parts records", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/parts.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `part` table. Idempotent.
    Init,

    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind`, applies migrations first, and shuts down
    /// gracefully on Ctrl-C.
    Serve,

    /// Print a part by id.
    Get {
        /// Part id.
        id: i64,
    },

    /// List parts in id order.
    List {
        /// Number of parts to skip.
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Maximum number of parts to print.
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Print the five most common words across part descriptions.
    Words,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    tracing_subscriber::fmt()
        .with_max_level(cfg.logging.tracing_level()?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => commands::run_init(&cfg).await?,
        Commands::Serve => server::run_server(&cfg).await?,
        Commands::Get { id } => commands::run_get(&cfg, id).await?,
        Commands::List { skip, limit } => commands::run_list(&cfg, skip, limit).await?,
        Commands::Words => commands::run_words(&cfg).await?,
    }

    Ok(())
}
