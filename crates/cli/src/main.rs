//! Choco Shelf CLI - store maintenance and snapshot tools.
//!
//! # Usage
//!
//! ```bash
//! # Create and seed the store file
//! choco-cli init
//!
//! # Export every key to a snapshot file
//! choco-cli export -o backup.json
//!
//! # Restore a snapshot
//! choco-cli import backup.json
//!
//! # Show the order aggregate
//! choco-cli stats
//!
//! # Show stored bytes per key
//! choco-cli size
//!
//! # Delete every key in the namespace
//! choco-cli clear --yes
//! ```
//!
//! # Environment Variables
//!
//! - `CHOCO_SHELF_PATH` - Path of the store file (default: `./choco-shelf.json`)
//! - `CHOCO_SHELF_NAMESPACE` - Key namespace (default: `choco_shop`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "choco-cli")]
#[command(author, version, about = "Choco Shelf CLI tools")]
struct Cli {
    /// Path of the store file (overrides `CHOCO_SHELF_PATH`)
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Key namespace (overrides `CHOCO_SHELF_NAMESPACE`)
    #[arg(long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the store file and seed defaults
    Init,
    /// Export every key under the namespace to a snapshot
    Export {
        /// Write the snapshot to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a previously exported snapshot
    Import {
        /// Snapshot file to restore
        file: PathBuf,
    },
    /// Delete every key under the namespace
    Clear {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
    /// Show the order aggregate
    Stats,
    /// Show stored bytes per key
    Size,
}

fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let target = commands::StoreTarget::resolve(cli.path, cli.namespace);

    match cli.command {
        Commands::Init => commands::maintenance::init(&target),
        Commands::Export { output } => commands::snapshot::export(&target, output.as_deref()),
        Commands::Import { file } => commands::snapshot::import(&target, &file),
        Commands::Clear { yes } => commands::maintenance::clear(&target, yes),
        Commands::Stats => commands::report::stats(&target),
        Commands::Size => commands::report::size(&target),
    }
}
