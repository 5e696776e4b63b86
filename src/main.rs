//! `partyq` — show and manipulate a shared play queue from the terminal.
//!
//! One-shot commands forward to the server's HTTP endpoints and print the
//! result; `np` opens a live view fed by the server's push channel.

mod commands;
mod config;
mod live;
mod server_api;
mod song;
mod store;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "partyq", version, about = "show and manipulate the play queue")]
struct Args {
    /// Config file (TOML); defaults to ~/.config/partyq/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the queue (default action)
    Queue,
    /// Search all backends for songs matching the given terms
    Search { terms: Vec<String> },
    /// Append a song from the last search results; all of them without an id
    Add { id: Option<usize> },
    /// Delete the song at the given queue position
    Del {
        #[arg(default_value_t = 0)]
        id: usize,
    },
    /// Skip forward (negative counts go back)
    Skip {
        #[arg(default_value_t = 0, allow_hyphen_values = true)]
        count: i64,
    },
    /// List playlists, or print the contents of one
    Playlists { id: Option<usize> },
    /// Live now-playing view (q or Ctrl-C to quit)
    Np,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::resolve(args.config.as_deref())?;

    match args.command.unwrap_or(Command::Queue) {
        Command::Queue => commands::show_queue(&cfg),
        Command::Search { terms } => {
            let store = store::Store::open(cfg.data_dir.clone())?;
            commands::search(&cfg, &store, &terms.join(" "))
        }
        Command::Add { id } => {
            let store = store::Store::open(cfg.data_dir.clone())?;
            commands::add(&cfg, &store, id)
        }
        Command::Del { id } => commands::delete(&cfg, id),
        Command::Skip { count } => commands::skip(&cfg, count),
        Command::Playlists { id } => {
            let store = store::Store::open(cfg.data_dir.clone())?;
            commands::playlists(&store, id)
        }
        Command::Np => live::run_live(&cfg),
    }
}
