//! Command-line interface for taskboard
//!
//! Defined with clap derive macros: a thin wrapper that loads configuration,
//! opens the store, and runs the HTTP server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::store::TaskStore;

/// taskboard - personal task board API
///
/// Serves a CRUD API over a file-backed task store: three-column status
/// lifecycle, priority tiers, due dates, and filtered listing.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./taskboard.toml)
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long, env = "TASKBOARD_BIND")]
        bind: Option<String>,

        /// Directory holding the task snapshot (overrides the config file)
        #[arg(long, env = "TASKBOARD_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;
        match self.command {
            Commands::Serve { bind, data_dir } => serve(config, bind, data_dir).await,
        }
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Ok(Config::load_from_dir(std::path::Path::new("."))),
        }
    }
}

async fn serve(mut config: Config, bind: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(data_dir) = data_dir {
        config.store.data_dir = data_dir;
    }

    let addr = config.bind_addr()?;
    let store =
        TaskStore::new(&config.store.data_dir).with_lock_timeout(config.store.lock_timeout_ms);
    let app = api::router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, data_dir = %config.store.data_dir.display(), "taskboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
