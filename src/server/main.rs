//! Partner coverage HTTP server.
//!
//! Seeds an in-memory partner store from a `pdvs.json` file and serves
//! partner CRUD plus coverage checks.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pdvs::config::Config;
use pdvs::seed::seed_from_file;
use pdvs::store::{MemoryStore, PartnerStore};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Partner coverage server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Seed file with partner documents (overrides config)
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("PDVs Coverage Server");

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(seed) = args.seed {
        config.seed.file = Some(seed);
    }

    let store = Arc::new(MemoryStore::new());
    if let Some(seed_file) = &config.seed.file {
        let report = seed_from_file(store.as_ref(), seed_file)?;
        info!(
            "Store ready with {} partners ({} seed entries skipped)",
            store.count(),
            report.skipped
        );
    } else {
        info!("No seed file configured, starting with an empty store");
    }

    let app = pdvs::api::router(store);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
