use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;
use wikisearch_core::{build_from_path, GrowableHashIndex, IndexConfig};

#[derive(Parser)]
struct Args {
    /// Corpus file to index at startup
    #[arg(long)]
    input: PathBuf,
    /// JSON index config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Starting bucket count of the hash table
    #[arg(long)]
    capacity: Option<usize>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => IndexConfig::load(path)?,
        None => IndexConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        cfg.initial_capacity = capacity;
    }
    let index = match build_from_path(&args.input, &cfg) {
        Ok(index) => index,
        Err(e) if e.is_source_unavailable() => {
            tracing::warn!(error = %e, "serving an empty index");
            GrowableHashIndex::with_config(&cfg)
        }
        Err(e) => return Err(e.into()),
    };
    let app: Router = build_app(index);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
