use anyhow::Result;
use axum::Router;
use clap::Parser;
use engine::{corpus, Engine, EngineConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Corpus file or directory (JSON/JSONL); the built-in sample corpus when omitted
    #[arg(long)]
    corpus: Option<String>,
    /// Engine configuration (JSON)
    #[arg(long)]
    config: Option<String>,
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
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let corpus = match &args.corpus {
        Some(path) => corpus::load_path(path)?,
        None => corpus::sample(),
    };
    let engine = Arc::new(Engine::build_index(corpus, &config)?);
    let app: Router = build_app(engine);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
