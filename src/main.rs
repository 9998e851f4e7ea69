//! StudyMate — retrieval-augmented study assistant backend.
//!
//! Usage:
//!   studymate                          # serve the chat API (default)
//!   studymate serve --port 8080        # custom port
//!   studymate ingest data/materials.json
//!   studymate ingest notes/biology.md
//!   studymate health                   # ping the generation service

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use studymate_clients::{ChatCompletionsClient, EmbeddingsClient, OllamaClient, QdrantClient};
use studymate_core::{StudyMateConfig, TopicCatalog};
use studymate_gateway::AppState;
use studymate_retrieval::ChatPipeline;

#[derive(Parser)]
#[command(name = "studymate", version, about = "Retrieval-augmented study assistant backend")]
struct Cli {
    /// Path to a config file (default: ~/.studymate/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway (default when no subcommand is given)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Embed a study-material file and upsert it into the vector index
    Ingest { file: PathBuf },
    /// Check connectivity to the generation service
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => StudyMateConfig::load_from(path)?,
        None => StudyMateConfig::load()?,
    };

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => serve(config, host, port).await,
        Command::Ingest { file } => ingest(config, &file).await,
        Command::Health => health(config).await,
    }
}

async fn serve(config: StudyMateConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| config.gateway.host.clone());
    let port = port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(config.gateway.port);

    let catalog = Arc::new(TopicCatalog::load_from(std::path::Path::new(&config.catalog.path))?);

    let embedder = Arc::new(EmbeddingsClient::new(&config.embedding)?);
    let index = Arc::new(QdrantClient::new(&config.qdrant)?);
    let topic_model = Arc::new(ChatCompletionsClient::new(&config.selector)?);
    let answerer = Arc::new(OllamaClient::new(&config.generation)?);

    let pipeline = Arc::new(ChatPipeline::new(
        embedder,
        index,
        topic_model,
        answerer,
        catalog.clone(),
    ));

    studymate_gateway::run(AppState::new(catalog, pipeline), &host, port).await?;
    Ok(())
}

async fn ingest(config: StudyMateConfig, file: &PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("file not found: {}", file.display());
    }

    let embedder = EmbeddingsClient::new(&config.embedding)?;
    let index = QdrantClient::new(&config.qdrant)?;

    let count =
        studymate_ingest::ingest_file(file, &embedder, &index, config.embedding.dimension).await?;
    tracing::info!(points = count, file = %file.display(), "ingest complete");
    println!("Uploaded {count} points from {}", file.display());
    Ok(())
}

async fn health(config: StudyMateConfig) -> Result<()> {
    let generation = OllamaClient::new(&config.generation)?;
    if generation.health_check().await {
        println!("generation service: ok");
        Ok(())
    } else {
        println!("generation service: unreachable");
        std::process::exit(1);
    }
}
