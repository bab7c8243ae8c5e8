use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use taxon::{
    ClassificationEngine, EmbeddingTable, EngineConfig, PredictionResult, PredictionStats,
    TrainingReport,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Classify schema artifacts into a taxonomy
#[derive(Parser, Debug)]
#[command(name = "taxon")]
#[command(about = "Classify table and column names into a controlled taxonomy", long_about = None)]
struct Args {
    /// Taxonomy JSON file
    #[arg(short, long)]
    taxonomy: PathBuf,

    /// Training examples JSON file
    #[arg(short, long)]
    examples: PathBuf,

    /// Word embeddings (GloVe text, optionally .gz, or JSON)
    #[arg(long)]
    embeddings: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Texts to classify
    #[arg(required = true)]
    texts: Vec<String>,
}

#[derive(Serialize)]
struct Output {
    model: TrainingReport,
    predictions: Vec<PredictionResult>,
    stats: PredictionStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Taxon v{}", env!("CARGO_PKG_VERSION"));

    let config: EngineConfig = match &args.config {
        Some(path) => {
            info!("Configuration: {:?}", path);
            taxon::load_json(path)?
        }
        None => EngineConfig::default(),
    };

    let embeddings = match &args.embeddings {
        Some(path) => taxon::load_embeddings(path)?,
        None => {
            info!("No embeddings given, embedding signal stays neutral");
            EmbeddingTable::empty()
        }
    };

    let taxonomy = taxon::load_taxonomy(&args.taxonomy)?;
    let examples = taxon::load_examples(&args.examples)?;

    let engine = Arc::new(ClassificationEngine::new(config, Arc::new(embeddings))?);
    let model = engine.spawn_training(examples, taxonomy).await??;
    info!("Model {} ready with labels {:?}", model.model_id, model.labels);

    let predictions = engine.predict(&args.texts)?;
    let stats = PredictionStats::compute(&predictions);

    let output = Output {
        model,
        predictions,
        stats,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
