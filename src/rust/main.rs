use agrisense::{web, ModelManager, RuntimeConfig, ServerConfig};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about = "AgriSense leaf defect detection server", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, env = "AGRISENSE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "AGRISENSE_PORT", default_value_t = 8501)]
    port: u16,

    /// Directory holding the model and label files
    #[arg(long, env = "AGRISENSE_MODELS_DIR", default_value = agrisense::model_manager::DEFAULT_MODELS_DIR)]
    models_dir: PathBuf,

    /// ONNX model file name inside the models directory
    #[arg(long, env = "AGRISENSE_MODEL_FILE", default_value = agrisense::model_manager::DEFAULT_MODEL_FILE)]
    model_file: String,

    /// JSON label file name inside the models directory
    #[arg(long, env = "AGRISENSE_LABELS_FILE", default_value = agrisense::model_manager::DEFAULT_LABELS_FILE)]
    labels_file: String,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "AGRISENSE_MAX_UPLOAD_BYTES", default_value_t = agrisense::config::DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// ONNX Runtime intra-op threads (0 = let the runtime decide)
    #[arg(long, env = "AGRISENSE_INTRA_THREADS", default_value_t = 0)]
    intra_threads: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            models_dir: args.models_dir,
            model_file: args.model_file,
            labels_file: args.labels_file,
            max_upload_bytes: args.max_upload_bytes,
            intra_threads: args.intra_threads,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agrisense::init_logger();
    let config = ServerConfig::from(Args::parse());

    info!("=== Starting AgriSense v{} ===", env!("CARGO_PKG_VERSION"));

    let runtime_config = RuntimeConfig {
        intra_threads: config.intra_threads,
        ..RuntimeConfig::default()
    };
    let manager = ModelManager::new(&config.models_dir)
        .with_files(config.model_file.clone(), config.labels_file.clone())
        .with_runtime_config(runtime_config);

    if !manager.is_model_available() {
        error!("Model artifacts are missing; the server cannot start");
    }

    let start_time = Instant::now();
    let context = manager.load().map_err(|e| {
        error!("Failed to load model: {}", e);
        e
    })?;
    info!(
        "=== Model Loaded ({} classes, took {:.2?}) ===",
        context.labels().len(),
        start_time.elapsed()
    );

    web::serve(&config, context).await?;
    Ok(())
}
