use agrisense::convert::{DEFAULT_SOURCE, DEFAULT_TARGET};
use agrisense::{convert_model, ConvertOutcome, RuntimeConfig};
use clap::Parser;
use std::path::PathBuf;

/// Convert a legacy leaf model into an optimized inference-only graph
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Legacy model file to read
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Where to write the converted model
    #[arg(long, default_value = DEFAULT_TARGET)]
    target: PathBuf,
}

fn main() -> anyhow::Result<()> {
    agrisense::init_logger();
    let args = Args::parse();

    match convert_model(&args.source, &args.target, &RuntimeConfig::default())? {
        ConvertOutcome::Converted => {
            println!("Converted {} -> {}", args.source.display(), args.target.display());
        }
        ConvertOutcome::SourceMissing => {
            println!("File not found: {}. Please check your folder.", args.source.display());
        }
    }
    Ok(())
}
