//! Leaf disease detection: an ONNX image classifier behind a small web form,
//! with a static table of defect descriptions and remedies.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use agrisense::ModelManager;
//!
//! let manager = ModelManager::new("models");
//! let context = manager.load()?;
//!
//! let bytes = std::fs::read("leaf.jpg")?;
//! let analysis = context.analyze(&bytes)?;
//! println!("{}", analysis.prediction.summary_line());
//! println!("{}", analysis.defect.remedy);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! [`ModelContext`] is immutable after loading and `Send + Sync`; the server
//! shares one instance through an `Arc` across all requests.

pub mod classifier;
pub mod config;
pub mod convert;
pub mod defects;
pub mod model_manager;
pub mod pipeline;
mod runtime;
pub mod web;

pub use classifier::{Classifier, ClassifierError, LabelList, OnnxClassifier, Prediction};
pub use config::ServerConfig;
pub use convert::{convert_model, ConvertOutcome};
pub use defects::DefectRecord;
pub use model_manager::{ModelError, ModelManager};
pub use pipeline::{Analysis, ModelContext};
pub use runtime::{create_session_builder, ensure_initialized, RuntimeConfig};

/// Installs `env_logger`, defaulting to `info` unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
