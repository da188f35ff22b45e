use std::path::PathBuf;

use crate::model_manager::{DEFAULT_LABELS_FILE, DEFAULT_MODELS_DIR, DEFAULT_MODEL_FILE};

/// Default upload ceiling: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Settings for the web server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub models_dir: PathBuf,
    pub model_file: String,
    pub labels_file: String,
    pub max_upload_bytes: usize,
    /// Threads ONNX Runtime may use within one operator; 0 lets it decide
    pub intra_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            labels_file: DEFAULT_LABELS_FILE.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            intra_threads: 0,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
