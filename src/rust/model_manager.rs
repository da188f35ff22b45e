use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use crate::classifier::{Classifier, LabelFileError, LabelList, OnnxClassifier};
use crate::pipeline::ModelContext;
use crate::runtime::RuntimeConfig;

pub const DEFAULT_MODELS_DIR: &str = "models";
pub const DEFAULT_MODEL_FILE: &str = "leaf_model.onnx";
pub const DEFAULT_LABELS_FILE: &str = "class_names.json";

/// Startup errors. Any of these leaves the process unable to serve requests.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("{kind} file not found: {path:?}")]
    NotFound { kind: &'static str, path: PathBuf },
    #[error("{kind} file {path:?} could not be loaded: {reason}")]
    Corrupt {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },
    #[error("Label count mismatch: model scores {outputs} classes but {labels} labels were loaded")]
    LabelMismatch { outputs: usize, labels: usize },
    #[error("ONNX Runtime error: {0}")]
    Runtime(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<ort::Error> for ModelError {
    fn from(err: ort::Error) -> Self {
        ModelError::Runtime(err.to_string())
    }
}

type ClassifierLoader = dyn Fn(&Path) -> Result<Box<dyn Classifier>, ModelError> + Send + Sync;

/// Locates the leaf model and its label file and loads them once per process.
///
/// Clones share the same cache, so handing a clone to another component
/// never triggers a second load.
#[derive(Clone)]
pub struct ModelManager {
    models_dir: PathBuf,
    model_file: String,
    labels_file: String,
    loader: Arc<ClassifierLoader>,
    loaded: Arc<OnceLock<Arc<ModelContext>>>,
    load_lock: Arc<Mutex<()>>,
}

impl ModelManager {
    /// Creates a ModelManager rooted at the default models directory
    pub fn new_default() -> Self {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        if let Ok(path) = env::var("AGRISENSE_MODELS_DIR") {
            return PathBuf::from(path);
        }
        PathBuf::from(DEFAULT_MODELS_DIR)
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        let runtime_config = RuntimeConfig::default();
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            labels_file: DEFAULT_LABELS_FILE.to_string(),
            loader: Arc::new(move |path: &Path| -> Result<Box<dyn Classifier>, ModelError> {
                let classifier = OnnxClassifier::from_file(path, &runtime_config)?;
                Ok(Box::new(classifier) as Box<dyn Classifier>)
            }),
            loaded: Arc::new(OnceLock::new()),
            load_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Overrides the artifact file names inside the models directory
    pub fn with_files(mut self, model_file: impl Into<String>, labels_file: impl Into<String>) -> Self {
        self.model_file = model_file.into();
        self.labels_file = labels_file.into();
        self
    }

    /// Uses the given ONNX Runtime settings for the default ONNX loader
    pub fn with_runtime_config(self, config: RuntimeConfig) -> Self {
        self.with_loader(move |path| {
            let classifier = OnnxClassifier::from_file(path, &config)?;
            Ok(Box::new(classifier) as Box<dyn Classifier>)
        })
    }

    /// Replaces the function that turns a model file into a classifier
    pub fn with_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn(&Path) -> Result<Box<dyn Classifier>, ModelError> + Send + Sync + 'static,
    {
        self.loader = Arc::new(loader);
        self
    }

    pub fn get_model_path(&self) -> PathBuf {
        self.models_dir.join(&self.model_file)
    }

    pub fn get_labels_path(&self) -> PathBuf {
        self.models_dir.join(&self.labels_file)
    }

    pub fn is_model_available(&self) -> bool {
        let model_path = self.get_model_path();
        let labels_path = self.get_labels_path();
        log::info!("Checking model artifacts:");
        log::info!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::info!("  Labels path: {:?} (exists: {})", labels_path, labels_path.exists());
        model_path.exists() && labels_path.exists()
    }

    /// Returns the cached context, loading it on first use.
    ///
    /// Every successful call on this manager (or any clone of it) returns
    /// the same `Arc`. Failures are not cached; the next call retries.
    pub fn load(&self) -> Result<Arc<ModelContext>, ModelError> {
        if let Some(context) = self.loaded.get() {
            return Ok(Arc::clone(context));
        }

        let _guard = self.load_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(context) = self.loaded.get() {
            return Ok(Arc::clone(context));
        }

        let context = Arc::new(self.load_fresh()?);
        Ok(Arc::clone(self.loaded.get_or_init(|| context)))
    }

    fn load_fresh(&self) -> Result<ModelContext, ModelError> {
        let start = Instant::now();
        let model_path = self.get_model_path();
        let labels_path = self.get_labels_path();

        if !model_path.exists() {
            log::error!("Model file missing at {:?}", model_path);
            return Err(ModelError::NotFound { kind: "model", path: model_path });
        }
        if !labels_path.exists() {
            log::error!("Label file missing at {:?}", labels_path);
            return Err(ModelError::NotFound { kind: "labels", path: labels_path });
        }

        let labels = Self::load_labels(&labels_path)?;
        log::info!("Loaded {} class labels from {:?}", labels.len(), labels_path);

        let classifier = (self.loader)(&model_path)?;
        if let Some(outputs) = classifier.output_width() {
            if outputs != labels.len() {
                log::error!("Model scores {} classes but {} labels are defined", outputs, labels.len());
                return Err(ModelError::LabelMismatch { outputs, labels: labels.len() });
            }
        }

        log::info!("Model ready (took {:.2?})", start.elapsed());
        Ok(ModelContext::new(classifier, labels))
    }

    fn load_labels(path: &Path) -> Result<LabelList, ModelError> {
        let labels = LabelList::from_file(path).map_err(|e| match e {
            LabelFileError::Io(err) if err.kind() == io::ErrorKind::NotFound => ModelError::NotFound {
                kind: "labels",
                path: path.to_path_buf(),
            },
            LabelFileError::Io(err) => ModelError::IoError(err),
            LabelFileError::Parse(err) => ModelError::Corrupt {
                kind: "labels",
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        })?;

        if labels.is_empty() {
            return Err(ModelError::Corrupt {
                kind: "labels",
                path: path.to_path_buf(),
                reason: "label list is empty".to_string(),
            });
        }
        Ok(labels)
    }
}
