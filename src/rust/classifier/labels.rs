use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ordered class names, index-aligned with the classifier's output vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelList(Vec<String>);

impl LabelList {
    pub fn new(labels: Vec<impl Into<String>>) -> Self {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Parses a JSON array of strings, e.g. `["Tomato_healthy", "Tomato_Leaf_Mold"]`.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads and parses a label file. I/O and parse failures are reported
    /// separately so callers can tell a missing file from a corrupt one.
    pub fn from_file(path: &Path) -> Result<Self, LabelFileError> {
        let contents = fs::read_to_string(path).map_err(LabelFileError::Io)?;
        Self::from_json_str(&contents).map_err(LabelFileError::Parse)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug)]
pub enum LabelFileError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}
