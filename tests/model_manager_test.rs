mod common;

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use agrisense::{Classifier, ModelError, ModelManager};
use common::{FixedClassifier, LABELS};

fn write_artifacts(dir: &Path, labels_json: &str) {
    fs::write(dir.join("leaf_model.onnx"), b"stub model").unwrap();
    fs::write(dir.join("class_names.json"), labels_json).unwrap();
}

fn labels_json() -> String {
    serde_json::to_string(&LABELS).unwrap()
}

fn counting_manager(dir: &Path, width: usize) -> (ModelManager, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let manager = ModelManager::new(dir).with_loader(move |_path| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FixedClassifier { scores: vec![0.25; width] }) as Box<dyn Classifier>)
    });
    (manager, calls)
}

#[test]
fn test_load_once_returns_identical_context() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_artifacts(dir.path(), &labels_json());
    let (manager, calls) = counting_manager(dir.path(), LABELS.len());

    let first = manager.load()?;
    let second = manager.load()?;
    assert!(Arc::ptr_eq(&first, &second));
    assert!(std::ptr::eq(first.labels(), second.labels()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.labels().len(), 4);
    Ok(())
}

#[test]
fn test_clones_share_the_cache() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_artifacts(dir.path(), &labels_json());
    let (manager, calls) = counting_manager(dir.path(), LABELS.len());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let manager = manager.clone();
            thread::spawn(move || manager.load().map(|context| Arc::as_ptr(&context) as usize))
        })
        .collect();
    let pointers: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();

    assert!(pointers.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_missing_model_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("class_names.json"), labels_json())?;
    let (manager, calls) = counting_manager(dir.path(), LABELS.len());

    match manager.load() {
        Err(ModelError::NotFound { kind, path }) => {
            assert_eq!(kind, "model");
            assert!(path.ends_with("leaf_model.onnx"));
        }
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_missing_label_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("leaf_model.onnx"), b"stub model")?;
    let (manager, _) = counting_manager(dir.path(), LABELS.len());

    assert!(!manager.is_model_available());
    assert!(matches!(manager.load(), Err(ModelError::NotFound { kind: "labels", .. })));
    Ok(())
}

#[test]
fn test_corrupt_label_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_artifacts(dir.path(), "[\"Tomato_healthy\", ");
    let (manager, _) = counting_manager(dir.path(), 1);

    assert!(matches!(manager.load(), Err(ModelError::Corrupt { kind: "labels", .. })));
    Ok(())
}

#[test]
fn test_empty_label_list_is_corrupt() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_artifacts(dir.path(), "[]");
    let (manager, _) = counting_manager(dir.path(), 0);

    assert!(matches!(manager.load(), Err(ModelError::Corrupt { .. })));
    Ok(())
}

#[test]
fn test_label_count_must_match_model_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_artifacts(dir.path(), &labels_json());
    let (manager, _) = counting_manager(dir.path(), 38);

    match manager.load() {
        Err(ModelError::LabelMismatch { outputs, labels }) => {
            assert_eq!(outputs, 38);
            assert_eq!(labels, 4);
        }
        other => panic!("expected LabelMismatch, got {:?}", other.map(|_| ())),
    }
    Ok(())
}

#[test]
fn test_failed_load_is_not_cached() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (manager, calls) = counting_manager(dir.path(), LABELS.len());

    assert!(manager.load().is_err());
    write_artifacts(dir.path(), &labels_json());
    assert!(manager.load().is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_custom_file_names() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("plant.onnx"), b"stub model")?;
    fs::write(dir.path().join("labels.json"), labels_json())?;
    let (manager, _) = counting_manager(dir.path(), LABELS.len());
    let manager = manager.with_files("plant.onnx", "labels.json");

    assert!(manager.is_model_available());
    assert_eq!(manager.load()?.labels().get(3), Some("Tomato_healthy"));
    Ok(())
}
