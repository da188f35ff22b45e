//! Static leaf-defect table and label-to-defect resolution.

use serde::Serialize;

/// Description and remedy text for one defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefectRecord {
    pub key: &'static str,
    pub description: &'static str,
    pub remedy: &'static str,
}

pub const HEALTHY_KEY: &str = "Healthy";

/// Defects in matching order. Earlier entries win when several keys occur in
/// one label, so the order here is part of the matching behaviour.
pub static DEFECTS: [DefectRecord; 7] = [
    DefectRecord {
        key: "Bacterial_spot",
        description: "Dark, water-soaked spots spreading on the leaf surface.",
        remedy: "Use copper-based sprays, remove heavily infected leaves, avoid overhead watering.",
    },
    DefectRecord {
        key: "Rust",
        description: "Orange-brown pustules on the underside of leaves.",
        remedy: "Apply preventive fungicides early, use resistant varieties, and rotate crops.",
    },
    DefectRecord {
        key: "Early_blight",
        description: "Concentric brown rings on lower leaves.",
        remedy: "Spray mancozeb/chlorothalonil, remove old debris, improve airflow.",
    },
    DefectRecord {
        key: "Late_blight",
        description: "Large, irregular dark lesions often with white mold under humid conditions.",
        remedy: "Remove infected plants quickly, apply systemic fungicides.",
    },
    DefectRecord {
        key: "Leaf_Mold",
        description: "Yellow patches on top and olive-green mold beneath the leaves.",
        remedy: "Improve ventilation, reduce humidity, apply protective sprays.",
    },
    DefectRecord {
        key: "Septoria",
        description: "Circular brown spots with gray centers on older leaves.",
        remedy: "Remove spotted leaves, apply fungicides, avoid leaf wetness.",
    },
    DefectRecord {
        key: HEALTHY_KEY,
        description: "No major issues detected. Leaf looks healthy.",
        remedy: "Maintain proper irrigation, fertilization, and monitoring.",
    },
];

/// The fallback record returned when no key matches.
pub fn healthy() -> &'static DefectRecord {
    &DEFECTS[DEFECTS.len() - 1]
}

/// Maps a predicted class label to a defect record.
///
/// Returns the first key, in `DEFECTS` order, that occurs anywhere in the
/// label ignoring case; `Tomato_Bacterial_spot` resolves to `Bacterial_spot`.
/// Labels matching nothing resolve to the `Healthy` record.
pub fn resolve(label: &str) -> &'static DefectRecord {
    let label = label.to_lowercase();
    DEFECTS
        .iter()
        .find(|defect| label.contains(&defect.key.to_lowercase()))
        .unwrap_or_else(healthy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_and_complete() {
        let keys: Vec<_> = DEFECTS.iter().map(|d| d.key).collect();
        assert_eq!(
            keys,
            ["Bacterial_spot", "Rust", "Early_blight", "Late_blight", "Leaf_Mold", "Septoria", "Healthy"]
        );
        assert_eq!(healthy().key, HEALTHY_KEY);
    }

    #[test]
    fn test_keys_are_plain_tokens() {
        for defect in &DEFECTS {
            assert!(defect.key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            assert!(!defect.description.is_empty());
            assert!(!defect.remedy.is_empty());
        }
    }

    #[test]
    fn test_earlier_key_wins() {
        // Both "Rust" and "Septoria" occur; "Rust" is declared first.
        assert_eq!(resolve("Septoria_with_Rust").key, "Rust");
    }
}
