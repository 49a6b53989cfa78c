// Trained circuit parameters loaded from a JSON file.
//
// Format: a flat object mapping symbol names to angles in radians, e.g.
//   { "quantum__n_0_0": 1.57, "quantum__n_0_1": 0.12 }
// Symbols missing from the file fall back to the model's deterministic
// initializer.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(HashMap<String, f64>);

impl Weights {
    /// Read a weight file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read weight file {}", path.display()))?;
        let weights = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse weight file {}", path.display()))?;
        info!(
            path = %path.display(),
            symbols = weights.len(),
            "Loaded circuit weights"
        );
        Ok(weights)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.0.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let w = Weights::from_json(r#"{"mars__n_0_0": 0.5, "rover__n_0_1": 2.0}"#).unwrap();
        assert_eq!(w.len(), 2);
        assert_eq!(w.get("mars__n_0_0"), Some(0.5));
        assert_eq!(w.get("missing"), None);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(Weights::from_json("[1, 2, 3]").is_err());
    }
}
